//! Per-mode drag math: move, resize by corner, resize by edge, rotate.
//!
//! Every computation works on the projected snapshot taken at pointer-down, so
//! a frame never depends on the frames before it.

use bevy::math::DVec2;

use crate::constants::{CORNER_COUNT, MIN_QUAD_AREA};
use crate::error::GeometryError;
use crate::geometry::{
    closest_point_on_segment, next_corner, opposite_corner, previous_corner, rotate_point,
    signed_area,
};
use crate::picture::PicturePosition;
use crate::projection::MapProjection;

/// Pointer and overlay state captured when a drag begins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragStart {
    pub pointer: DVec2,
    pub position: PicturePosition,
    /// `position` projected to screen space
    pub corners: [DVec2; CORNER_COUNT],
}

impl DragStart {
    pub fn capture(map: &impl MapProjection, position: PicturePosition, pointer: DVec2) -> Self {
        Self {
            pointer,
            position,
            corners: position.project(map),
        }
    }

    /// Turn moved screen corners back into a position. Corners listed in
    /// `fixed` keep their original coordinates exactly.
    pub(crate) fn commit(
        &self,
        map: &impl MapProjection,
        points: [DVec2; CORNER_COUNT],
        fixed: &[usize],
    ) -> Option<PicturePosition> {
        let mut corners = self.position.0;
        for (index, point) in points.into_iter().enumerate() {
            if !fixed.contains(&index) {
                corners[index] = map.unproject(point);
            }
        }
        let position = PicturePosition::new(corners);
        position.is_finite().then_some(position)
    }

    /// Whether a resized quad keeps the winding and a usable area.
    pub(crate) fn keeps_orientation(&self, points: &[DVec2; CORNER_COUNT]) -> bool {
        let before = signed_area(&self.corners);
        let after = signed_area(points);
        after.is_finite() && after.abs() >= MIN_QUAD_AREA && before.signum() == after.signum()
    }
}

pub(crate) fn translate(start: &DragStart, pointer: DVec2) -> [DVec2; CORNER_COUNT] {
    let offset = pointer - start.pointer;
    start.corners.map(|corner| corner + offset)
}

/// Drag `corner` while its opposite corner stays put.
///
/// The two sides leaving the anchor keep their directions, so a parallelogram
/// stays a parallelogram. With `aspect` set the target is first pulled onto the
/// diagonal that reproduces the image's width:height ratio.
pub(crate) fn resize_corner(
    start: &DragStart,
    corner: usize,
    pointer: DVec2,
    aspect: Option<(f64, f64)>,
) -> Result<[DVec2; CORNER_COUNT], GeometryError> {
    let anchor_index = opposite_corner(corner)?;
    let after = next_corner(corner);
    let before = previous_corner(corner);

    let s = &start.corners;
    let anchor = s[anchor_index];
    let u = s[after] - anchor;
    let v = s[before] - anchor;

    let mut target = pointer + (s[corner] - start.pointer);

    if let Some((width, height)) = aspect {
        let u_dir = u.try_normalize().ok_or(GeometryError::DegenerateSegment)?;
        let v_dir = v.try_normalize().ok_or(GeometryError::DegenerateSegment)?;
        // Edges 0-1 and 2-3 span the image width
        let (u_len, v_len) = if corner % 2 == 1 {
            (width, height)
        } else {
            (height, width)
        };
        let diagonal = u_dir * u_len + v_dir * v_len;
        target = closest_point_on_segment(anchor, anchor + diagonal, target)?;
    }

    let det = u.perp_dot(v);
    if det.abs() <= f64::EPSILON {
        return Err(GeometryError::DegenerateSegment);
    }
    let d = target - anchor;
    let alpha = d.perp_dot(v) / det;
    let beta = u.perp_dot(d) / det;

    let mut points = *s;
    points[after] = anchor + u * alpha;
    points[before] = anchor + v * beta;
    points[corner] = anchor + u * alpha + v * beta;
    Ok(points)
}

/// Drag edge `edge` (corners `edge` and `edge + 1`); each endpoint slides along
/// its side so the opposite edge stays fixed.
pub(crate) fn resize_edge(
    start: &DragStart,
    edge: usize,
    pointer: DVec2,
) -> Result<[DVec2; CORNER_COUNT], GeometryError> {
    // The opposite edge runs between these two corners and does not move
    let fixed_start = opposite_corner(edge)?;
    let first = edge;
    let second = next_corner(edge);
    debug_assert_eq!(next_corner(second), fixed_start);
    let offset = pointer - start.pointer;

    let s = &start.corners;
    let mut points = *s;
    points[first] =
        closest_point_on_segment(s[previous_corner(first)], s[first], s[first] + offset)?;
    points[second] =
        closest_point_on_segment(s[next_corner(second)], s[second], s[second] + offset)?;
    Ok(points)
}

/// Rotate the snapshot around `pivot` by `angle` radians.
pub(crate) fn rotate(start: &DragStart, pivot: DVec2, angle: f64) -> [DVec2; CORNER_COUNT] {
    start.corners.map(|corner| rotate_point(corner, pivot, angle))
}

/// Angle swept by the pointer around `pivot`, optionally snapped.
pub(crate) fn swept_angle(
    start_angle: f64,
    pivot: DVec2,
    pointer: DVec2,
    snap: Option<f64>,
) -> Option<f64> {
    let arm = pointer - pivot;
    if arm.length_squared() <= f64::EPSILON {
        return None;
    }
    let mut delta = arm.to_angle() - start_angle;
    if let Some(increment) = snap.filter(|step| *step > 0.0) {
        delta = (delta / increment).round() * increment;
    }
    Some(delta)
}
