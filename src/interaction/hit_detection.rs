//! Hit detection for overlay handles, in screen space.

use bevy::math::DVec2;

use crate::common::Cursor;
use crate::constants::CORNER_COUNT;
use crate::geometry::{distance_to_segment, next_corner, point_in_quad, vertex_centroid};

use super::InteractionSettings;

/// Part of an overlay a pointer-down can grab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    /// Corner by index, as tagged on the corner point features
    Corner(usize),
    /// Edge from corner `i` to corner `i + 1`
    Edge(usize),
    /// Inside the quadrilateral
    Body,
    /// Knob beyond the top edge
    Rotate,
}

/// Position of the rotation knob: beyond the midpoint of the top edge, pushed
/// away from the centroid.
pub fn rotate_handle_position(corners: &[DVec2; CORNER_COUNT], offset: f64) -> Option<DVec2> {
    let mid = (corners[0] + corners[1]) / 2.0;
    let normal = (corners[1] - corners[0]).perp().try_normalize()?;
    let outward = if normal.dot(mid - vertex_centroid(corners)) < 0.0 {
        -normal
    } else {
        normal
    };
    Some(mid + outward * offset)
}

/// Determine which handle (if any) is under the point.
///
/// Priority: rotation knob, corners, edges, then the body.
pub fn handle_at(
    corners: &[DVec2; CORNER_COUNT],
    point: DVec2,
    settings: &InteractionSettings,
) -> Option<Handle> {
    let radius = settings.handle_radius;

    if let Some(knob) = rotate_handle_position(corners, settings.rotate_handle_offset)
        && knob.distance(point) <= radius
    {
        return Some(Handle::Rotate);
    }

    if let Some(index) = corners.iter().position(|c| c.distance(point) <= radius) {
        return Some(Handle::Corner(index));
    }

    if let Some(index) = (0..CORNER_COUNT)
        .find(|&i| distance_to_segment(corners[i], corners[next_corner(i)], point) <= radius)
    {
        return Some(Handle::Edge(index));
    }

    point_in_quad(point, corners).then_some(Handle::Body)
}

/// Cursor to show over a handle.
pub fn handle_cursor(handle: Handle, corners: &[DVec2; CORNER_COUNT]) -> Cursor {
    match handle {
        Handle::Body => Cursor::Move,
        Handle::Rotate => Cursor::Grab,
        Handle::Corner(index) => {
            let Some(corner) = corners.get(index) else {
                return Cursor::Default;
            };
            // Screen y grows downward, so same-sign offsets lie on the NW/SE diagonal
            let offset = *corner - vertex_centroid(corners);
            if offset.x * offset.y > 0.0 {
                Cursor::NwseResize
            } else {
                Cursor::NeswResize
            }
        }
        Handle::Edge(index) => {
            if index >= CORNER_COUNT {
                return Cursor::Default;
            }
            let direction = corners[next_corner(index)] - corners[index];
            if direction.x.abs() >= direction.y.abs() {
                Cursor::NsResize
            } else {
                Cursor::EwResize
            }
        }
    }
}
