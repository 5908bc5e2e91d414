//! Planar geometry helpers for overlay quadrilaterals.
//!
//! All points are in one consistent planar space (usually the host map's screen
//! pixels). Corner indices follow the overlay winding: top-left, top-right,
//! bottom-right, bottom-left.

use bevy::math::DVec2;

use crate::constants::CORNER_COUNT;
use crate::error::GeometryError;

/// Projection parameter `t` of `p` onto the line through `a` and `b`.
///
/// `a + t * (b - a)` is the orthogonal projection. `t` is not clamped; callers
/// wanting segment-bounded behavior clamp it to `[0, 1]` themselves.
pub fn segment_parameter(a: DVec2, b: DVec2, p: DVec2) -> Result<f64, GeometryError> {
    let v = b - a;
    let v2 = v.length_squared();
    if v2 == 0.0 || !v2.is_finite() {
        return Err(GeometryError::DegenerateSegment);
    }
    Ok((p - a).dot(v) / v2)
}

/// Closest point to `p` on the infinite line through `a` and `b`.
pub fn closest_point_on_segment(a: DVec2, b: DVec2, p: DVec2) -> Result<DVec2, GeometryError> {
    let t = segment_parameter(a, b, p)?;
    Ok(a + (b - a) * t)
}

/// Distance from `p` to the closed segment `[a, b]`.
pub fn distance_to_segment(a: DVec2, b: DVec2, p: DVec2) -> f64 {
    match segment_parameter(a, b, p) {
        Ok(t) => p.distance(a + (b - a) * t.clamp(0.0, 1.0)),
        // Segment is essentially a point
        Err(_) => p.distance(a),
    }
}

/// Index of the diagonally opposite corner (0↔2, 1↔3).
pub fn opposite_corner(index: usize) -> Result<usize, GeometryError> {
    match index {
        0 => Ok(2),
        1 => Ok(3),
        2 => Ok(0),
        3 => Ok(1),
        _ => Err(GeometryError::InvalidCornerIndex(index)),
    }
}

/// Corner following `index` in winding order.
pub fn next_corner(index: usize) -> usize {
    (index + 1) % CORNER_COUNT
}

/// Corner preceding `index` in winding order.
pub fn previous_corner(index: usize) -> usize {
    (index + CORNER_COUNT - 1) % CORNER_COUNT
}

/// Rotate a point around a center by the given angle (in radians)
pub fn rotate_point(point: DVec2, center: DVec2, angle: f64) -> DVec2 {
    let (sin_a, cos_a) = angle.sin_cos();
    let translated = point - center;
    DVec2::new(
        translated.x * cos_a - translated.y * sin_a,
        translated.x * sin_a + translated.y * cos_a,
    ) + center
}

/// Mean of the corners (the closing ring point is not counted twice).
pub fn vertex_centroid(corners: &[DVec2; CORNER_COUNT]) -> DVec2 {
    corners.iter().copied().sum::<DVec2>() / CORNER_COUNT as f64
}

/// Shoelace signed area. The sign encodes the winding direction.
pub fn signed_area(corners: &[DVec2; CORNER_COUNT]) -> f64 {
    let mut sum = 0.0;
    for i in 0..CORNER_COUNT {
        let a = corners[i];
        let b = corners[next_corner(i)];
        sum += a.x * b.y - b.x * a.y;
    }
    sum / 2.0
}

/// Even-odd point-in-polygon test.
pub fn point_in_quad(point: DVec2, corners: &[DVec2; CORNER_COUNT]) -> bool {
    let mut inside = false;
    for i in 0..CORNER_COUNT {
        let a = corners[i];
        let b = corners[previous_corner(i)];
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = a.x + (point.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if point.x < x_cross {
                inside = !inside;
            }
        }
    }
    inside
}
