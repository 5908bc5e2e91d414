use bevy::math::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::{CORNER_COUNT, DEFAULT_FILL_FRACTION};
use crate::projection::MapProjection;

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// `[lng, lat]` pair as used by GeoJSON and image sources.
    pub fn to_array(self) -> [f64; 2] {
        [self.lng, self.lat]
    }

    pub fn as_dvec2(self) -> DVec2 {
        DVec2::new(self.lng, self.lat)
    }

    pub fn is_finite(self) -> bool {
        self.lng.is_finite() && self.lat.is_finite()
    }
}

impl From<[f64; 2]> for LngLat {
    fn from([lng, lat]: [f64; 2]) -> Self {
        Self { lng, lat }
    }
}

/// The four corners of an overlay: top-left, top-right, bottom-right, bottom-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PicturePosition(pub [LngLat; CORNER_COUNT]);

impl PicturePosition {
    pub fn new(corners: [LngLat; CORNER_COUNT]) -> Self {
        Self(corners)
    }

    pub fn corners(&self) -> &[LngLat; CORNER_COUNT] {
        &self.0
    }

    /// Corners in the map's screen plane.
    pub fn project(&self, map: &impl MapProjection) -> [DVec2; CORNER_COUNT] {
        self.0.map(|corner| map.project(corner))
    }

    /// Rebuild a position from screen points.
    pub fn unproject(points: [DVec2; CORNER_COUNT], map: &impl MapProjection) -> Self {
        Self(points.map(|point| map.unproject(point)))
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|corner| corner.is_finite())
    }

    /// Axis-aligned rectangle centred in the viewport, keeping the image aspect
    /// ratio and filling `fraction` of the limiting viewport dimension.
    ///
    /// A fraction outside `(0, 1]` falls back to the default.
    pub fn centered(map: &impl MapProjection, width: u32, height: u32, fraction: f64) -> Self {
        let fraction = if is_valid_fill_fraction(fraction) {
            fraction
        } else {
            DEFAULT_FILL_FRACTION
        };
        let viewport = map.viewport();
        let size = DVec2::new(f64::from(width.max(1)), f64::from(height.max(1)));
        let scale = fraction * (viewport.x / size.x).min(viewport.y / size.y);
        let half = size * scale / 2.0;
        let center = viewport / 2.0;

        Self::unproject(
            [
                center + DVec2::new(-half.x, -half.y),
                center + DVec2::new(half.x, -half.y),
                center + DVec2::new(half.x, half.y),
                center + DVec2::new(-half.x, half.y),
            ],
            map,
        )
    }
}

/// Whether `fraction` can size a new picture: finite and in `(0, 1]`.
pub fn is_valid_fill_fraction(fraction: f64) -> bool {
    fraction.is_finite() && fraction > 0.0 && fraction <= 1.0
}

impl From<[LngLat; CORNER_COUNT]> for PicturePosition {
    fn from(corners: [LngLat; CORNER_COUNT]) -> Self {
        Self(corners)
    }
}
