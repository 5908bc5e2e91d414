//! Conversion between geographic coordinates and the host map's screen plane.

use bevy::math::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_MERCATOR_LATITUDE, TILE_SIZE};
use crate::picture::LngLat;

/// The map handle interactions work through.
///
/// Screen coordinates are pixels with y growing downward. Gestures do all of
/// their math in this plane and convert back with [`MapProjection::unproject`].
pub trait MapProjection {
    fn project(&self, lng_lat: LngLat) -> DVec2;
    fn unproject(&self, point: DVec2) -> LngLat;
    /// Size of the visible viewport in pixels
    fn viewport(&self) -> DVec2;
}

/// Web mercator camera: center, fractional zoom and viewport size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WebMercatorView {
    pub center: LngLat,
    pub zoom: f64,
    pub viewport: [f64; 2],
}

impl Default for WebMercatorView {
    fn default() -> Self {
        Self {
            center: LngLat::new(0.0, 0.0),
            zoom: 2.0,
            viewport: [1600.0, 900.0],
        }
    }
}

impl WebMercatorView {
    fn world_size(&self) -> f64 {
        TILE_SIZE * self.zoom.exp2()
    }

    /// Position of a coordinate in world pixels at the current zoom.
    fn to_world(&self, lng_lat: LngLat) -> DVec2 {
        let size = self.world_size();
        let lat = lng_lat.lat.clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE);
        let x = (180.0 + lng_lat.lng) / 360.0;
        let y = (180.0
            - (180.0 / std::f64::consts::PI)
                * (std::f64::consts::FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln())
            / 360.0;
        DVec2::new(x * size, y * size)
    }

    fn from_world(&self, world: DVec2) -> LngLat {
        let size = self.world_size();
        let lng = world.x / size * 360.0 - 180.0;
        let y = 180.0 - world.y / size * 360.0;
        let lat = 360.0 / std::f64::consts::PI * (y.to_radians()).exp().atan() - 90.0;
        LngLat::new(lng, lat)
    }
}

impl MapProjection for WebMercatorView {
    fn project(&self, lng_lat: LngLat) -> DVec2 {
        self.to_world(lng_lat) - self.to_world(self.center) + self.viewport() / 2.0
    }

    fn unproject(&self, point: DVec2) -> LngLat {
        self.from_world(point - self.viewport() / 2.0 + self.to_world(self.center))
    }

    fn viewport(&self) -> DVec2 {
        DVec2::from_array(self.viewport)
    }
}
