//! The picture overlay model and everything derived from its position.

mod descriptors;
mod features;
mod position;

#[cfg(test)]
mod tests;

pub use descriptors::{
    CircleLayer, CirclePaint, FillLayer, FillPaint, GeoJsonSourceSpec, ImageSource,
    ImageSourceSpec, LayerLayout, LineCap, LineJoin, LineLayer, LineLayout, LinePaint, MapLayer,
    PolygonSource, RasterLayer, RasterPaint, RenderBundle,
};
pub use features::{
    CornerProperties, PointCollection, PointFeature, PointGeometry, PolygonFeature,
    PolygonGeometry, PolygonProperties, Ring,
};
pub use position::{LngLat, PicturePosition, is_valid_fill_fraction};

use bevy::prelude::*;

use crate::constants::{
    CIRCLE_RADIUS, CIRCLE_STROKE_COLOR, CIRCLE_STROKE_WIDTH, CORNER_COUNT, FILL_OPACITY,
    HANDLE_COLOR, LINE_DASH, LINE_WIDTH, RASTER_FADE_DURATION, RASTER_OPACITY,
};
use crate::error::GeometryError;
use crate::geometry;
use crate::image_input::ImageInfo;
use crate::projection::MapProjection;

/// Options for constructing a [`PictureOverlay`].
#[derive(Debug, Clone)]
pub struct PictureOptions {
    pub id: String,
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub position: PicturePosition,
}

/// One raster picture placed on the map as a four-corner quadrilateral.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct PictureOverlay {
    id: String,
    url: String,
    width: u32,
    height: u32,
    position: PicturePosition,
    locked: bool,
}

impl PictureOverlay {
    pub fn new(options: PictureOptions) -> Self {
        Self {
            id: options.id,
            url: options.url,
            width: options.width,
            height: options.height,
            position: options.position,
            locked: false,
        }
    }

    /// New overlay for a picked image, centred in the current view.
    pub fn from_image(info: &ImageInfo, map: &impl MapProjection, fill_fraction: f64) -> Self {
        let position = PicturePosition::centered(map, info.width, info.height, fill_fraction);
        Self::new(PictureOptions {
            id: uuid::Uuid::new_v4().to_string(),
            url: info.url.clone(),
            width: info.width,
            height: info.height,
            position,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn position(&self) -> &PicturePosition {
        &self.position
    }

    /// Replace the whole position. Only the update callback of an interaction
    /// should end up here.
    pub fn set_position(&mut self, position: PicturePosition) {
        self.position = position;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    /// `[lng, lat]` per corner in corner order.
    pub fn coordinates(&self) -> [[f64; 2]; CORNER_COUNT] {
        self.position.corners().map(LngLat::to_array)
    }

    pub fn as_polygon(&self) -> PolygonFeature {
        let [a, b, c, d] = self.coordinates();
        PolygonFeature {
            properties: PolygonProperties {
                id: self.id.clone(),
            },
            geometry: PolygonGeometry {
                coordinates: [[a, b, c, d, a]],
            },
        }
    }

    pub fn as_points(&self) -> PointCollection {
        PointCollection {
            features: self
                .coordinates()
                .into_iter()
                .enumerate()
                .map(|(index, coordinates)| PointFeature {
                    properties: CornerProperties { index },
                    geometry: PointGeometry { coordinates },
                })
                .collect(),
        }
    }

    pub fn raster_id(&self) -> String {
        format!("{}-raster", self.id)
    }

    pub fn polygon_id(&self) -> String {
        format!("{}-polygon", self.id)
    }

    pub fn image_source(&self) -> ImageSource {
        ImageSource {
            id: self.raster_id(),
            source: ImageSourceSpec {
                url: self.url.clone(),
                coordinates: self.coordinates(),
            },
        }
    }

    pub fn polygon_source(&self) -> PolygonSource {
        PolygonSource {
            id: self.polygon_id(),
            source: GeoJsonSourceSpec {
                data: self.as_polygon(),
            },
        }
    }

    pub fn as_raster_layer(&self) -> RasterLayer {
        RasterLayer {
            id: self.raster_id(),
            source: self.raster_id(),
            layout: LayerLayout::default(),
            paint: RasterPaint {
                raster_fade_duration: RASTER_FADE_DURATION,
                raster_opacity: RASTER_OPACITY,
            },
        }
    }

    pub fn as_fill_layer(&self) -> FillLayer {
        FillLayer {
            id: format!("{}-fill", self.id),
            source: self.polygon_id(),
            layout: LayerLayout::default(),
            paint: FillPaint {
                fill_opacity: FILL_OPACITY,
            },
        }
    }

    pub fn as_line_layer(&self) -> LineLayer {
        LineLayer {
            id: format!("{}-contour", self.id),
            source: self.polygon_id(),
            layout: LineLayout {
                line_cap: LineCap::Round,
                line_join: LineJoin::Round,
                visibility: Default::default(),
            },
            paint: LinePaint {
                line_dasharray: LINE_DASH,
                line_color: HANDLE_COLOR.to_string(),
                line_width: LINE_WIDTH,
            },
        }
    }

    pub fn as_circle_layer(&self) -> CircleLayer {
        CircleLayer {
            id: format!("{}-circle", self.id),
            source: self.polygon_id(),
            layout: LayerLayout::default(),
            paint: CirclePaint {
                circle_radius: CIRCLE_RADIUS,
                circle_color: HANDLE_COLOR.to_string(),
                circle_stroke_width: CIRCLE_STROKE_WIDTH,
                circle_stroke_color: CIRCLE_STROKE_COLOR.to_string(),
            },
        }
    }

    pub fn render_bundle(&self) -> RenderBundle {
        RenderBundle {
            image_source: self.image_source(),
            polygon_source: self.polygon_source(),
            raster: self.as_raster_layer(),
            fill: self.as_fill_layer(),
            line: self.as_line_layer(),
            circle: self.as_circle_layer(),
        }
    }

    /// Centroid of the polygon, taken as the mean of its four corners.
    pub fn centroid(&self) -> LngLat {
        let corners = self.position.corners().map(LngLat::as_dvec2);
        let center = geometry::vertex_centroid(&corners);
        LngLat::new(center.x, center.y)
    }

    pub fn opposite_point_to(&self, index: usize) -> Result<usize, GeometryError> {
        geometry::opposite_corner(index)
    }
}
