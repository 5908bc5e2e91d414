//! Source and layer descriptors handed to the host map.
//!
//! Each layer kind has its own struct with a fixed set of style fields. They
//! serialize to the host's style JSON (`"raster-opacity"`, `"line-dasharray"`, ...).

use serde::Serialize;

use crate::common::Visibility;

use super::features::PolygonFeature;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "image")]
pub struct ImageSourceSpec {
    pub url: String,
    pub coordinates: [[f64; 2]; 4],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageSource {
    pub id: String,
    pub source: ImageSourceSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "geojson")]
pub struct GeoJsonSourceSpec {
    pub data: PolygonFeature,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolygonSource {
    pub id: String,
    pub source: GeoJsonSourceSpec,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LayerLayout {
    pub visibility: Visibility,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    Bevel,
    Round,
    Miter,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct LineLayout {
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub visibility: Visibility,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RasterPaint {
    pub raster_fade_duration: u32,
    pub raster_opacity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct FillPaint {
    pub fill_opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct LinePaint {
    pub line_dasharray: [f64; 2],
    pub line_color: String,
    pub line_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CirclePaint {
    pub circle_radius: f64,
    pub circle_color: String,
    pub circle_stroke_width: f64,
    pub circle_stroke_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "raster")]
pub struct RasterLayer {
    pub id: String,
    pub source: String,
    pub layout: LayerLayout,
    pub paint: RasterPaint,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "fill")]
pub struct FillLayer {
    pub id: String,
    pub source: String,
    pub layout: LayerLayout,
    pub paint: FillPaint,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "line")]
pub struct LineLayer {
    pub id: String,
    pub source: String,
    pub layout: LineLayout,
    pub paint: LinePaint,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "circle")]
pub struct CircleLayer {
    pub id: String,
    pub source: String,
    pub layout: LayerLayout,
    pub paint: CirclePaint,
}

/// Operations shared by every layer descriptor.
pub trait MapLayer {
    fn id(&self) -> &str;
    fn set_visibility(&mut self, visibility: Visibility);
}

impl MapLayer for RasterLayer {
    fn id(&self) -> &str {
        &self.id
    }
    fn set_visibility(&mut self, visibility: Visibility) {
        self.layout.visibility = visibility;
    }
}

impl MapLayer for FillLayer {
    fn id(&self) -> &str {
        &self.id
    }
    fn set_visibility(&mut self, visibility: Visibility) {
        self.layout.visibility = visibility;
    }
}

impl MapLayer for LineLayer {
    fn id(&self) -> &str {
        &self.id
    }
    fn set_visibility(&mut self, visibility: Visibility) {
        self.layout.visibility = visibility;
    }
}

impl MapLayer for CircleLayer {
    fn id(&self) -> &str {
        &self.id
    }
    fn set_visibility(&mut self, visibility: Visibility) {
        self.layout.visibility = visibility;
    }
}

/// Everything the host needs to draw one overlay, in drawing order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderBundle {
    pub image_source: ImageSource,
    pub polygon_source: PolygonSource,
    pub raster: RasterLayer,
    pub fill: FillLayer,
    pub line: LineLayer,
    pub circle: CircleLayer,
}

impl RenderBundle {
    pub fn source_ids(&self) -> [&str; 2] {
        [&self.image_source.id, &self.polygon_source.id]
    }

    pub fn layer_ids(&self) -> [&str; 4] {
        [
            self.raster.id(),
            self.fill.id(),
            self.line.id(),
            self.circle.id(),
        ]
    }

    /// Show or hide the contour and corner handles, leaving the picture visible.
    pub fn set_handles_visibility(&mut self, visibility: Visibility) {
        self.line.set_visibility(visibility);
        self.circle.set_visibility(visibility);
    }
}
