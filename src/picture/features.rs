//! GeoJSON shapes derived from an overlay position.

use serde::Serialize;

/// Closed outer ring: four corners plus the first corner repeated.
pub type Ring = [[f64; 2]; 5];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Polygon")]
pub struct PolygonGeometry {
    pub coordinates: [Ring; 1],
}

impl PolygonGeometry {
    pub fn ring(&self) -> &Ring {
        &self.coordinates[0]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolygonProperties {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct PolygonFeature {
    pub properties: PolygonProperties,
    pub geometry: PolygonGeometry,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Point")]
pub struct PointGeometry {
    pub coordinates: [f64; 2],
}

/// Corner index carried by each point so a drag can find its corner again.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CornerProperties {
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct PointFeature {
    pub properties: CornerProperties,
    pub geometry: PointGeometry,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct PointCollection {
    pub features: Vec<PointFeature>,
}
