//! Centralized constants used across the crate.
//!
//! Style values for the layer descriptors live here so every overlay renders
//! identically given the same id.

/// Number of corners of every overlay quadrilateral
pub const CORNER_COUNT: usize = 4;

/// Image file extensions offered by the file picker (lowercase, no dot)
pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Tile size used by the web mercator view, in pixels
pub const TILE_SIZE: f64 = 512.0;

/// Latitude limit of the web mercator projection
pub const MAX_MERCATOR_LATITUDE: f64 = 85.051_128_779_806_59;

/// Default hit radius for corner and edge handles (screen pixels)
pub const DEFAULT_HANDLE_RADIUS: f64 = 8.0;

/// Default distance of the rotation handle beyond the top edge (screen pixels)
pub const DEFAULT_ROTATE_HANDLE_OFFSET: f64 = 25.0;

/// Default snap increment for rotation when holding Shift (in degrees)
pub const DEFAULT_ROTATION_SNAP: f64 = 15.0;

/// Default share of the viewport a newly added picture occupies
pub const DEFAULT_FILL_FRACTION: f64 = 0.5;

/// Resize frames producing a smaller area than this (square pixels) are rejected
pub const MIN_QUAD_AREA: f64 = 1.0;

// Layer styling
pub const RASTER_OPACITY: f64 = 0.5;
pub const RASTER_FADE_DURATION: u32 = 0;
pub const FILL_OPACITY: f64 = 0.0;
pub const HANDLE_COLOR: &str = "rgb(61, 90, 254)";
pub const LINE_DASH: [f64; 2] = [0.2, 2.0];
pub const LINE_WIDTH: f64 = 2.0;
pub const CIRCLE_RADIUS: f64 = 5.0;
pub const CIRCLE_STROKE_WIDTH: f64 = 3.0;
pub const CIRCLE_STROKE_COLOR: &str = "#fff";
