//! Place raster pictures on a web map as freely transformable quadrilaterals.
//!
//! A [`picture::PictureOverlay`] owns four geographic corners. Gestures in
//! [`interaction`] move, resize and rotate them in screen space, and the
//! overlay describes itself to the host map as style sources and layers.

pub mod common;
pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod image_input;
pub mod interaction;
pub mod overlay;
pub mod paths;
pub mod picture;
pub mod projection;
