//! Picking image files and reading what a new overlay needs from them.

use std::path::{Path, PathBuf};

use bevy::prelude::*;

use crate::constants::IMAGE_EXTENSIONS;
use crate::error::ImageInputError;

/// Source image reference and its pixel size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

impl ImageInfo {
    /// Read the pixel dimensions of a supported image without decoding it.
    pub fn probe(path: &Path) -> Result<Self, ImageInputError> {
        if !is_supported_image(path) {
            return Err(ImageInputError::Unsupported(path.to_path_buf()));
        }

        let (width, height) =
            image::image_dimensions(path).map_err(|source| ImageInputError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            url: path_to_url(path),
            width,
            height,
        })
    }
}

/// Check the extension against the accepted image types (case-insensitive).
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}

/// `file://` URL for a local path; absolute paths only get the scheme.
pub fn path_to_url(path: &Path) -> String {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|dir| dir.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };
    let normalized = absolute.to_string_lossy().replace('\\', "/");
    if normalized.starts_with('/') {
        format!("file://{}", normalized)
    } else {
        format!("file:///{}", normalized)
    }
}

/// Open the native multi-select dialog filtered to image types.
pub fn pick_image_files() -> Vec<PathBuf> {
    let mut dialog = rfd::FileDialog::new()
        .set_title("Add pictures")
        .add_filter("Images", &IMAGE_EXTENSIONS);
    if let Some(dir) = crate::paths::pictures_dir() {
        dialog = dialog.set_directory(dir);
    }
    dialog.pick_files().unwrap_or_default()
}

/// Probe every path, logging and skipping the ones that fail.
pub fn probe_all(paths: &[PathBuf]) -> Vec<ImageInfo> {
    paths
        .iter()
        .filter_map(|path| match ImageInfo::probe(path) {
            Ok(info) => {
                debug!("Probed {:?}: {}x{}", path, info.width, info.height);
                Some(info)
            }
            Err(e) => {
                warn!("Skipping picture: {}", e);
                None
            }
        })
        .collect()
}
