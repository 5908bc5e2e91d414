//! Where geopicture keeps its files.
//!
//! Development builds keep everything next to the working directory. Installed
//! builds use the platform's config and data directories under `geopicture/`;
//! outside Linux both resolve to the data directory.

use std::path::PathBuf;

const APP_DIR: &str = "geopicture";
const CONFIG_FILE: &str = "config.json";
const LOGS_DIR: &str = "logs";

/// True under `cargo run` or in debug builds.
pub fn is_dev_mode() -> bool {
    std::env::var("CARGO").is_ok() || cfg!(debug_assertions)
}

/// Kinds of per-user directory the app writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppDir {
    Config,
    Data,
}

impl AppDir {
    /// Root of this directory kind, if the platform has one.
    pub fn base(self) -> Option<PathBuf> {
        if is_dev_mode() {
            return Some(PathBuf::from("."));
        }

        let platform = match self {
            AppDir::Config if cfg!(target_os = "linux") => dirs::config_dir(),
            AppDir::Config | AppDir::Data => dirs::data_dir(),
        };
        platform.map(|p| p.join(APP_DIR))
    }

    /// `name` inside this directory, falling back to a relative path.
    fn join(self, name: &str) -> PathBuf {
        self.base()
            .map(|p| p.join(name))
            .unwrap_or_else(|| PathBuf::from(name))
    }
}

pub fn config_file() -> PathBuf {
    AppDir::Config.join(CONFIG_FILE)
}

pub fn logs_dir() -> PathBuf {
    AppDir::Data.join(LOGS_DIR)
}

/// Folder the image picker opens in: the user's pictures folder, else home.
pub fn pictures_dir() -> Option<PathBuf> {
    dirs::picture_dir().or_else(dirs::home_dir)
}

/// Create the config and logs directories of an installed build.
pub fn ensure_directories() -> std::io::Result<()> {
    if is_dev_mode() {
        return Ok(());
    }

    if let Some(config) = AppDir::Config.base() {
        std::fs::create_dir_all(config)?;
    }
    std::fs::create_dir_all(logs_dir())
}
