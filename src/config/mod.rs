use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::DEFAULT_FILL_FRACTION;
use crate::interaction::{InteractionSettings, ResizePolicy};
use crate::picture::is_valid_fill_fraction;
use crate::projection::WebMercatorView;

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

fn default_fill_fraction() -> f64 {
    DEFAULT_FILL_FRACTION
}

/// Overlay configuration persisted to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayConfigData {
    /// Hit radii, rotation snapping and resize policy
    #[serde(default)]
    pub interaction: InteractionSettings,

    /// Map view used until the host reports its own camera
    #[serde(default)]
    pub initial_view: WebMercatorView,

    /// Share of the viewport a newly added picture covers
    #[serde(default = "default_fill_fraction")]
    pub fill_fraction: f64,
}

impl OverlayConfigData {
    /// Replace out-of-range values with defaults, describing what was replaced.
    fn sanitize(&mut self) -> Option<String> {
        if is_valid_fill_fraction(self.fill_fraction) {
            return None;
        }
        let reason = format!(
            "Fill fraction {} is outside (0, 1]; using {}",
            self.fill_fraction, DEFAULT_FILL_FRACTION
        );
        warn!("{}", reason);
        self.fill_fraction = DEFAULT_FILL_FRACTION;
        Some(reason)
    }
}

impl Default for OverlayConfigData {
    fn default() -> Self {
        Self {
            interaction: InteractionSettings::default(),
            initial_view: WebMercatorView::default(),
            fill_fraction: DEFAULT_FILL_FRACTION,
        }
    }
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct OverlayConfig {
    /// The persisted configuration data
    pub data: OverlayConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            data: OverlayConfigData::default(),
            config_path: get_config_path(),
            dirty: false,
        }
    }
}

/// Resource to notify the user when config was reset to defaults
#[derive(Resource, Default)]
pub struct ConfigResetNotification {
    /// Whether to show the notification
    pub show: bool,
    /// The reason for the reset (parse error, read error, etc.)
    pub reason: Option<String>,
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Message to change the corner resize policy
#[derive(Message)]
pub struct SetResizePolicyRequest {
    pub policy: ResizePolicy,
}

/// Message to change the rotation snap increment
#[derive(Message)]
pub struct SetRotationSnapRequest {
    pub degrees: f64,
}

/// Get the path to the config file (platform-appropriate location)
fn get_config_path() -> PathBuf {
    crate::paths::config_file()
}

/// Result of loading config from disk
struct LoadConfigResult {
    data: OverlayConfigData,
    /// Error message if config was reset to defaults due to an error
    reset_reason: Option<String>,
}

/// Parse config JSON, falling back to defaults with a reason on failure
fn parse_config(json: &str) -> LoadConfigResult {
    match serde_json::from_str::<OverlayConfigData>(json) {
        Ok(mut data) => {
            let reset_reason = data.sanitize();
            LoadConfigResult { data, reset_reason }
        }
        Err(e) => {
            warn!("Failed to parse config file: {}", e);
            LoadConfigResult {
                data: OverlayConfigData::default(),
                reset_reason: Some(format!("Configuration file was corrupted: {}", e)),
            }
        }
    }
}

/// Load configuration from disk
fn load_config(config_path: &Path) -> LoadConfigResult {
    if !config_path.exists() {
        info!("No config file found, using defaults");
        return LoadConfigResult {
            data: OverlayConfigData::default(),
            reset_reason: None,
        };
    }

    match std::fs::read_to_string(config_path) {
        Ok(json) => {
            let result = parse_config(&json);
            if result.reset_reason.is_none() {
                info!("Loaded config from {:?}", config_path);
            }
            result
        }
        Err(e) => {
            warn!("Failed to read config file: {}", e);
            LoadConfigResult {
                data: OverlayConfigData::default(),
                reset_reason: Some(format!("Could not read configuration file: {}", e)),
            }
        }
    }
}

/// Save configuration to disk
fn save_config(config: &OverlayConfig) {
    match serde_json::to_string_pretty(&config.data) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&config.config_path, json) {
                error!("Failed to save config: {}", e);
            } else {
                info!("Config saved to {:?}", config.config_path);
            }
        }
        Err(e) => {
            error!("Failed to serialize config: {}", e);
        }
    }
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(
    mut config: ResMut<OverlayConfig>,
    mut reset_notification: ResMut<ConfigResetNotification>,
) {
    let result = load_config(&config.config_path);
    config.data = result.data;
    config.dirty = false;

    // Set notification if config was reset due to an error
    if let Some(reason) = result.reset_reason {
        reset_notification.show = true;
        reset_notification.reason = Some(reason);
    }
}

/// System to save config when requested
fn save_config_system(
    mut events: MessageReader<SaveConfigRequest>,
    mut config: ResMut<OverlayConfig>,
) {
    for _ in events.read() {
        if config.dirty {
            save_config(&config);
            config.dirty = false;
        }
    }
}

/// System to change the resize policy
fn set_resize_policy_system(
    mut events: MessageReader<SetResizePolicyRequest>,
    mut config: ResMut<OverlayConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        config.data.interaction.resize_policy = event.policy;
        config.dirty = true;
        save_events.write(SaveConfigRequest);
        info!("Resize policy set to {:?}", event.policy);
    }
}

/// System to change the rotation snap increment
fn set_rotation_snap_system(
    mut events: MessageReader<SetRotationSnapRequest>,
    mut config: ResMut<OverlayConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        if !(event.degrees.is_finite() && event.degrees >= 0.0) {
            warn!("Ignoring invalid rotation snap {}", event.degrees);
            continue;
        }
        config.data.interaction.rotation_snap_degrees = event.degrees;
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OverlayConfig>()
            .init_resource::<ConfigResetNotification>()
            .add_message::<SaveConfigRequest>()
            .add_message::<SetResizePolicyRequest>()
            .add_message::<SetRotationSnapRequest>()
            .add_systems(Startup, load_config_system.in_set(ConfigLoaded))
            .add_systems(
                Update,
                (
                    set_resize_policy_system.run_if(on_message::<SetResizePolicyRequest>),
                    set_rotation_snap_system.run_if(on_message::<SetRotationSnapRequest>),
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                )
                    .chain(),
            );
    }
}
