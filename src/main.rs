use std::path::PathBuf;

use bevy::ecs::message::Messages;
use bevy::prelude::*;

use geopicture::config::{ConfigPlugin, ConfigResetNotification};
use geopicture::image_input::{pick_image_files, probe_all};
use geopicture::overlay::{AddPictures, PictureOverlayPlugin, RenderOverlay};
use geopicture::paths;

/// Set up file logging for debug builds
#[cfg(debug_assertions)]
fn setup_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use std::fs::OpenOptions;
    use std::io::Write;
    use tracing_subscriber::prelude::*;

    let logs_dir = paths::logs_dir();
    if std::fs::create_dir_all(&logs_dir).is_err() {
        eprintln!("Failed to create logs directory");
        return None;
    }

    let log_file_path = logs_dir.join("geopicture.log");

    // Append session separator to existing log file
    if let Ok(mut file) = OpenOptions::new().append(true).open(&log_file_path) {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let separator = "=".repeat(80);
        let _ = writeln!(
            file,
            "\n\n{}\n=== New Session Started at {} ===\n{}\n",
            separator, timestamp, separator
        );
    }

    let file_appender = tracing_appender::rolling::never(&logs_dir, "geopicture.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // No ANSI colors in the file; stdout carries the JSON output
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(true)
        .with_level(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,geopicture=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    Some(guard)
}

#[cfg(not(debug_assertions))]
fn setup_logging() -> Option<()> {
    None
}

/// Image paths from the command line, or from the file dialog when none are given
fn image_paths() -> Vec<PathBuf> {
    let args: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    if args.is_empty() {
        pick_image_files()
    } else {
        args
    }
}

fn main() {
    // Keep the guard alive for the duration of the program
    let _log_guard = setup_logging();

    if let Err(e) = paths::ensure_directories() {
        error!("Failed to create app directories: {}", e);
    }

    let images = probe_all(&image_paths());
    if images.is_empty() {
        info!("No pictures selected");
        return;
    }

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(ConfigPlugin)
        .add_plugins(PictureOverlayPlugin);
    app.finish();
    app.cleanup();

    app.world_mut().write_message(AddPictures { images });
    app.update();

    let notification = app.world().resource::<ConfigResetNotification>();
    if notification.show
        && let Some(reason) = &notification.reason
    {
        warn!("Config: {}", reason);
    }

    let messages = app.world().resource::<Messages<RenderOverlay>>();
    let mut cursor = messages.get_cursor();
    for render in cursor.read(messages) {
        match serde_json::to_string_pretty(&render.bundle) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("Failed to serialize overlay {:?}: {}", render.entity, e),
        }
    }
}
