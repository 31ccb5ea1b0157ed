use std::path::PathBuf;

use bevy::log::LogPlugin;
use bevy::prelude::*;

use save::{FileStore, LayoutStorage, StorageConfig};

mod agent_mode;
mod protocol;

/// Directory the layout file is kept in; unset means an in-memory store.
const SAVE_DIR_ENV: &str = "CITYBUILDER_SAVE_DIR";

fn main() {
    let save_dir = save_dir_from(std::env::args().skip(1), std::env::var(SAVE_DIR_ENV).ok());

    let mut app = App::new();
    // Logs go to stderr so they never mix with the JSON on stdout.
    app.add_plugins(LogPlugin::default());
    configure_app(&mut app, save_dir);

    info!(
        "citybuilder agent mode v{} ready, waiting for commands on stdin",
        protocol::PROTOCOL_VERSION
    );
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    if let Err(e) = agent_mode::run_agent_loop(&mut app, stdin.lock(), stdout.lock()) {
        error!("agent loop stopped: {e}");
    }
    info!("citybuilder shutting down");
}

/// Headless app with the session, persistence and draw-list plugins, after
/// its first frame (startup load done).
#[cfg(test)]
pub(crate) fn build_app(save_dir: Option<PathBuf>) -> App {
    let mut app = App::new();
    configure_app(&mut app, save_dir);
    app
}

fn configure_app(app: &mut App, save_dir: Option<PathBuf>) {
    app.add_plugins(MinimalPlugins);

    if let Some(dir) = save_dir {
        info!("Persisting layout under {}", dir.display());
        let config = StorageConfig::default();
        app.insert_resource(LayoutStorage::new(Box::new(FileStore::new(dir)), &config));
        app.insert_resource(config);
    }

    app.add_plugins((
        layout::LayoutPlugin,
        save::SavePlugin,
        rendering::RenderingPlugin,
    ));

    // Startup systems run here, so the stored layout is in place before the
    // first command.
    app.update();
}

/// `--save-dir <path>` wins over the environment variable.
fn save_dir_from(mut args: impl Iterator<Item = String>, env: Option<String>) -> Option<PathBuf> {
    while let Some(arg) = args.next() {
        if let Some(dir) = arg.strip_prefix("--save-dir=") {
            return Some(PathBuf::from(dir));
        }
        if arg == "--save-dir" {
            if let Some(dir) = args.next() {
                return Some(PathBuf::from(dir));
            }
            warn!("--save-dir given without a path");
        }
    }
    env.filter(|dir| !dir.is_empty()).map(PathBuf::from)
}
