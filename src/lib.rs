pub mod app;
pub mod canvas;
mod config;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod render;
pub mod storage;

use std::io::Read;
use std::path::PathBuf;

pub use app::{App, RunReport};
pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Where the host reads its commands and configuration from.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Command script; stdin when `None`.
    pub script: Option<PathBuf>,
    /// Explicit `config.json`; the XDG location when `None`.
    pub config: Option<PathBuf>,
    pub output_dir: PathBuf,
}

/// Entrypoint used by the binary and other host integrations.
pub fn run(options: RunOptions) -> AppResult<RunReport> {
    logging::init();
    tracing::info!("starting pixgrid");

    let config = match &options.config {
        Some(path) => config::load_app_config_from(path),
        None => config::load_app_config(),
    };
    let settings = config.editor_settings();
    tracing::debug!(?settings, "editor settings resolved");

    let source = read_script(options.script.as_ref())?;
    let commands = input::parse_script(&source)?;

    let mut app = App::new(settings, storage::ExportStorage::new(options.output_dir))?;
    app.run_script(commands)
}

fn read_script(path: Option<&PathBuf>) -> AppResult<String> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|source| AppError::ReadScript {
            origin: path.display().to_string(),
            source,
        }),
        None => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .map_err(|source| AppError::ReadScript {
                    origin: "<stdin>".to_string(),
                    source,
                })?;
            Ok(source)
        }
    }
}
