//! Host adapter: feeds script commands into an editor session and writes
//! exports to disk.

use std::path::PathBuf;

use crate::editor::{EditorCommand, EditorError, EditorSession, EditorSettings};
use crate::error::AppResult;
use crate::input::ScriptCommand;
use crate::render::RenderSurface;
use crate::storage::ExportStorage;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub commands: usize,
    pub rejected: usize,
    pub exports: Vec<PathBuf>,
}

#[derive(Debug)]
pub struct App {
    session: EditorSession,
    storage: ExportStorage,
}

impl App {
    pub fn new(settings: EditorSettings, storage: ExportStorage) -> AppResult<Self> {
        let session = EditorSession::new(settings)?;
        Ok(Self { session, storage })
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    /// Runs commands in order. Rejected colors and grid sizes are logged and
    /// skipped; encoding and write failures abort the run.
    pub fn run_script(
        &mut self,
        commands: impl IntoIterator<Item = ScriptCommand>,
    ) -> AppResult<RunReport> {
        tracing::debug!(output_dir = %self.storage.output_dir().display(), "running script");
        let mut report = RunReport::default();
        for command in commands {
            let pixel_size = self.session.surface().layout().pixel_size;
            let command = command.into_editor_command(pixel_size);
            report.commands += 1;

            match self.session.execute(&command) {
                Ok(Some(bytes)) => {
                    if let EditorCommand::Export { kind, path } = &command {
                        let target = self.storage.save_export(*kind, path.as_deref(), &bytes)?;
                        report.exports.push(target);
                    }
                }
                Ok(None) => {}
                Err(err @ EditorError::Render(_)) => return Err(err.into()),
                Err(err) => {
                    tracing::warn!(%err, ?command, "command rejected");
                    report.rejected += 1;
                }
            }
        }

        tracing::info!(
            commands = report.commands,
            rejected = report.rejected,
            exports = report.exports.len(),
            "script finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Cell, CellPoint, Color};
    use crate::input::parse_script;

    fn app(output_dir: PathBuf) -> App {
        let settings = EditorSettings {
            grid_size: 4,
            pixel_size: 10,
            ..EditorSettings::default()
        };
        App::new(settings, ExportStorage::new(output_dir)).expect("app should build")
    }

    #[test]
    fn script_draws_in_cell_space_and_skips_rejected_commands() {
        let mut app = app(std::env::temp_dir());
        let commands = parse_script(
            "color #ff0000\n\
             down 5 5\n\
             move 15 5\n\
             move 99 99\n\
             up\n\
             color #nothex\n\
             grid 0\n",
        )
        .expect("script should parse");

        let report = app.run_script(commands).expect("script should run");

        assert_eq!(report.commands, 7);
        assert_eq!(report.rejected, 2);
        let buffer = app.session().buffer();
        let red = Color::new(255, 0, 0).opaque();
        assert_eq!(buffer.get(CellPoint::new(0, 0)), Some(red));
        assert_eq!(buffer.get(CellPoint::new(1, 0)), Some(red));
        assert_eq!(buffer.get(CellPoint::new(3, 3)), Some(Cell::BLANK));
        assert_eq!(app.session().color(), Color::new(255, 0, 0));
        assert_eq!(app.session().grid_size(), 4);
    }

    #[test]
    fn exports_are_written_to_output_dir() {
        let root = std::env::temp_dir().join(format!("pixgrid-app-{}", std::process::id()));
        let mut app = app(root.clone());
        let commands =
            parse_script("down 0 0\nup\nexport grid\nexport plain plain/art.png\n")
                .expect("script should parse");

        let report = app.run_script(commands).expect("script should run");

        assert_eq!(
            report.exports,
            vec![root.join("pixel-art.png"), root.join("plain/art.png")]
        );
        for path in &report.exports {
            let bytes = std::fs::read(path).expect("export should exist");
            assert_eq!(&bytes[..4], b"\x89PNG");
        }

        std::fs::remove_dir_all(&root).expect("scratch dir should be removable");
    }
}
