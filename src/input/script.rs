use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use super::pointer::{PointerEvent, ScreenPoint};
use crate::editor::{EditorCommand, ExportKind, ToolMode};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("unknown command {0:?}")]
    UnknownCommand(String),
    #[error("{command}: expected {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("{command}: invalid argument {value:?}")]
    InvalidArgument { command: &'static str, value: String },
    #[error("{command}: unexpected trailing input {rest:?}")]
    TrailingInput { command: &'static str, rest: String },
    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<ScriptError>,
    },
}

pub type ScriptResult<T> = std::result::Result<T, ScriptError>;

/// One host-script instruction. Pointer positions are still in surface pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    Pointer(PointerEvent),
    Editor(EditorCommand),
}

impl ScriptCommand {
    pub fn into_editor_command(self, pixel_size: u32) -> EditorCommand {
        match self {
            Self::Pointer(event) => event.to_command(pixel_size),
            Self::Editor(command) => command,
        }
    }
}

struct Args<'a> {
    command: &'static str,
    words: std::str::SplitWhitespace<'a>,
}

impl<'a> Args<'a> {
    fn next(&mut self, expected: &'static str) -> ScriptResult<&'a str> {
        self.words.next().ok_or(ScriptError::MissingArgument {
            command: self.command,
            expected,
        })
    }

    fn parse<T: FromStr>(&mut self, expected: &'static str) -> ScriptResult<T> {
        let value = self.next(expected)?;
        value.parse().map_err(|_| ScriptError::InvalidArgument {
            command: self.command,
            value: value.to_string(),
        })
    }

    fn point(&mut self) -> ScriptResult<ScreenPoint> {
        let x = self.parse("x y")?;
        let y = self.parse("x y")?;
        Ok(ScreenPoint::new(x, y))
    }

    fn finish<T>(mut self, value: T) -> ScriptResult<T> {
        let rest: Vec<&str> = self.words.by_ref().collect();
        if rest.is_empty() {
            Ok(value)
        } else {
            Err(ScriptError::TrailingInput {
                command: self.command,
                rest: rest.join(" "),
            })
        }
    }
}

fn args<'a>(command: &'static str, words: std::str::SplitWhitespace<'a>) -> Args<'a> {
    Args { command, words }
}

impl FromStr for ScriptCommand {
    type Err = ScriptError;

    fn from_str(line: &str) -> ScriptResult<Self> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(ScriptError::UnknownCommand(String::new()));
        };

        match head.to_ascii_lowercase().as_str() {
            "down" => {
                let mut args = args("down", words);
                let point = args.point()?;
                args.finish(Self::Pointer(PointerEvent::Down(point)))
            }
            "move" => {
                let mut args = args("move", words);
                let point = args.point()?;
                args.finish(Self::Pointer(PointerEvent::Move(point)))
            }
            "up" => args("up", words).finish(Self::Pointer(PointerEvent::Up)),
            "leave" => args("leave", words).finish(Self::Pointer(PointerEvent::Leave)),
            "mode" => {
                let mut args = args("mode", words);
                let label = args.next("tool mode")?;
                let mode = ToolMode::from_label(label).ok_or_else(|| {
                    ScriptError::InvalidArgument {
                        command: "mode",
                        value: label.to_string(),
                    }
                })?;
                args.finish(Self::Editor(EditorCommand::SelectMode(mode)))
            }
            "color" => {
                let mut args = args("color", words);
                let value = args.next("#rrggbb")?;
                args.finish(Self::Editor(EditorCommand::SetColor(value.to_string())))
            }
            "grid" => {
                let mut args = args("grid", words);
                let size = args.parse("grid size")?;
                args.finish(Self::Editor(EditorCommand::SetGridSize(size)))
            }
            "clear" => args("clear", words).finish(Self::Editor(EditorCommand::Clear)),
            "undo" => args("undo", words).finish(Self::Editor(EditorCommand::Undo)),
            "export" => {
                let mut args = args("export", words);
                let kind = match args.next("grid|plain")? {
                    "grid" => ExportKind::WithGrid,
                    "plain" => ExportKind::WithoutGrid,
                    other => {
                        return Err(ScriptError::InvalidArgument {
                            command: "export",
                            value: other.to_string(),
                        })
                    }
                };
                let path = args.words.next().map(PathBuf::from);
                args.finish(Self::Editor(EditorCommand::Export { kind, path }))
            }
            _ => Err(ScriptError::UnknownCommand(head.to_string())),
        }
    }
}

/// Parses a whole script. Blank lines and `#` comments are skipped.
pub fn parse_script(source: &str) -> ScriptResult<Vec<ScriptCommand>> {
    source
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let line = strip_comment(line).trim();
            (!line.is_empty()).then_some((index + 1, line))
        })
        .map(|(line_number, line)| {
            line.parse().map_err(|err| ScriptError::AtLine {
                line: line_number,
                source: Box::new(err),
            })
        })
        .collect()
}

/// A `#` opens a comment at the start of a line, or when it stands alone as a
/// word, so `color #ff0000` keeps its argument.
fn strip_comment(line: &str) -> &str {
    if line.trim_start().starts_with('#') {
        return "";
    }
    let bytes = line.as_bytes();
    for (index, byte) in bytes.iter().enumerate() {
        let standalone = *byte == b'#'
            && index > 0
            && bytes[index - 1].is_ascii_whitespace()
            && bytes.get(index + 1).map_or(true, u8::is_ascii_whitespace);
        if standalone {
            return &line[..index];
        }
    }
    line
}
