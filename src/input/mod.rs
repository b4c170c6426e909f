mod pointer;
mod script;
mod shortcut;

pub use pointer::{PointerEvent, ScreenPoint};
pub use script::{parse_script, ScriptCommand, ScriptError, ScriptResult};
pub use shortcut::{resolve_shortcut, ShortcutKey, ShortcutModifiers};
