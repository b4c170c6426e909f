use crate::editor::{EditorCommand, ExportKind, ToolMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutKey {
    Character(char),
    Delete,
    Backspace,
    Escape,
}

/// Modifier keys held during a key press. Alt and super are never bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShortcutModifiers {
    pub ctrl: bool,
    pub shift: bool,
}

impl ShortcutModifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
    };
    pub const CTRL: Self = Self {
        ctrl: true,
        shift: false,
    };
    pub const CTRL_SHIFT: Self = Self {
        ctrl: true,
        shift: true,
    };
}

fn resolve_tool_shortcut(key: ShortcutKey) -> Option<ToolMode> {
    match key {
        ShortcutKey::Character('d') => Some(ToolMode::Draw),
        ShortcutKey::Character('r') => Some(ToolMode::Rainbow),
        ShortcutKey::Character('i') => Some(ToolMode::Eyedropper),
        ShortcutKey::Character('f') => Some(ToolMode::Fill),
        ShortcutKey::Character('s') => Some(ToolMode::Shade),
        ShortcutKey::Character('l') => Some(ToolMode::Lighten),
        _ => None,
    }
}

fn export(kind: ExportKind) -> EditorCommand {
    EditorCommand::Export { kind, path: None }
}

/// Maps a key press to an editor command. Letter keys are matched
/// case-insensitively.
pub fn resolve_shortcut(key: ShortcutKey, modifiers: ShortcutModifiers) -> Option<EditorCommand> {
    let key = match key {
        ShortcutKey::Character(c) => ShortcutKey::Character(c.to_ascii_lowercase()),
        other => other,
    };

    match (key, modifiers) {
        (ShortcutKey::Character('z'), ShortcutModifiers::CTRL) => Some(EditorCommand::Undo),
        (ShortcutKey::Character('s'), ShortcutModifiers::CTRL) => {
            Some(export(ExportKind::WithGrid))
        }
        (ShortcutKey::Character('s'), ShortcutModifiers::CTRL_SHIFT) => {
            Some(export(ExportKind::WithoutGrid))
        }
        (ShortcutKey::Delete | ShortcutKey::Backspace, ShortcutModifiers::NONE) => {
            Some(EditorCommand::Clear)
        }
        (ShortcutKey::Escape, ShortcutModifiers::NONE) => Some(EditorCommand::PointerLeave),
        (_, ShortcutModifiers::NONE) => resolve_tool_shortcut(key).map(EditorCommand::SelectMode),
        _ => None,
    }
}
