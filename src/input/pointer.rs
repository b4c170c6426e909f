use crate::editor::EditorCommand;
use crate::geometry::CellPoint;

/// Pointer position in surface pixels, relative to the surface origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_cell(self, pixel_size: u32) -> CellPoint {
        let size = f64::from(pixel_size.max(1));
        CellPoint::new(floor_to_i32(self.x / size), floor_to_i32(self.y / size))
    }
}

fn floor_to_i32(value: f64) -> i32 {
    if value.is_nan() {
        return i32::MIN;
    }
    value.floor().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(ScreenPoint),
    Move(ScreenPoint),
    Up,
    Leave,
}

impl PointerEvent {
    pub fn to_command(self, pixel_size: u32) -> EditorCommand {
        match self {
            Self::Down(point) => EditorCommand::PointerDown(point.to_cell(pixel_size)),
            Self::Move(point) => EditorCommand::PointerMove(point.to_cell(pixel_size)),
            Self::Up => EditorCommand::PointerUp,
            Self::Leave => EditorCommand::PointerLeave,
        }
    }
}
