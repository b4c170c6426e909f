//! Editing session: tool state, gestures, undo and export over one grid.

pub mod history;
pub mod tools;

use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::canvas::{PixelBuffer, Snapshot};
use crate::geometry::{Cell, CellPoint, Color};
use crate::render::{RasterSurface, RenderError, RenderSurface, SurfaceLayout};

pub use history::{HistoryStack, DEFAULT_HISTORY_CAPACITY, MAX_HISTORY_CAPACITY};
pub use tools::{apply_tool, ToolMode, ToolOutcome};

pub const DEFAULT_GRID_SIZE: u32 = 16;
pub const DEFAULT_PIXEL_SIZE: u32 = 20;
pub const DEFAULT_MAX_GRID_SIZE: u32 = 64;
pub const GRID_SIZE_LIMIT: u32 = 256;
pub const MIN_PIXEL_SIZE: u32 = 3;
pub const MAX_PIXEL_SIZE: u32 = 64;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("invalid color {0:?}: expected #rrggbb")]
    InvalidColor(String),
    #[error("invalid grid size {size}: expected 1..={max}")]
    InvalidGridSize { size: u32, max: u32 },
    #[error(transparent)]
    Render(#[from] RenderError),
}

pub type EditorResult<T> = std::result::Result<T, EditorError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorSettings {
    pub grid_size: u32,
    pub pixel_size: u32,
    pub max_grid_size: u32,
    pub default_color: Color,
    pub grid_line_color: Color,
    pub history_capacity: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            pixel_size: DEFAULT_PIXEL_SIZE,
            max_grid_size: DEFAULT_MAX_GRID_SIZE,
            default_color: Color::BLACK,
            grid_line_color: crate::render::DEFAULT_GRID_LINE_COLOR,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl EditorSettings {
    /// Largest accepted grid size; never above [`GRID_SIZE_LIMIT`].
    pub fn grid_size_limit(&self) -> u32 {
        self.max_grid_size.min(GRID_SIZE_LIMIT)
    }

    fn validate_grid_size(&self, size: u32) -> EditorResult<u32> {
        let max = self.grid_size_limit();
        if size == 0 || size > max {
            return Err(EditorError::InvalidGridSize { size, max });
        }
        Ok(size)
    }

    fn layout(&self, grid_size: u32) -> SurfaceLayout {
        SurfaceLayout::new(grid_size, self.pixel_size.clamp(MIN_PIXEL_SIZE, MAX_PIXEL_SIZE))
            .with_grid_line_color(self.grid_line_color)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Drawing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    WithGrid,
    WithoutGrid,
}

impl ExportKind {
    pub const fn default_file_name(self) -> &'static str {
        match self {
            Self::WithGrid => "pixel-art.png",
            Self::WithoutGrid => "pixel-art-no-grid.png",
        }
    }
}

/// Commands the host issues against a session. Pointer coordinates are already
/// in cell space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorCommand {
    PointerDown(CellPoint),
    PointerMove(CellPoint),
    PointerUp,
    PointerLeave,
    SelectMode(ToolMode),
    SetColor(String),
    SetGridSize(u32),
    Clear,
    Undo,
    Export {
        kind: ExportKind,
        path: Option<PathBuf>,
    },
}

#[derive(Debug)]
pub struct EditorSession<S: RenderSurface = RasterSurface> {
    settings: EditorSettings,
    buffer: PixelBuffer,
    history: HistoryStack,
    surface: S,
    mode: ToolMode,
    color: Color,
    gesture: GestureState,
    rng: StdRng,
}

impl EditorSession<RasterSurface> {
    pub fn new(settings: EditorSettings) -> EditorResult<Self> {
        let grid_size = settings.validate_grid_size(settings.grid_size)?;
        let surface = RasterSurface::new(settings.layout(grid_size));
        Self::with_surface(settings, surface)
    }
}

impl<S: RenderSurface> EditorSession<S> {
    /// Builds a session drawing onto `surface`. A surface laid out for another
    /// grid is reset first.
    pub fn with_surface(settings: EditorSettings, mut surface: S) -> EditorResult<Self> {
        let grid_size = settings.validate_grid_size(settings.grid_size)?;
        let layout = settings.layout(grid_size);
        if surface.layout() != layout {
            surface.reset(layout);
        }
        let buffer = PixelBuffer::new(grid_size);
        let history = HistoryStack::with_capacity(buffer.snapshot(), settings.history_capacity);
        let mut session = Self {
            settings,
            buffer,
            history,
            surface,
            mode: ToolMode::Draw,
            color: settings.default_color,
            gesture: GestureState::Idle,
            rng: StdRng::from_entropy(),
        };
        session.repaint();
        tracing::debug!(grid_size, "editor session created");
        Ok(session)
    }

    /// Replaces the random source used by rainbow mode.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    pub fn grid_size(&self) -> u32 {
        self.buffer.size()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn set_mode(&mut self, selected: ToolMode) -> ToolMode {
        let next = self.mode.toggled(selected);
        tracing::debug!(from = %self.mode, selected = %selected, to = %next, "tool mode changed");
        self.mode = next;
        next
    }

    /// Sets the drawing color as the color picker does, which also returns the
    /// session to draw mode.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        self.mode = ToolMode::Draw;
    }

    pub fn set_color_hex(&mut self, value: &str) -> EditorResult<Color> {
        let Some(color) = Color::parse_hex(value) else {
            tracing::warn!(value, "rejected malformed color");
            return Err(EditorError::InvalidColor(value.to_string()));
        };
        self.set_color(color);
        Ok(color)
    }

    pub fn set_grid_size(&mut self, size: u32) -> EditorResult<()> {
        let size = self.settings.validate_grid_size(size)?;
        self.buffer = PixelBuffer::new(size);
        self.history.reset(Snapshot::blank(size));
        self.gesture = GestureState::Idle;
        self.surface.reset(self.settings.layout(size));
        self.repaint();
        tracing::info!(grid_size = size, "grid recreated");
        Ok(())
    }

    pub fn pointer_down(&mut self, point: CellPoint) {
        self.gesture = GestureState::Drawing;
        self.apply_at(point);
    }

    pub fn pointer_move(&mut self, point: CellPoint) {
        if self.gesture == GestureState::Drawing {
            self.apply_at(point);
        }
    }

    pub fn pointer_up(&mut self) {
        if self.gesture != GestureState::Drawing {
            return;
        }
        self.gesture = GestureState::Idle;
        self.history.push(self.buffer.snapshot());
        tracing::debug!(depth = self.history.len(), "gesture recorded");
    }

    /// Leaving the drawing surface ends the gesture exactly like pointer-up.
    pub fn pointer_leave(&mut self) {
        self.pointer_up();
    }

    pub fn clear(&mut self) {
        self.buffer.fill(Cell::BLANK);
        self.repaint();
        self.history.push(self.buffer.snapshot());
        tracing::info!("canvas cleared");
    }

    /// Returns `false` when only the initial snapshot is left.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.history.undo() else {
            tracing::debug!("undo stack at floor");
            return false;
        };
        self.buffer.restore(previous);
        self.repaint();
        tracing::info!(depth = self.history.len(), "undo applied");
        true
    }

    pub fn export_with_grid(&self) -> EditorResult<Vec<u8>> {
        let bytes = self.surface.encode_to_image_bytes()?;
        tracing::info!(bytes = bytes.len(), "exported image with grid");
        Ok(bytes)
    }

    pub fn export_without_grid(&self) -> EditorResult<Vec<u8>> {
        let mut plain = RasterSurface::new(self.surface.layout());
        plain.write_region(&self.buffer);
        let bytes = plain.encode_to_image_bytes()?;
        tracing::info!(bytes = bytes.len(), "exported image without grid");
        Ok(bytes)
    }

    pub fn export(&self, kind: ExportKind) -> EditorResult<Vec<u8>> {
        match kind {
            ExportKind::WithGrid => self.export_with_grid(),
            ExportKind::WithoutGrid => self.export_without_grid(),
        }
    }

    /// Runs one host command; exports return their encoded bytes.
    pub fn execute(&mut self, command: &EditorCommand) -> EditorResult<Option<Vec<u8>>> {
        match command {
            EditorCommand::PointerDown(point) => self.pointer_down(*point),
            EditorCommand::PointerMove(point) => self.pointer_move(*point),
            EditorCommand::PointerUp => self.pointer_up(),
            EditorCommand::PointerLeave => self.pointer_leave(),
            EditorCommand::SelectMode(mode) => {
                self.set_mode(*mode);
            }
            EditorCommand::SetColor(value) => {
                self.set_color_hex(value)?;
            }
            EditorCommand::SetGridSize(size) => self.set_grid_size(*size)?,
            EditorCommand::Clear => self.clear(),
            EditorCommand::Undo => {
                self.undo();
            }
            EditorCommand::Export { kind, .. } => return self.export(*kind).map(Some),
        }
        Ok(None)
    }

    fn apply_at(&mut self, point: CellPoint) {
        if !self.buffer.contains(point) {
            tracing::trace!(?point, "pointer outside grid ignored");
            return;
        }

        let outcome = apply_tool(self.mode, point, self.color, &mut self.buffer, &mut self.rng);
        match outcome {
            ToolOutcome::Painted(point) => {
                if let Some(cell) = self.buffer.get(point) {
                    self.surface.draw_cell(point, cell);
                }
                self.surface.draw_grid();
            }
            ToolOutcome::Filled { cells } => {
                tracing::debug!(?point, cells, "flood fill applied");
                self.repaint();
            }
            ToolOutcome::Picked(color) => {
                tracing::debug!(?point, color = %color, "color picked");
                self.color = color;
                self.mode = ToolMode::Draw;
            }
            ToolOutcome::Unchanged => {}
        }
    }

    fn repaint(&mut self) {
        self.surface.write_region(&self.buffer);
        self.surface.draw_grid();
    }
}
