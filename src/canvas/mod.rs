//! Square cell grid backing the editor.

use crate::geometry::{Cell, CellPoint};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    size: u32,
    cells: Vec<Cell>,
}

/// Immutable full copy of a [`PixelBuffer`] taken for undo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot(PixelBuffer);

impl PixelBuffer {
    pub fn new(size: u32) -> Self {
        Self::filled(size, Cell::BLANK)
    }

    pub fn filled(size: u32, cell: Cell) -> Self {
        let len = (size as usize).saturating_mul(size as usize);
        Self {
            size,
            cells: vec![cell.with_opaque_alpha(); len],
        }
    }

    pub const fn size(&self) -> u32 {
        self.size
    }

    pub fn contains(&self, point: CellPoint) -> bool {
        self.index_of(point).is_some()
    }

    fn index_of(&self, point: CellPoint) -> Option<usize> {
        let x = u32::try_from(point.x).ok()?;
        let y = u32::try_from(point.y).ok()?;
        if x >= self.size || y >= self.size {
            return None;
        }
        Some(y as usize * self.size as usize + x as usize)
    }

    pub fn get(&self, point: CellPoint) -> Option<Cell> {
        self.index_of(point).map(|index| self.cells[index])
    }

    /// Writes an opaque cell; returns `false` when `point` lies outside the grid.
    pub fn set(&mut self, point: CellPoint, cell: Cell) -> bool {
        match self.index_of(point) {
            Some(index) => {
                self.cells[index] = cell.with_opaque_alpha();
                true
            }
            None => false,
        }
    }

    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell.with_opaque_alpha());
    }

    /// Cells in row-major order with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (CellPoint, Cell)> + '_ {
        let size = self.size as usize;
        self.cells.iter().enumerate().map(move |(index, cell)| {
            let x = (index % size) as i32;
            let y = (index / size) as i32;
            (CellPoint::new(x, y), *cell)
        })
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot(self.clone())
    }

    pub fn restore(&mut self, snapshot: &Snapshot) {
        self.clone_from(&snapshot.0);
    }
}

impl Snapshot {
    pub fn blank(size: u32) -> Self {
        Self(PixelBuffer::new(size))
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.0
    }
}
