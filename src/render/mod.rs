//! Presentation surface the editor paints cells and grid lines onto.

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use thiserror::Error;

use crate::canvas::PixelBuffer;
use crate::geometry::{Cell, CellPoint, Color};

pub const DEFAULT_GRID_LINE_COLOR: Color = Color::new(0xe0, 0xe0, 0xe0);

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to encode png: {0}")]
    Encode(#[from] image::ImageError),
}

pub type RenderResult<T> = std::result::Result<T, RenderError>;

/// Cell-size and line-color layout shared by every surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceLayout {
    pub grid_size: u32,
    pub pixel_size: u32,
    pub grid_line_color: Color,
}

impl SurfaceLayout {
    pub const fn new(grid_size: u32, pixel_size: u32) -> Self {
        Self {
            grid_size,
            pixel_size,
            grid_line_color: DEFAULT_GRID_LINE_COLOR,
        }
    }

    pub const fn with_grid_line_color(self, grid_line_color: Color) -> Self {
        Self {
            grid_line_color,
            ..self
        }
    }

    pub const fn extent(&self) -> u32 {
        self.grid_size.saturating_mul(self.pixel_size)
    }
}

pub trait RenderSurface {
    fn layout(&self) -> SurfaceLayout;

    /// Discards all content and re-creates the surface blank at `layout`.
    fn reset(&mut self, layout: SurfaceLayout);

    /// Fills a rectangle in surface pixels; parts outside the surface are clipped.
    fn draw_rect(&mut self, x: u32, y: u32, width: u32, height: u32, cell: Cell);

    /// Reads one surface pixel.
    fn read_pixel(&self, x: u32, y: u32) -> Option<Cell>;

    fn encode_to_image_bytes(&self) -> RenderResult<Vec<u8>>;

    fn draw_cell(&mut self, point: CellPoint, cell: Cell) {
        let (Ok(x), Ok(y)) = (u32::try_from(point.x), u32::try_from(point.y)) else {
            return;
        };
        let pixel_size = self.layout().pixel_size;
        self.draw_rect(
            x.saturating_mul(pixel_size),
            y.saturating_mul(pixel_size),
            pixel_size,
            pixel_size,
            cell,
        );
    }

    /// One-pixel lines on every cell boundary, including the outer edges.
    fn draw_grid(&mut self) {
        let layout = self.layout();
        let extent = layout.extent();
        let line = layout.grid_line_color.opaque();
        for i in 0..=layout.grid_size {
            let pos = i.saturating_mul(layout.pixel_size);
            let pos = pos.min(extent.saturating_sub(1));
            self.draw_rect(pos, 0, 1, extent, line);
            self.draw_rect(0, pos, extent, 1, line);
        }
    }

    /// Samples each cell's interior, so grid lines are never picked up.
    fn read_region(&self) -> PixelBuffer {
        let layout = self.layout();
        let offset = layout.pixel_size / 2;
        let mut buffer = PixelBuffer::new(layout.grid_size);
        for y in 0..layout.grid_size {
            for x in 0..layout.grid_size {
                let sample = self.read_pixel(
                    x * layout.pixel_size + offset,
                    y * layout.pixel_size + offset,
                );
                if let Some(cell) = sample {
                    buffer.set(CellPoint::new(x as i32, y as i32), cell);
                }
            }
        }
        buffer
    }

    /// Repaints every cell of `buffer`; grid lines must be redrawn afterwards.
    fn write_region(&mut self, buffer: &PixelBuffer) {
        for (point, cell) in buffer.iter() {
            self.draw_cell(point, cell);
        }
    }
}

/// In-memory surface backed by an RGBA raster.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    layout: SurfaceLayout,
    image: RgbaImage,
}

impl RasterSurface {
    pub fn new(layout: SurfaceLayout) -> Self {
        let extent = layout.extent();
        let image = RgbaImage::from_pixel(extent, extent, Rgba(Cell::BLANK.to_rgba()));
        Self { layout, image }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

impl RenderSurface for RasterSurface {
    fn layout(&self) -> SurfaceLayout {
        self.layout
    }

    fn reset(&mut self, layout: SurfaceLayout) {
        *self = Self::new(layout);
    }

    fn draw_rect(&mut self, x: u32, y: u32, width: u32, height: u32, cell: Cell) {
        let x_end = x.saturating_add(width).min(self.image.width());
        let y_end = y.saturating_add(height).min(self.image.height());
        let pixel = Rgba(cell.to_rgba());
        for py in y..y_end {
            for px in x..x_end {
                self.image.put_pixel(px, py, pixel);
            }
        }
    }

    fn read_pixel(&self, x: u32, y: u32) -> Option<Cell> {
        self.image
            .get_pixel_checked(x, y)
            .map(|pixel| Cell::from_rgba(pixel.0))
    }

    fn encode_to_image_bytes(&self) -> RenderResult<Vec<u8>> {
        let mut bytes = Cursor::new(Vec::new());
        self.image.write_to(&mut bytes, ImageFormat::Png)?;
        Ok(bytes.into_inner())
    }
}
