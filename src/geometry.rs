/// Shared cell coordinates and color primitives used by the canvas and editor.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPoint {
    pub x: i32,
    pub y: i32,
}

impl CellPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn neighbors(self) -> [CellPoint; 4] {
        [
            CellPoint::new(self.x + 1, self.y),
            CellPoint::new(self.x - 1, self.y),
            CellPoint::new(self.x, self.y + 1),
            CellPoint::new(self.x, self.y - 1),
        ]
    }
}

/// RGB color as chosen by the user, the eyedropper or rainbow mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn rgb(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    pub const fn opaque(self) -> Cell {
        Cell::new(self.r, self.g, self.b, 255)
    }

    /// Accepts `#rrggbb` or `rrggbb`, case-insensitive.
    pub fn parse_hex(value: &str) -> Option<Color> {
        let hex = value.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let red = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let green = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let blue = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Color::new(red, green, blue))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// One stored grid cell. Alpha is kept for the raster but every write is opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Cell {
    pub const BLANK: Cell = Color::WHITE.opaque();

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn color(self) -> Color {
        Color::new(self.r, self.g, self.b)
    }

    pub const fn with_opaque_alpha(self) -> Self {
        Self { a: 255, ..self }
    }

    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub const fn from_rgba(rgba: [u8; 4]) -> Self {
        Self::new(rgba[0], rgba[1], rgba[2], rgba[3])
    }
}

impl From<Color> for Cell {
    fn from(color: Color) -> Self {
        color.opaque()
    }
}
