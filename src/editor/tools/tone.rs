use crate::geometry::Cell;

/// Per-channel step used by the shade and lighten tools.
pub const TONE_STEP: u8 = 25;

pub const fn shade(cell: Cell) -> Cell {
    Cell::new(
        cell.r.saturating_sub(TONE_STEP),
        cell.g.saturating_sub(TONE_STEP),
        cell.b.saturating_sub(TONE_STEP),
        255,
    )
}

pub const fn lighten(cell: Cell) -> Cell {
    Cell::new(
        cell.r.saturating_add(TONE_STEP),
        cell.g.saturating_add(TONE_STEP),
        cell.b.saturating_add(TONE_STEP),
        255,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shade_clamps_at_zero() {
        assert_eq!(shade(Cell::new(100, 10, 0, 255)), Cell::new(75, 0, 0, 255));
    }

    #[test]
    fn lighten_clamps_at_full_intensity() {
        assert_eq!(
            lighten(Cell::new(100, 240, 255, 255)),
            Cell::new(125, 255, 255, 255)
        );
    }

    #[test]
    fn shade_then_lighten_round_trips_away_from_bounds() {
        let cell = Cell::new(120, 60, 200, 255);
        assert_eq!(lighten(shade(cell)), cell);
        assert_eq!(shade(lighten(cell)), cell);
    }

    #[test]
    fn shade_then_lighten_stays_clamped_near_bounds() {
        let dark = Cell::new(10, 0, 24, 255);
        assert_eq!(lighten(shade(dark)), Cell::new(25, 25, 25, 255));

        let bright = Cell::new(240, 255, 231, 255);
        assert_eq!(shade(lighten(bright)), Cell::new(230, 230, 230, 255));
    }

    #[test]
    fn tone_writes_are_opaque() {
        assert_eq!(shade(Cell::new(50, 50, 50, 0)).a, 255);
        assert_eq!(lighten(Cell::new(50, 50, 50, 0)).a, 255);
    }
}
