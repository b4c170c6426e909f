mod fill;
mod tone;

use rand::Rng;

use crate::canvas::PixelBuffer;
pub use crate::geometry::{Cell, CellPoint, Color};
pub use fill::flood_fill;
pub use tone::{lighten, shade, TONE_STEP};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolMode {
    #[default]
    Draw,
    Rainbow,
    Eyedropper,
    Fill,
    Shade,
    Lighten,
}

impl ToolMode {
    pub const ALL: [ToolMode; 6] = [
        Self::Draw,
        Self::Rainbow,
        Self::Eyedropper,
        Self::Fill,
        Self::Shade,
        Self::Lighten,
    ];

    /// Mode after the user selects `selected` while `self` is active.
    /// Selecting the active mode again falls back to [`ToolMode::Draw`].
    pub const fn toggled(self, selected: ToolMode) -> ToolMode {
        if self as u8 == selected as u8 {
            Self::Draw
        } else {
            selected
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Draw => "draw",
            Self::Rainbow => "rainbow",
            Self::Eyedropper => "eyedropper",
            Self::Fill => "fill",
            Self::Shade => "shade",
            Self::Lighten => "lighten",
        }
    }

    pub fn from_label(label: &str) -> Option<ToolMode> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.label().eq_ignore_ascii_case(label.trim()))
    }
}

impl std::fmt::Display for ToolMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// What a single tool application did to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolOutcome {
    Unchanged,
    Painted(CellPoint),
    Filled { cells: usize },
    Picked(Color),
}

impl ToolOutcome {
    pub const fn changed_buffer(self) -> bool {
        matches!(self, Self::Painted(_) | Self::Filled { .. })
    }
}

pub fn random_color<R: Rng>(rng: &mut R) -> Color {
    Color::new(rng.gen(), rng.gen(), rng.gen())
}

/// Applies `mode` at `point`. Points outside the grid are rejected before any
/// tool runs.
pub fn apply_tool<R: Rng>(
    mode: ToolMode,
    point: CellPoint,
    color: Color,
    buffer: &mut PixelBuffer,
    rng: &mut R,
) -> ToolOutcome {
    let Some(current) = buffer.get(point) else {
        return ToolOutcome::Unchanged;
    };

    match mode {
        ToolMode::Draw => paint(buffer, point, color.opaque()),
        ToolMode::Rainbow => paint(buffer, point, random_color(rng).opaque()),
        ToolMode::Eyedropper => ToolOutcome::Picked(current.color()),
        ToolMode::Fill => match flood_fill(buffer, point, color.opaque()) {
            0 => ToolOutcome::Unchanged,
            cells => ToolOutcome::Filled { cells },
        },
        ToolMode::Shade => paint(buffer, point, shade(current)),
        ToolMode::Lighten => paint(buffer, point, lighten(current)),
    }
}

fn paint(buffer: &mut PixelBuffer, point: CellPoint, cell: Cell) -> ToolOutcome {
    if buffer.set(point, cell) {
        ToolOutcome::Painted(point)
    } else {
        ToolOutcome::Unchanged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const RED: Color = Color::new(255, 0, 0);

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn selecting_active_mode_reverts_to_draw() {
        for mode in ToolMode::ALL {
            assert_eq!(mode.toggled(mode), ToolMode::Draw, "{mode:?} should toggle off");
        }
        assert_eq!(ToolMode::Draw.toggled(ToolMode::Fill), ToolMode::Fill);
        assert_eq!(ToolMode::Fill.toggled(ToolMode::Shade), ToolMode::Shade);
    }

    #[test]
    fn labels_round_trip() {
        for mode in ToolMode::ALL {
            assert_eq!(ToolMode::from_label(mode.label()), Some(mode));
        }
        assert_eq!(ToolMode::from_label(" FILL "), Some(ToolMode::Fill));
        assert_eq!(ToolMode::from_label("shader"), None);
    }

    #[test]
    fn draw_writes_current_color_opaque() {
        let mut buffer = PixelBuffer::new(4);
        let point = CellPoint::new(2, 3);
        let outcome = apply_tool(ToolMode::Draw, point, RED, &mut buffer, &mut rng());
        assert_eq!(outcome, ToolOutcome::Painted(point));
        assert_eq!(buffer.get(point), Some(Cell::new(255, 0, 0, 255)));
    }

    #[test]
    fn every_mode_ignores_out_of_bounds_points() {
        for mode in ToolMode::ALL {
            let mut buffer = PixelBuffer::new(4);
            let before = buffer.clone();
            for point in [CellPoint::new(-1, 0), CellPoint::new(4, 4)] {
                let outcome = apply_tool(mode, point, RED, &mut buffer, &mut rng());
                assert_eq!(outcome, ToolOutcome::Unchanged, "{mode:?} at {point:?}");
            }
            assert_eq!(buffer, before, "{mode:?} must not touch the buffer");
        }
    }

    #[test]
    fn rainbow_is_deterministic_for_a_seeded_source() {
        let point = CellPoint::new(1, 1);
        let mut first = PixelBuffer::new(2);
        let mut second = PixelBuffer::new(2);
        apply_tool(ToolMode::Rainbow, point, RED, &mut first, &mut rng());
        apply_tool(ToolMode::Rainbow, point, RED, &mut second, &mut rng());

        let expected = random_color(&mut rng()).opaque();
        assert_eq!(first.get(point), Some(expected));
        assert_eq!(first, second);
    }

    #[test]
    fn eyedropper_reports_cell_color_without_writing() {
        let mut buffer = PixelBuffer::new(2);
        let point = CellPoint::new(0, 1);
        buffer.set(point, Cell::new(9, 8, 7, 255));
        let before = buffer.clone();

        let outcome = apply_tool(ToolMode::Eyedropper, point, RED, &mut buffer, &mut rng());

        assert_eq!(outcome, ToolOutcome::Picked(Color::new(9, 8, 7)));
        assert_eq!(buffer, before);
    }

    #[test]
    fn fill_reports_painted_cell_count() {
        let mut buffer = PixelBuffer::new(3);
        let outcome = apply_tool(ToolMode::Fill, CellPoint::new(0, 0), RED, &mut buffer, &mut rng());
        assert_eq!(outcome, ToolOutcome::Filled { cells: 9 });

        let again = apply_tool(ToolMode::Fill, CellPoint::new(0, 0), RED, &mut buffer, &mut rng());
        assert_eq!(again, ToolOutcome::Unchanged);
    }

    #[test]
    fn shade_and_lighten_adjust_existing_cell() {
        let mut buffer = PixelBuffer::new(2);
        let point = CellPoint::new(0, 0);
        buffer.set(point, Cell::new(100, 100, 100, 255));

        apply_tool(ToolMode::Shade, point, RED, &mut buffer, &mut rng());
        assert_eq!(buffer.get(point), Some(Cell::new(75, 75, 75, 255)));

        apply_tool(ToolMode::Lighten, point, RED, &mut buffer, &mut rng());
        assert_eq!(buffer.get(point), Some(Cell::new(100, 100, 100, 255)));
    }

    #[test]
    fn only_painting_outcomes_change_the_buffer() {
        assert!(ToolOutcome::Painted(CellPoint::new(0, 0)).changed_buffer());
        assert!(ToolOutcome::Filled { cells: 1 }.changed_buffer());
        assert!(!ToolOutcome::Picked(RED).changed_buffer());
        assert!(!ToolOutcome::Unchanged.changed_buffer());
    }
}
