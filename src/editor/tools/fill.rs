use crate::canvas::PixelBuffer;
use crate::geometry::{Cell, CellPoint};

/// Repaints the 4-connected region of the seed's color and returns how many
/// cells changed. A seed outside the grid, or one already holding `fill`, is a
/// no-op.
pub fn flood_fill(buffer: &mut PixelBuffer, seed: CellPoint, fill: Cell) -> usize {
    let fill = fill.with_opaque_alpha();
    let Some(target) = buffer.get(seed) else {
        return 0;
    };
    if target == fill {
        return 0;
    }

    let mut painted = 0;
    let mut stack = vec![seed];
    while let Some(point) = stack.pop() {
        if buffer.get(point) != Some(target) {
            continue;
        }

        buffer.set(point, fill);
        painted += 1;

        stack.extend(
            point
                .neighbors()
                .into_iter()
                .filter(|neighbor| buffer.contains(*neighbor)),
        );
    }

    painted
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Cell = Cell::new(255, 0, 0, 255);
    const BLUE: Cell = Cell::new(0, 0, 255, 255);

    fn count(buffer: &PixelBuffer, cell: Cell) -> usize {
        buffer.iter().filter(|(_, value)| *value == cell).count()
    }

    #[test]
    fn fills_whole_blank_grid() {
        let mut buffer = PixelBuffer::new(4);
        let painted = flood_fill(&mut buffer, CellPoint::new(0, 0), RED);
        assert_eq!(painted, 16);
        assert_eq!(count(&buffer, RED), 16);
    }

    #[test]
    fn full_row_barrier_confines_fill() {
        let mut buffer = PixelBuffer::new(4);
        for x in 0..4 {
            buffer.set(CellPoint::new(x, 2), BLUE);
        }

        flood_fill(&mut buffer, CellPoint::new(0, 0), RED);

        for (point, cell) in buffer.iter() {
            let expected = match point.y {
                0 | 1 => RED,
                2 => BLUE,
                _ => Cell::BLANK,
            };
            assert_eq!(cell, expected, "unexpected cell at {point:?}");
        }
    }

    #[test]
    fn diagonal_cells_are_not_connected() {
        let mut buffer = PixelBuffer::new(3);
        // Blue plus-shape isolates the corners from the center.
        for point in [
            CellPoint::new(1, 0),
            CellPoint::new(0, 1),
            CellPoint::new(2, 1),
            CellPoint::new(1, 2),
        ] {
            buffer.set(point, BLUE);
        }

        let painted = flood_fill(&mut buffer, CellPoint::new(1, 1), RED);

        assert_eq!(painted, 1);
        assert_eq!(buffer.get(CellPoint::new(0, 0)), Some(Cell::BLANK));
        assert_eq!(buffer.get(CellPoint::new(1, 1)), Some(RED));
    }

    #[test]
    fn filling_with_target_color_is_a_no_op() {
        let mut buffer = PixelBuffer::new(4);
        buffer.set(CellPoint::new(2, 2), RED);
        let before = buffer.clone();

        let painted = flood_fill(&mut buffer, CellPoint::new(0, 0), Cell::BLANK);

        assert_eq!(painted, 0);
        assert_eq!(buffer, before);
    }

    #[test]
    fn seed_outside_grid_changes_nothing() {
        let mut buffer = PixelBuffer::new(4);
        let before = buffer.clone();
        assert_eq!(flood_fill(&mut buffer, CellPoint::new(4, 0), RED), 0);
        assert_eq!(flood_fill(&mut buffer, CellPoint::new(-1, 2), RED), 0);
        assert_eq!(buffer, before);
    }

    #[test]
    fn fill_alpha_is_forced_opaque() {
        let mut buffer = PixelBuffer::new(2);
        flood_fill(&mut buffer, CellPoint::new(0, 0), Cell::new(1, 2, 3, 7));
        assert_eq!(count(&buffer, Cell::new(1, 2, 3, 255)), 4);
    }
}
