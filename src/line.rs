//! Line extraction: turns a direction into an ordered walk over one row or column.
//!
//! Position 0 of an extracted line is always the slot tiles travel toward, so the
//! collapser never needs to know which direction it is serving.

use crate::board::{BOARD_SIZE, Board, CellRef};
use crate::direction::Direction;

/// One cell of an extracted line: where it sits on the board and what it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCell {
    pub cell: CellRef,
    pub value: u32,
}

/// Coordinate of the `step`-th slot of line `index` when travelling in `direction`.
fn slot(direction: Direction, index: usize, step: usize) -> CellRef {
    let back = BOARD_SIZE - 1 - step;
    match direction {
        Direction::Left => CellRef::new(index, step),
        Direction::Right => CellRef::new(index, back),
        Direction::Up => CellRef::new(step, index),
        Direction::Down => CellRef::new(back, index),
    }
}

/// Extract line `index` (a row for left/right, a column for up/down), destination-first.
pub fn extract_line(board: &Board, direction: Direction, index: usize) -> [LineCell; BOARD_SIZE] {
    debug_assert!(index < BOARD_SIZE);
    std::array::from_fn(|step| {
        let cell = slot(direction, index, step);
        LineCell {
            cell,
            value: board.get(cell),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Board {
        Board::from_rows([
            [1, 2, 3, 4],
            [5, 6, 7, 8],
            [9, 10, 11, 12],
            [13, 14, 15, 16],
        ])
    }

    fn values(line: &[LineCell; BOARD_SIZE]) -> Vec<u32> {
        line.iter().map(|c| c.value).collect()
    }

    #[test]
    fn left_walks_row_ascending() {
        let line = extract_line(&sample(), Direction::Left, 1);
        assert_eq!(values(&line), vec![5, 6, 7, 8]);
        assert_eq!(line[0].cell, CellRef::new(1, 0));
    }

    #[test]
    fn right_walks_row_descending() {
        let line = extract_line(&sample(), Direction::Right, 2);
        assert_eq!(values(&line), vec![12, 11, 10, 9]);
        assert_eq!(line[0].cell, CellRef::new(2, 3));
    }

    #[test]
    fn up_walks_column_ascending() {
        let line = extract_line(&sample(), Direction::Up, 0);
        assert_eq!(values(&line), vec![1, 5, 9, 13]);
    }

    #[test]
    fn down_walks_column_descending() {
        let line = extract_line(&sample(), Direction::Down, 3);
        assert_eq!(values(&line), vec![16, 12, 8, 4]);
        assert_eq!(line[0].cell, CellRef::new(3, 3));
    }
}
