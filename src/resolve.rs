//! Move resolution: apply one direction to a board without touching it.

use crate::board::{BOARD_SIZE, Board, CellRef};
use crate::collapse::{Provenance, collapse};
use crate::direction::Direction;
use crate::line::extract_line;
use tracing::instrument;

/// A tile that slid to a new cell without merging. `from != to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileMove {
    pub from: CellRef,
    pub to: CellRef,
    pub value: u32,
}

/// Two equal tiles combined into `to`; `value` is the doubled result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileMerge {
    pub from1: CellRef,
    pub from2: CellRef,
    pub to: CellRef,
    pub value: u32,
}

/// Everything a host needs to present and commit one move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    /// Board after sliding and merging, before any spawn.
    pub board: Board,
    /// Whether any cell value differs from the input board.
    pub moved: bool,
    pub score_delta: u32,
    /// Lines 0..4 in order, destination-first within each line.
    pub moves: Vec<TileMove>,
    /// Same ordering as `moves`.
    pub merges: Vec<TileMerge>,
}

/// Resolve `direction` against `board`. Pure: the same input always yields the same result.
#[instrument(level = "trace", skip(board))]
pub fn resolve(board: &Board, direction: Direction) -> MoveResult {
    let mut result = MoveResult {
        board: Board::empty(),
        moved: false,
        score_delta: 0,
        moves: Vec::new(),
        merges: Vec::new(),
    };

    for index in 0..BOARD_SIZE {
        let line = extract_line(board, direction, index);
        let collapsed = collapse(&line);
        result.score_delta = result.score_delta.saturating_add(collapsed.score_delta);

        for (slot, dest) in line.iter().enumerate() {
            let placement = collapsed.placed.get(slot);
            let value = placement.map_or(0, |p| p.value);
            result.board.set(dest.cell, value);
            if board.get(dest.cell) != value {
                result.moved = true;
            }

            match placement.map(|p| p.provenance) {
                Some(Provenance::Slide(from)) if from != dest.cell => {
                    result.moves.push(TileMove {
                        from,
                        to: dest.cell,
                        value,
                    });
                }
                Some(Provenance::Merge(from1, from2)) => {
                    result.merges.push(TileMerge {
                        from1,
                        from2,
                        to: dest.cell,
                        value,
                    });
                }
                _ => {}
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_row(row: [u32; 4]) -> Board {
        Board::from_rows([row, [0; 4], [0; 4], [0; 4]])
    }

    #[test]
    fn merge_then_slide_left() {
        let board = with_row([2, 2, 4, 0]);
        let r = resolve(&board, Direction::Left);
        assert_eq!(r.board.rows()[0], [4, 4, 0, 0]);
        assert!(r.moved);
        assert_eq!(r.score_delta, 4);
        assert_eq!(
            r.merges,
            vec![TileMerge {
                from1: CellRef::new(0, 0),
                from2: CellRef::new(0, 1),
                to: CellRef::new(0, 0),
                value: 4,
            }]
        );
        assert_eq!(
            r.moves,
            vec![TileMove {
                from: CellRef::new(0, 2),
                to: CellRef::new(0, 1),
                value: 4,
            }]
        );
    }

    #[test]
    fn single_tile_slides_to_edge() {
        let board = with_row([0, 0, 0, 2]);
        let r = resolve(&board, Direction::Left);
        assert_eq!(r.board.rows()[0], [2, 0, 0, 0]);
        assert_eq!(r.score_delta, 0);
        assert_eq!(r.moves.len(), 1);
        assert!(r.merges.is_empty());
    }

    #[test]
    fn overflowing_pair_stays_apart() {
        let top = 1 << 31;
        let r = resolve(&with_row([top, top, 0, 0]), Direction::Left);
        assert!(!r.moved);
        assert!(r.merges.is_empty());
        let r = resolve(&with_row([top, top, 0, 0]), Direction::Right);
        assert_eq!(r.board.rows()[0], [0, 0, top, top]);
        assert_eq!(r.score_delta, 0);
        assert!(r.merges.is_empty());
    }

    #[test]
    fn blocked_move_reports_nothing() {
        let board = with_row([2, 4, 8, 16]);
        let r = resolve(&board, Direction::Left);
        assert!(!r.moved);
        assert!(r.moves.is_empty());
        assert!(r.merges.is_empty());
        assert_eq!(r.board, board);
    }

    #[test]
    fn columns_move_down() {
        let board = Board::from_rows([[2, 0, 0, 0], [2, 0, 0, 0], [0, 0, 0, 0], [4, 0, 0, 0]]);
        let r = resolve(&board, Direction::Down);
        let col: Vec<u32> = (0..4).map(|row| r.board.get(CellRef::new(row, 0))).collect();
        assert_eq!(col, vec![0, 0, 4, 4]);
        assert_eq!(r.score_delta, 4);
        assert_eq!(r.merges[0].to, CellRef::new(2, 0));
        assert_eq!(r.merges[0].from1, CellRef::new(1, 0));
        assert_eq!(r.merges[0].from2, CellRef::new(0, 0));
    }

    #[test]
    fn right_merges_nearest_pair_first() {
        let board = with_row([2, 2, 2, 0]);
        let r = resolve(&board, Direction::Right);
        assert_eq!(r.board.rows()[0], [0, 0, 2, 4]);
    }

    #[test]
    fn input_board_is_untouched() {
        let board = with_row([2, 2, 4, 4]);
        let before = board;
        let _ = resolve(&board, Direction::Left);
        assert_eq!(board, before);
    }

    #[test]
    fn lines_are_reported_in_index_order() {
        let board = Board::from_rows([[0, 2, 0, 0], [0, 0, 2, 0], [0; 4], [0, 0, 0, 8]]);
        let r = resolve(&board, Direction::Left);
        let rows: Vec<usize> = r.moves.iter().map(|m| m.from.row).collect();
        assert_eq!(rows, vec![0, 1, 3]);
    }
}
