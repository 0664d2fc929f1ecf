//! Terminal-condition checks.

use crate::board::{BOARD_SIZE, Board};
use crate::collapse::merged_value;

/// Tile value that wins the game.
pub const WIN_TILE: u32 = 2048;

/// True if some direction would change the board: an empty cell exists, or two
/// orthogonally adjacent cells hold equal values that can merge.
pub fn can_move(board: &Board) -> bool {
    let rows = board.rows();
    for r in 0..BOARD_SIZE {
        for c in 0..BOARD_SIZE {
            let v = rows[r][c];
            if v == 0 {
                return true;
            }
            let mergeable = merged_value(v).is_some();
            if mergeable && c + 1 < BOARD_SIZE && v == rows[r][c + 1] {
                return true;
            }
            if mergeable && r + 1 < BOARD_SIZE && v == rows[r + 1][c] {
                return true;
            }
        }
    }
    false
}

pub fn has_value(board: &Board, target: u32) -> bool {
    board.rows().iter().flatten().any(|&v| v == target)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOCKED: Board = Board::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);

    #[test]
    fn checkerboard_is_stuck() {
        assert!(!can_move(&LOCKED));
    }

    #[test]
    fn empty_cell_allows_move() {
        let mut rows = *LOCKED.rows();
        rows[3][3] = 0;
        assert!(can_move(&Board::from_rows(rows)));
    }

    #[test]
    fn vertical_pair_allows_move() {
        let mut rows = *LOCKED.rows();
        rows[1][0] = 2;
        rows[1][1] = 8;
        assert!(can_move(&Board::from_rows(rows)));
    }

    #[test]
    fn finds_win_tile() {
        let mut rows = *LOCKED.rows();
        assert!(!has_value(&LOCKED, WIN_TILE));
        rows[0][0] = WIN_TILE;
        let board = Board::from_rows(rows);
        assert!(has_value(&board, WIN_TILE));
    }

    #[test]
    fn equal_maxima_cannot_merge() {
        let top = 1 << 31;
        assert!(!can_move(&Board::from_rows([[top; 4]; 4])));
        let mut rows = *LOCKED.rows();
        rows[0][0] = top;
        rows[0][1] = top;
        assert!(!can_move(&Board::from_rows(rows)));
    }
}
