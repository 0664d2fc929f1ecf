//! The 4×4 grid of tile values. `0` is an empty cell; every other value is a power of two.

use std::fmt;

/// Side length of the board.
pub const BOARD_SIZE: usize = 4;

/// A (row, col) coordinate, both in `0..BOARD_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Board values, row-major. A plain value type: copies never alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [[u32; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// All-empty board.
    pub const fn empty() -> Self {
        Self {
            cells: [[0; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Build from explicit rows. Used by tests and hosts restoring a position.
    pub const fn from_rows(cells: [[u32; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    #[inline]
    pub fn get(&self, cell: CellRef) -> u32 {
        self.cells[cell.row][cell.col]
    }

    #[inline]
    pub fn set(&mut self, cell: CellRef, value: u32) {
        self.cells[cell.row][cell.col] = value;
    }

    pub fn rows(&self) -> &[[u32; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// Every coordinate in row-major order.
    pub fn coords() -> impl Iterator<Item = CellRef> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| CellRef::new(row, col)))
    }

    /// Coordinates of empty cells, row-major.
    pub fn empty_cells(&self) -> Vec<CellRef> {
        Self::coords().filter(|&c| self.get(c) == 0).collect()
    }

    /// Number of non-empty cells.
    pub fn tile_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&v| v != 0).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: Vec<String> = row.iter().map(|v| format!("{v:>5}")).collect();
            writeln!(f, "{}", line.join(""))?;
        }
        Ok(())
    }
}
