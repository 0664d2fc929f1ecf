//! Random tile spawning.

use crate::board::{Board, CellRef};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::instrument;

/// Chance that a spawned tile is a 4 rather than a 2.
pub const FOUR_PROBABILITY: f64 = 0.1;

/// A tile placed by [`spawn_random_tile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawn {
    pub cell: CellRef,
    pub value: u32,
}

/// Put a 2 (90%) or 4 (10%) into a uniformly chosen empty cell of `board`.
///
/// Returns `None` when the board is full; the board is then left as is.
#[instrument(level = "trace", skip_all)]
pub fn spawn_random_tile(board: &mut Board, rng: &mut impl Rng) -> Option<Spawn> {
    let empties = board.empty_cells();
    let &cell = empties.choose(rng)?;
    let value = if rng.gen_bool(FOUR_PROBABILITY) { 4 } else { 2 };
    board.set(cell, value);
    Some(Spawn { cell, value })
}
