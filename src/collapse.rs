//! Per-line collapse: drop gaps, merge equal neighbours once, remember where each tile came from.

use crate::board::CellRef;
use crate::line::LineCell;

/// Which source tile(s) produced a placed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// A single tile slid (possibly zero distance).
    Slide(CellRef),
    /// Two equal tiles combined; the first is the one nearer the destination.
    Merge(CellRef, CellRef),
}

/// One occupied slot of a collapsed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub value: u32,
    pub provenance: Provenance,
}

/// Output of [`collapse`]. `placed[i]` fills slot `i` of the line; slots past
/// `placed.len()` are empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Collapsed {
    pub placed: Vec<Placement>,
    pub score_delta: u32,
}

/// Value of two merged `value` tiles, or `None` when the sum does not fit a tile.
pub const fn merged_value(value: u32) -> Option<u32> {
    value.checked_mul(2)
}

/// Collapse a destination-first line.
///
/// Single greedy pass over the non-empty tiles: a tile equal to its successor merges
/// with it and both are consumed, so a merged tile is never merged again in the same move.
/// Equal tiles whose sum would overflow `u32` stay apart.
pub fn collapse(line: &[LineCell]) -> Collapsed {
    let non_zero: Vec<LineCell> = line.iter().copied().filter(|c| c.value != 0).collect();
    let mut out = Collapsed {
        placed: Vec::with_capacity(non_zero.len()),
        score_delta: 0,
    };

    let mut i = 0;
    while i < non_zero.len() {
        let current = non_zero[i];
        let merge = non_zero
            .get(i + 1)
            .filter(|next| next.value == current.value)
            .and_then(|next| Some((next, merged_value(current.value)?)));
        match merge {
            Some((next, value)) => {
                out.placed.push(Placement {
                    value,
                    provenance: Provenance::Merge(current.cell, next.cell),
                });
                out.score_delta = out.score_delta.saturating_add(value);
                i += 2;
            }
            _ => {
                out.placed.push(Placement {
                    value: current.value,
                    provenance: Provenance::Slide(current.cell),
                });
                i += 1;
            }
        }
    }
    out
}
