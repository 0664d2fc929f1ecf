//! Mergetui: 2048-style tile-merging engine.
//!
//! The engine is pure and synchronous: [`resolve::resolve`] computes a move without
//! touching its input, and [`session::Session`] owns the live game. Rendering, input
//! and sound belong to the host (see the `mergetui` binary).

pub mod board;
pub mod collapse;
pub mod direction;
pub mod line;
pub mod prefs;
pub mod resolve;
pub mod rules;
pub mod session;
pub mod spawn;
pub mod storage;

pub use board::{BOARD_SIZE, Board, CellRef};
pub use direction::Direction;
pub use resolve::{MoveResult, TileMerge, TileMove, resolve};
pub use session::{Commit, Cue, Overlay, Phase, Session};
pub use spawn::{Spawn, spawn_random_tile};
