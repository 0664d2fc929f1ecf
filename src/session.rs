//! Game session: the one owner of the live board, score and single-step undo.
//!
//! A move is two phases. [`Session::begin_move`] resolves the direction and parks the
//! result so the host can present it; [`Session::commit`] then spawns a tile, updates
//! score and terminal flags. While a move is parked the session is "in flight" and
//! rejects new moves and undo. Hosts without animation call [`Session::apply_direction`],
//! which does both at once.

use crate::board::{Board, CellRef};
use crate::direction::Direction;
use crate::resolve::{MoveResult, resolve};
use crate::rules::{WIN_TILE, can_move, has_value};
use crate::spawn::{Spawn, spawn_random_tile};
use rand::Rng;
use tracing::{debug, info, instrument};

pub const STATUS_NEW_GAME: &str = "Use arrow keys to play.";
pub const STATUS_NO_MOVE: &str = "No tiles moved.";
pub const STATUS_UNDONE: &str = "Undid last move.";
pub const STATUS_WON: &str = "You reached 2048.";
pub const STATUS_LOST: &str = "No more valid moves.";
pub const STATUS_MOVED: &str = "Move complete.";
pub const STATUS_CONTINUE: &str = "Keep going.";

/// Where the session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Ready,
    /// 2048 reached; moves are still accepted.
    Won,
    /// No legal move remains; sticky until a new game.
    Lost,
}

/// Overlay a host should show on top of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Win,
    Lose,
}

/// Feedback a host may turn into sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Move,
    Merge,
    Win,
    Lose,
}

/// State captured before a committed move, restored by undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub board: Board,
    pub score: u32,
    pub won: bool,
    pub game_over: bool,
}

/// What a commit did, for highlighting and sound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub spawn: Option<Spawn>,
    /// Destinations of this move's merges.
    pub merged: Vec<CellRef>,
    pub score_delta: u32,
    /// Best score went up; persist it.
    pub new_best: bool,
    pub cue: Cue,
}

#[derive(Debug)]
pub struct Session<R> {
    board: Board,
    score: u32,
    best_score: u32,
    won: bool,
    game_over: bool,
    snapshot: Option<Snapshot>,
    pending: Option<MoveResult>,
    overlay: Option<Overlay>,
    status: &'static str,
    rng: R,
}

impl<R: Rng> Session<R> {
    /// Start a fresh game. `best_score` comes from the host's persisted preferences.
    pub fn new(rng: R, best_score: u32) -> Self {
        let mut session = Self {
            board: Board::empty(),
            score: 0,
            best_score,
            won: false,
            game_over: false,
            snapshot: None,
            pending: None,
            overlay: None,
            status: STATUS_NEW_GAME,
            rng,
        };
        session.new_game();
        session
    }

    /// Reset to an empty board with two spawned tiles. Keeps the best score.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) {
        self.board = Board::empty();
        self.score = 0;
        self.won = false;
        self.game_over = false;
        self.snapshot = None;
        self.pending = None;
        self.overlay = None;
        spawn_random_tile(&mut self.board, &mut self.rng);
        spawn_random_tile(&mut self.board, &mut self.rng);
        self.status = STATUS_NEW_GAME;
        info!(best = self.best_score, "new game");
    }

    /// Phase one: resolve `direction` and park the result.
    ///
    /// Returns the pre-spawn result for presentation, or `None` when the move is
    /// ignored (game lost, move in flight, or nothing would change).
    #[instrument(skip(self))]
    pub fn begin_move(&mut self, direction: Direction) -> Option<MoveResult> {
        if self.game_over || self.pending.is_some() {
            return None;
        }
        let result = resolve(&self.board, direction);
        if !result.moved {
            self.status = STATUS_NO_MOVE;
            return None;
        }
        self.pending = Some(result.clone());
        Some(result)
    }

    /// Phase two: apply the parked move. `None` if nothing is in flight.
    #[instrument(skip(self))]
    pub fn commit(&mut self) -> Option<Commit> {
        let result = self.pending.take()?;

        self.snapshot = Some(self.snapshot_now());
        self.score = self.score.saturating_add(result.score_delta);
        let new_best = self.score > self.best_score;
        if new_best {
            self.best_score = self.score;
        }

        self.board = result.board;
        let spawn = spawn_random_tile(&mut self.board, &mut self.rng);

        let mut cue = if result.merges.is_empty() {
            Cue::Move
        } else {
            Cue::Merge
        };
        self.status = STATUS_MOVED;

        if !self.won && has_value(&self.board, WIN_TILE) {
            self.won = true;
            self.overlay = Some(Overlay::Win);
            self.status = STATUS_WON;
            cue = Cue::Win;
            info!(score = self.score, "reached {WIN_TILE}");
        }
        if !can_move(&self.board) {
            self.game_over = true;
            self.overlay = Some(Overlay::Lose);
            self.status = STATUS_LOST;
            cue = Cue::Lose;
            info!(score = self.score, "no moves left");
        }

        debug!(
            score = self.score,
            delta = result.score_delta,
            moves = result.moves.len(),
            merges = result.merges.len(),
            ?spawn,
            "move committed"
        );

        Some(Commit {
            spawn,
            merged: result.merges.iter().map(|m| m.to).collect(),
            score_delta: result.score_delta,
            new_best,
            cue,
        })
    }

    /// Resolve and commit in one step.
    pub fn apply_direction(&mut self, direction: Direction) -> Option<Commit> {
        self.begin_move(direction)?;
        self.commit()
    }

    /// Restore the state before the last committed move. Single level: a second
    /// undo without an intervening move does nothing. Returns whether anything changed.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> bool {
        if self.pending.is_some() {
            return false;
        }
        let Some(snapshot) = self.snapshot.take() else {
            return false;
        };
        self.board = snapshot.board;
        self.score = snapshot.score;
        self.won = snapshot.won;
        self.game_over = snapshot.game_over;
        self.overlay = None;
        self.status = STATUS_UNDONE;
        debug!(score = self.score, "undo");
        true
    }

    /// Dismiss the win overlay and keep playing.
    pub fn continue_playing(&mut self) {
        if self.overlay == Some(Overlay::Win) {
            self.overlay = None;
            self.status = STATUS_CONTINUE;
        }
    }
}

impl<R> Session<R> {
    fn snapshot_now(&self) -> Snapshot {
        Snapshot {
            board: self.board,
            score: self.score,
            won: self.won,
            game_over: self.game_over,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::Lost
        } else if self.won {
            Phase::Won
        } else {
            Phase::Ready
        }
    }

    pub fn overlay(&self) -> Option<Overlay> {
        self.overlay
    }

    pub fn status(&self) -> &'static str {
        self.status
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.pending.is_some()
    }

    pub fn can_undo(&self) -> bool {
        self.snapshot.is_some() && self.pending.is_none()
    }

    /// Replace the live board. Clears undo and any parked move; flags are recomputed.
    pub fn set_board(&mut self, board: Board) {
        self.board = board;
        self.snapshot = None;
        self.pending = None;
        self.won = has_value(&board, WIN_TILE);
        self.game_over = !can_move(&board);
        self.overlay = self.game_over.then_some(Overlay::Lose);
    }
}
