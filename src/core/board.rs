//! Board state: tubes, status, and the move log.
//!
//! ## Move log
//!
//! History is an append-only `Vec<MoveRecord>` with an `is_undone` flag
//! rather than a snapshot stack. Undo flags the newest active record and
//! relocates one ball; redo clears the flag on the oldest undone record
//! if it is still legal. Nothing is ever deleted, so the log doubles as
//! an audit trail.
//!
//! ## Lifecycle
//!
//! A board is built from a level's compact state, mutated in place by
//! the move engine for one play session, and left alone once terminal
//! (except that undo may re-open a finished board).

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::tube::{Tube, TubeId};

/// Play status of a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    /// Every tube is empty or complete.
    Completed,
    /// No legal move remained on a board that was not won.
    Failed,
}

impl GameStatus {
    /// Whether the game has ended (won or lost).
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// One entry in the append-only move log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: TubeId,
    pub to: TubeId,
    pub color: Color,
    /// Sequential per board, starting at 1. Unique across the log even
    /// when earlier moves have been undone.
    pub move_number: u32,
    pub is_undone: bool,
}

/// A puzzle board: ordered tubes plus play bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    tubes: Vec<Tube>,
    status: GameStatus,
    moves: Vec<MoveRecord>,
    hints_used: u32,
}

impl Board {
    /// Create an in-progress board from tubes in display order.
    #[must_use]
    pub fn new(tubes: Vec<Tube>) -> Self {
        Self {
            tubes,
            status: GameStatus::InProgress,
            moves: Vec::new(),
            hints_used: 0,
        }
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub(crate) fn set_status(&mut self, status: GameStatus) {
        self.status = status;
    }

    /// Tubes in display order.
    #[must_use]
    pub fn tubes(&self) -> &[Tube] {
        &self.tubes
    }

    #[must_use]
    pub fn tube_count(&self) -> usize {
        self.tubes.len()
    }

    /// Look up a tube by its stable id.
    #[must_use]
    pub fn tube(&self, id: TubeId) -> Option<&Tube> {
        self.tubes.iter().find(|t| t.id() == id)
    }

    pub(crate) fn tube_mut(&mut self, id: TubeId) -> Option<&mut Tube> {
        self.tubes.iter_mut().find(|t| t.id() == id)
    }

    /// Total balls on the board.
    #[must_use]
    pub fn ball_count(&self) -> usize {
        self.tubes.iter().map(Tube::count).sum()
    }

    #[must_use]
    pub fn empty_tube_count(&self) -> usize {
        self.tubes.iter().filter(|t| t.is_empty()).count()
    }

    // === Move log ===

    /// The full move log, undone entries included.
    #[must_use]
    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    /// Number of moves currently in effect (excludes undone entries).
    #[must_use]
    pub fn moves_count(&self) -> usize {
        self.moves.iter().filter(|m| !m.is_undone).count()
    }

    /// Whether an active move exists to undo.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.moves.iter().any(|m| !m.is_undone)
    }

    /// Whether an undone move exists to redo.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.moves.iter().any(|m| m.is_undone)
    }

    /// Append a record for a just-applied move and return it.
    pub(crate) fn record_move(&mut self, from: TubeId, to: TubeId, color: Color) -> MoveRecord {
        let record = MoveRecord {
            from,
            to,
            color,
            move_number: self.moves.len() as u32 + 1,
            is_undone: false,
        };
        self.moves.push(record.clone());
        record
    }

    pub(crate) fn moves_mut(&mut self) -> &mut [MoveRecord] {
        &mut self.moves
    }

    // === Hints ===

    /// Hints consumed on this board. Score impact is an external
    /// collaborator's concern; the board only counts.
    #[must_use]
    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    pub(crate) fn record_hint(&mut self) {
        self.hints_used += 1;
    }

    // === Canonical key ===

    /// Canonical content key: per-tube color indices bottom-to-top
    /// joined with `,`, tubes in display order joined with `|`.
    ///
    /// Two boards with equal keys hold the same position; the solver
    /// uses this for visited-state deduplication.
    #[must_use]
    pub fn state_key(&self) -> String {
        let mut key = String::with_capacity(self.tubes.len() * 8);
        for (i, tube) in self.tubes.iter().enumerate() {
            if i > 0 {
                key.push('|');
            }
            for (j, color) in tube.balls().iter().enumerate() {
                if j > 0 {
                    key.push(',');
                }
                key.push_str(&color.index().to_string());
            }
        }
        key
    }

    /// Structural equality on tube contents only, ignoring the log and
    /// counters. Used by tests and by undo verification.
    #[must_use]
    pub fn same_position(&self, other: &Board) -> bool {
        self.state_key() == other.state_key()
    }
}
