//! # ball-sort-engine
//!
//! A deterministic ball-sort puzzle engine: board model, move rules,
//! procedural level generation, and a tiered hint solver.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Every random decision flows through a seeded
//!    [`GameRng`]; the same seed always yields the same level.
//!
//! 2. **Solvable By Construction**: Levels are built by scrambling a
//!    solved board with legal moves, so the reversed scramble is a
//!    known solution. No post-hoc solver pass is needed.
//!
//! 3. **Immutable History**: Moves are appended to a log and flagged,
//!    never rewritten. Undo and redo work by flipping flags.
//!
//! ## Modules
//!
//! - `core`: Colors, tubes, board state, move log, seeded RNG
//! - `format`: Compact wire format and legacy JSON decoding
//! - `engine`: Move legality, execution, undo/redo, win/stuck detection
//! - `difficulty`: Pure level-number-to-parameters policy
//! - `generator`: Reverse-construction level generation
//! - `hint`: Scored hints and a bounded winning-line search
//! - `cache`: Board snapshot caching behind a trait seam
//! - `session`: One player's game, wiring board, engine, hints, cache

pub mod cache;
pub mod core;
pub mod difficulty;
pub mod engine;
pub mod format;
pub mod generator;
pub mod hint;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Ball, Board, Color, GameRng, GameStatus, MoveRecord, Tube, TubeId, COLOR_PALETTE,
};

pub use crate::format::{decode_board, decode_legacy_board, encode_board, FormatError};

pub use crate::engine::{
    can_move, execute_move, is_stuck, is_won, legal_moves, redo, undo, undo_many,
    MoveError, UNDO_BATCH_LIMIT,
};

pub use crate::difficulty::{params_for_level, Difficulty, LevelParams};

pub use crate::generator::{validate_level, GeneratedLevel, LevelGenerator};

pub use crate::hint::{HintConfig, HintEngine, HintKind, HintResult, ScoredMove};

pub use crate::cache::{BoardCache, MemoryCache, NoCache};

pub use crate::session::Session;
