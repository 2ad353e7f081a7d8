//! Core board model: colors, tubes, boards, and deterministic RNG.

mod board;
mod color;
mod rng;
mod tube;

pub use board::{Board, GameStatus, MoveRecord};
pub use color::{Color, COLOR_PALETTE};
pub use rng::GameRng;
pub use tube::{Ball, Tube, TubeId};
