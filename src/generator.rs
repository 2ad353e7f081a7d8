//! Level generation by reverse construction.
//!
//! A level starts from its own solved state (one full monochrome tube
//! per color plus the configured empty tubes) and is scrambled by
//! applying random *legal* moves forward. Every applied move has a legal
//! inverse, so the scrambled board is solvable by replaying the inverse
//! sequence in reverse order. Solvability is structural; nothing needs
//! to be proven afterward.
//!
//! Randomness is injected: the generator owns a [`GameRng`] and runs
//! each level on a fork, recording the fork's seed on the output so any
//! level can be regenerated exactly.

use serde::{Deserialize, Serialize};

use crate::core::{Board, Color, GameRng, Tube, TubeId};
use crate::difficulty::{params_for_level, Difficulty, LevelParams};
use crate::engine;
use crate::format::{decode_board, encode_board, FormatError};

/// A generated, solvable-by-construction level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedLevel {
    pub number: u32,
    pub difficulty: Difficulty,
    pub params: LevelParams,
    /// Compact-format initial board.
    pub initial_state: String,
    /// Seed of the RNG fork this level was scrambled with.
    pub seed: u64,
    /// Cheap heuristic estimate for scoring and display; not an exact
    /// solve.
    pub minimum_moves: usize,
    /// One known winning sequence: the scramble moves inverted and
    /// reversed. Not necessarily optimal.
    pub solution: Vec<(TubeId, TubeId)>,
}

impl GeneratedLevel {
    /// Materialize a fresh playable board from the initial state.
    ///
    /// # Errors
    ///
    /// [`FormatError`] if `initial_state` was corrupted in storage.
    pub fn board(&self) -> Result<Board, FormatError> {
        decode_board(&self.initial_state, self.params.balls_per_color)
    }
}

/// Reverse-construction level generator.
pub struct LevelGenerator {
    rng: GameRng,
}

impl LevelGenerator {
    /// Create a generator around an injected RNG.
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }

    /// Convenience constructor from a bare seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self::new(GameRng::new(seed))
    }

    /// Generate the level for a level number, using the difficulty
    /// policy for its parameters.
    pub fn generate(&mut self, level_number: u32) -> GeneratedLevel {
        self.generate_from_params(params_for_level(level_number))
    }

    /// Generate a level from explicit parameters.
    ///
    /// The scramble draws uniformly from the currently legal moves, up
    /// to `shuffle_moves` applications within a `5 ×` attempt budget.
    /// Running out of legal moves early is not an error: a partially
    /// scrambled board is still solvable and is returned as-is. The
    /// output is never an already-solved board as long as any legal
    /// move exists. The recorded solution covers only the stretch since
    /// the scramble last touched a solved position, so replaying it
    /// ends exactly at the first win.
    pub fn generate_from_params(&mut self, params: LevelParams) -> GeneratedLevel {
        let mut rng = self.rng.fork();
        let seed = rng.seed();

        let mut board = solved_board(&params);
        let mut history: Vec<(TubeId, TubeId)> = Vec::with_capacity(params.shuffle_moves);

        let max_attempts = params.shuffle_moves.saturating_mul(5);
        let mut attempts = 0;
        while history.len() < params.shuffle_moves && attempts < max_attempts {
            attempts += 1;
            let moves = engine::legal_moves(&board);
            let Some(&(from, to)) = rng.choose(&moves) else {
                break;
            };
            apply_unchecked(&mut board, from, to);
            history.push((from, to));
            // A scramble can wander back into the solved position. The
            // winning line from there is empty, so everything recorded
            // so far is dead weight: drop it and keep scrambling. This
            // keeps the recorded solution ending at its first win.
            if engine::is_won(&board) {
                history.clear();
            }
        }

        // The scramble may end on the solved position (history is empty
        // then); one more legal move leaves it unsolved and makes the
        // solution that single inverse move.
        if engine::is_won(&board) {
            let moves = engine::legal_moves(&board);
            if let Some(&(from, to)) = rng.choose(&moves) {
                apply_unchecked(&mut board, from, to);
                history.push((from, to));
            }
        }

        let solution = history
            .iter()
            .rev()
            .map(|&(from, to)| (to, from))
            .collect();

        GeneratedLevel {
            number: params.level_number,
            difficulty: params.difficulty,
            initial_state: encode_board(&board),
            seed,
            minimum_moves: estimate_minimum_moves(&params),
            solution,
            params,
        }
    }
}

/// Build the solved state: one full tube per color, then empty tubes.
fn solved_board(params: &LevelParams) -> Board {
    let capacity = params.balls_per_color;
    let mut tubes = Vec::with_capacity(params.tubes);
    for i in 0..params.colors {
        let color = Color::new(i as u8);
        tubes.push(Tube::with_balls(
            TubeId::new(i as u32 + 1),
            capacity,
            std::iter::repeat(color).take(capacity),
        ));
    }
    for i in params.colors..params.tubes {
        tubes.push(Tube::new(TubeId::new(i as u32 + 1), capacity));
    }
    Board::new(tubes)
}

/// Relocate a top ball without logging or status classification.
///
/// The scramble is not play: a mid-scramble "won" position must not
/// finalize the board, and the move log stays empty for the player.
fn apply_unchecked(board: &mut Board, from: TubeId, to: TubeId) {
    debug_assert!(engine::can_move(board, from, to));
    if let Some(color) = board.tube_mut(from).and_then(Tube::pop) {
        if let Some(tube) = board.tube_mut(to) {
            tube.push(color);
        }
    }
}

/// Display-only estimate of the moves a solve needs.
fn estimate_minimum_moves(params: &LevelParams) -> usize {
    let base = params.colors * params.balls_per_color;
    match params.colors {
        0..=3 => base / 2,
        4..=5 => base * 2 / 3,
        _ => base,
    }
}

/// Sanity-check a compact level layout.
///
/// Verifies only that every color appears the same number of times.
/// This is deliberately **not** a solvability proof; solvability comes
/// from the reverse construction, not from this check.
#[must_use]
pub fn validate_level(compact: &str) -> bool {
    let Ok(board) = decode_board(compact, usize::MAX) else {
        return false;
    };

    let mut counts: rustc_hash::FxHashMap<Color, usize> = rustc_hash::FxHashMap::default();
    for tube in board.tubes() {
        for &color in tube.balls() {
            *counts.entry(color).or_insert(0) += 1;
        }
    }

    let mut values = counts.values();
    match values.next() {
        None => true, // a board with no balls has nothing inconsistent
        Some(&first) => values.all(|&c| c == first),
    }
}
