//! Bounded breadth-first search for a winning line.
//!
//! The search expands only the top few scored moves from each position
//! (a small beam), deduplicates positions by their state key, and gives
//! up past a depth or visited-state budget. It finds short wins fast on
//! real levels without ever exploding on adversarial ones.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use crate::core::{Board, TubeId};
use crate::engine;

use super::score::scored_moves;
use super::HintConfig;

/// Search for a move sequence that wins from `board`.
///
/// Returns the full sequence in play order, or `None` when no win is
/// found within the configured budgets.
#[must_use]
pub(crate) fn find_winning_sequence(
    board: &Board,
    config: &HintConfig,
) -> Option<Vec<(TubeId, TubeId)>> {
    if engine::is_won(board) {
        return Some(Vec::new());
    }

    let mut visited: FxHashSet<String> = FxHashSet::default();
    visited.insert(board.state_key());

    let mut queue: VecDeque<(Board, Vec<(TubeId, TubeId)>)> = VecDeque::new();
    queue.push_back((board.clone(), Vec::new()));

    while let Some((state, path)) = queue.pop_front() {
        if path.len() >= config.max_depth {
            continue;
        }

        let mut candidates = scored_moves(&state);
        // Stable sort keeps enumeration order among equal scores.
        candidates.sort_by(|a, b| b.score.cmp(&a.score));
        candidates.truncate(config.beam_width);

        for candidate in candidates {
            let mut next = state.clone();
            if engine::execute_move(&mut next, candidate.from, candidate.to).is_err() {
                continue;
            }

            let mut next_path = path.clone();
            next_path.push((candidate.from, candidate.to));

            if engine::is_won(&next) {
                return Some(next_path);
            }

            if visited.len() >= config.max_visited {
                return None;
            }
            if visited.insert(next.state_key()) {
                queue.push_back((next, next_path));
            }
        }
    }

    None
}
