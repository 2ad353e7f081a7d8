//! Heuristic move scoring.
//!
//! Every legal move is scored by summing independent weighted signals;
//! the weights are the original game's hand tuning and are part of the
//! engine's observable behavior (tests pin them). Scores floor at 0.

use crate::core::{Board, TubeId};
use crate::engine;

/// A legal move with its heuristic score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoredMove {
    pub from: TubeId,
    pub to: TubeId,
    pub score: u32,
}

/// Score one legal move. Callers guarantee legality.
#[must_use]
pub(crate) fn score_move(board: &Board, from: TubeId, to: TubeId) -> u32 {
    let (Some(from_tube), Some(to_tube)) = (board.tube(from), board.tube(to)) else {
        return 0;
    };
    let Some(ball) = from_tube.top_color() else {
        return 0;
    };

    let to_matches_stack =
        !to_tube.is_empty() && to_tube.balls().iter().all(|&c| c == ball);

    let mut score: i32 = 0;

    // Completing a tube outranks everything.
    if to_matches_stack && to_tube.count() == to_tube.capacity() - 1 {
        score += 100;
    }

    // Consolidating onto a same-color stack; larger stacks score more.
    if to_matches_stack {
        score += 80 + to_tube.count() as i32 * 10;
    }

    // Unburying a same-color ball beneath the one being moved.
    if from_tube.has_buried_match() {
        score += 60;
    }

    // Untangling mixed tubes beats shuffling clean ones.
    let from_colors = from_tube.distinct_colors() as i32;
    if from_colors > 1 {
        score += 40 + from_colors * 5;
    }

    // An empty tube has strategic value, but the last one is precious.
    if to_tube.is_empty() {
        score += 30;
        if board.empty_tube_count() <= 1 {
            score -= 10;
        }
    }

    // Breaking up an already-clean stack.
    if from_tube.is_monochrome() && from_tube.count() > 1 {
        score -= 20;
    }

    // A forced dump onto a mismatched tube.
    if !to_tube.is_empty() && !to_matches_stack {
        score -= 15;
    }

    score.max(0) as u32
}

/// All legal moves with scores, in stable enumeration order.
#[must_use]
pub(crate) fn scored_moves(board: &Board) -> Vec<ScoredMove> {
    engine::legal_moves(board)
        .into_iter()
        .map(|(from, to)| ScoredMove {
            from,
            to,
            score: score_move(board, from, to),
        })
        .collect()
}

/// The highest-scoring legal move.
///
/// Ties go to the first candidate in enumeration order, which keeps
/// hint output deterministic for a given position.
#[must_use]
pub(crate) fn best_move(board: &Board) -> Option<ScoredMove> {
    let mut best: Option<ScoredMove> = None;
    for candidate in scored_moves(board) {
        match best {
            Some(b) if candidate.score <= b.score => {}
            _ => best = Some(candidate),
        }
    }
    best
}
