//! Hint and solver engine.
//!
//! Four hint tiers over one scoring core:
//!
//! - **Simple**: the single best scored move right now.
//! - **Advanced**: that move plus the best follow-up after it.
//! - **Strategic**: a bounded search for an actual winning line,
//!   surfacing its first few moves.
//! - **Tutorial**: the simple hint with a plain-language explanation
//!   of why the move helps.
//!
//! Hints never mutate the live board state beyond the hint-usage
//! counter; all lookahead runs on clones.

mod score;
mod search;

pub use score::ScoredMove;

use smallvec::SmallVec;

use crate::core::{Board, GameStatus, TubeId};
use crate::engine;

/// How many moves of a strategic line are surfaced to the player.
const STRATEGIC_PREVIEW_MOVES: usize = 3;

/// The kind of assistance requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HintKind {
    /// Best single move by heuristic score.
    Simple,
    /// Best move plus its best follow-up.
    Advanced,
    /// Prefix of a verified winning sequence.
    Strategic,
    /// Best move with an explanation of the reasoning.
    Tutorial,
}

/// Budgets for the strategic search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HintConfig {
    /// Top scored moves expanded per position.
    pub beam_width: usize,
    /// Maximum line length considered.
    pub max_depth: usize,
    /// Maximum distinct positions examined before giving up.
    pub max_visited: usize,
}

impl Default for HintConfig {
    fn default() -> Self {
        Self {
            beam_width: 3,
            max_depth: 10,
            max_visited: 20_000,
        }
    }
}

impl HintConfig {
    #[must_use]
    pub fn with_beam_width(mut self, beam_width: usize) -> Self {
        self.beam_width = beam_width;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_max_visited(mut self, max_visited: usize) -> Self {
        self.max_visited = max_visited;
        self
    }
}

/// The advice produced for one hint request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HintResult {
    pub kind: HintKind,
    /// One or more moves in play order.
    pub steps: SmallVec<[(TubeId, TubeId); 3]>,
    /// Heuristic score of the leading move (100 for a verified line).
    pub score: u32,
    /// Plain-language reasoning, when the kind provides one.
    pub explanation: Option<String>,
}

/// Produces hints for in-progress boards.
#[derive(Clone, Debug, Default)]
pub struct HintEngine {
    config: HintConfig,
}

impl HintEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: HintConfig) -> Self {
        Self { config }
    }

    /// Compute a hint of the requested kind.
    ///
    /// Returns `None` for finished or stuck-with-no-advice boards. A
    /// successful hint bumps the board's hint-usage counter; nothing
    /// else on the board changes.
    pub fn hint(&self, board: &mut Board, kind: HintKind) -> Option<HintResult> {
        if board.status() != GameStatus::InProgress {
            return None;
        }

        let result = match kind {
            HintKind::Simple => self.simple(board),
            HintKind::Advanced => self.advanced(board),
            HintKind::Strategic => self.strategic(board),
            HintKind::Tutorial => self.tutorial(board),
        };

        if result.is_some() {
            board.record_hint();
        }
        result
    }

    fn simple(&self, board: &Board) -> Option<HintResult> {
        let best = score::best_move(board)?;
        Some(HintResult {
            kind: HintKind::Simple,
            steps: SmallVec::from_slice(&[(best.from, best.to)]),
            score: best.score,
            explanation: None,
        })
    }

    fn advanced(&self, board: &Board) -> Option<HintResult> {
        let first = score::best_move(board)?;
        let mut steps: SmallVec<[(TubeId, TubeId); 3]> =
            SmallVec::from_slice(&[(first.from, first.to)]);

        let mut lookahead = board.clone();
        if engine::execute_move(&mut lookahead, first.from, first.to).is_ok() {
            if let Some(second) = score::best_move(&lookahead) {
                steps.push((second.from, second.to));
            }
        }

        Some(HintResult {
            kind: HintKind::Advanced,
            steps,
            score: first.score,
            explanation: None,
        })
    }

    fn strategic(&self, board: &Board) -> Option<HintResult> {
        let line = search::find_winning_sequence(board, &self.config)?;
        if line.is_empty() {
            return None;
        }
        let total = line.len();
        let mut steps: SmallVec<[(TubeId, TubeId); 3]> = SmallVec::new();
        steps.extend(line.into_iter().take(STRATEGIC_PREVIEW_MOVES));
        Some(HintResult {
            kind: HintKind::Strategic,
            steps,
            score: 100,
            explanation: Some(format!(
                "Found a winning line: {total} moves to complete the level."
            )),
        })
    }

    fn tutorial(&self, board: &Board) -> Option<HintResult> {
        let best = score::best_move(board)?;
        let explanation = explain_move(board, best.from, best.to);
        Some(HintResult {
            kind: HintKind::Tutorial,
            steps: SmallVec::from_slice(&[(best.from, best.to)]),
            score: best.score,
            explanation: Some(explanation),
        })
    }
}

/// Plain-language reasoning for a tutorial hint.
fn explain_move(board: &Board, from: TubeId, to: TubeId) -> String {
    let (Some(from_tube), Some(to_tube)) = (board.tube(from), board.tube(to)) else {
        return String::from("A strategic move to reorganize the balls.");
    };

    if let Some(ball) = from_tube.top_color() {
        if !to_tube.is_empty() && to_tube.balls().iter().all(|&c| c == ball) {
            if to_tube.count() == to_tube.capacity() - 1 {
                return format!("Moving this ball completes tube {to}.");
            }
            return format!(
                "Stacking matching colors brings tube {to} closer to completion."
            );
        }
    }

    if to_tube.is_empty() {
        return String::from(
            "Moving to an empty tube creates room to organize other colors.",
        );
    }

    if unblocks_needed_ball(board, from) {
        return String::from("This move frees an important ball buried underneath.");
    }

    String::from("A strategic move to reorganize the balls.")
}

/// True when a ball beneath the source top is wanted by some partially
/// built single-color tube elsewhere.
fn unblocks_needed_ball(board: &Board, from: TubeId) -> bool {
    let Some(from_tube) = board.tube(from) else {
        return false;
    };
    let balls = from_tube.balls();
    if balls.len() < 2 {
        return false;
    }
    for &buried in &balls[..balls.len() - 1] {
        let wanted = board.tubes().iter().any(|t| {
            t.id() != from
                && !t.is_empty()
                && !t.is_full()
                && t.balls().iter().all(|&c| c == buried)
        });
        if wanted {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::decode_board;

    const T1: TubeId = TubeId(1);
    const T2: TubeId = TubeId(2);

    fn board(text: &str, capacity: usize) -> Board {
        decode_board(text, capacity).unwrap()
    }

    #[test]
    fn test_simple_hint_returns_best_move() {
        let mut b = board("T1=1,0;T2=0,0,0;T3=;T4=", 4);
        let engine = HintEngine::new();
        let hint = engine.hint(&mut b, HintKind::Simple).unwrap();
        assert_eq!(hint.kind, HintKind::Simple);
        assert_eq!(hint.steps.as_slice(), &[(T1, T2)]);
        assert!(hint.explanation.is_none());
    }

    #[test]
    fn test_hint_increments_usage_counter() {
        let mut b = board("T1=1,0;T2=;T3=", 4);
        let engine = HintEngine::new();
        assert_eq!(b.hints_used(), 0);
        engine.hint(&mut b, HintKind::Simple).unwrap();
        engine.hint(&mut b, HintKind::Tutorial).unwrap();
        assert_eq!(b.hints_used(), 2);
    }

    #[test]
    fn test_hint_does_not_mutate_position() {
        let mut b = board("T1=0,1;T2=1,0;T3=", 2);
        let snapshot = b.state_key();
        let engine = HintEngine::new();
        engine.hint(&mut b, HintKind::Strategic).unwrap();
        assert_eq!(b.state_key(), snapshot);
        assert!(b.moves().is_empty());
    }

    #[test]
    fn test_no_hint_for_finished_game() {
        // One move away from done; finish it, then ask for a hint.
        let mut b = board("T1=0;T2=0;T3=1,1", 2);
        crate::engine::execute_move(&mut b, T1, T2).unwrap();
        assert_eq!(b.status(), GameStatus::Completed);
        let engine = HintEngine::new();
        assert!(engine.hint(&mut b, HintKind::Simple).is_none());
        assert_eq!(b.hints_used(), 0);
    }

    #[test]
    fn test_advanced_hint_has_followup() {
        let mut b = board("T1=0,1;T2=1,0;T3=", 2);
        let engine = HintEngine::new();
        let hint = engine.hint(&mut b, HintKind::Advanced).unwrap();
        assert_eq!(hint.kind, HintKind::Advanced);
        assert_eq!(hint.steps.len(), 2);
    }

    #[test]
    fn test_strategic_hint_previews_winning_line() {
        let mut b = board("T1=0,1;T2=1,0;T3=", 2);
        let engine = HintEngine::new();
        let hint = engine.hint(&mut b, HintKind::Strategic).unwrap();
        assert_eq!(hint.score, 100);
        assert!(!hint.steps.is_empty());
        assert!(hint.steps.len() <= STRATEGIC_PREVIEW_MOVES);
        let text = hint.explanation.unwrap();
        assert!(text.contains("winning line"));
    }

    #[test]
    fn test_strategic_hint_none_when_unwinnable_within_budget() {
        let mut b = board("T1=0,1;T2=1,0;T3=2", 2);
        let engine =
            HintEngine::with_config(HintConfig::default().with_max_depth(2));
        assert!(engine.hint(&mut b, HintKind::Strategic).is_none());
        // A failed hint must not count as used.
        assert_eq!(b.hints_used(), 0);
    }

    #[test]
    fn test_tutorial_explains_completion() {
        let mut b = board("T1=1,0;T2=0,0,0;T3=;T4=", 4);
        let engine = HintEngine::new();
        let hint = engine.hint(&mut b, HintKind::Tutorial).unwrap();
        let text = hint.explanation.unwrap();
        assert!(text.contains("completes tube T2"));
    }

    #[test]
    fn test_tutorial_explains_empty_tube() {
        let mut b = board("T1=2,1,0;T2=;T3=", 4);
        let engine = HintEngine::new();
        let hint = engine.hint(&mut b, HintKind::Tutorial).unwrap();
        let text = hint.explanation.unwrap();
        assert!(text.contains("empty tube"));
    }

    #[test]
    fn test_hint_config_builders() {
        let config = HintConfig::default()
            .with_beam_width(5)
            .with_max_depth(12)
            .with_max_visited(1_000);
        assert_eq!(config.beam_width, 5);
        assert_eq!(config.max_depth, 12);
        assert_eq!(config.max_visited, 1_000);
    }
}
