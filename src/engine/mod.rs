//! Move engine: legality, execution, undo/redo, terminal detection.
//!
//! All operations work on a caller-owned [`Board`]; nothing here holds
//! state. Illegal moves are expected user input and come back as
//! `Err(MoveError)` values, never panics.
//!
//! ## Terminal states
//!
//! After every applied move the board is re-classified: won first
//! (every tube empty or complete), then stuck (no legal move). A won
//! board is never also stuck; a fully sorted board simply needs no
//! moves. Undo re-opens a terminal board.

use thiserror::Error;

use crate::core::{Board, GameStatus, MoveRecord, TubeId};

/// Most undos a single `undo_many` call will perform.
///
/// A product policy carried over from the original game (3 undos per
/// request), not an architectural limit.
pub const UNDO_BATCH_LIMIT: usize = 3;

/// Rejected move operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("illegal move from {from} to {to}")]
    IllegalMove { from: TubeId, to: TubeId },

    #[error("tube {0} does not exist on this board")]
    UnknownTube(TubeId),

    #[error("game is already finished")]
    GameFinished,
}

/// Whether the top ball of `from` may be relocated onto `to`.
///
/// False when the tubes are equal, either id is unknown, `from` is
/// empty, or `to` is full; true when `to` is empty; otherwise true iff
/// the top colors match.
#[must_use]
pub fn can_move(board: &Board, from: TubeId, to: TubeId) -> bool {
    if from == to {
        return false;
    }
    let (Some(from_tube), Some(to_tube)) = (board.tube(from), board.tube(to)) else {
        return false;
    };
    match from_tube.top_color() {
        Some(color) => to_tube.can_receive(color),
        None => false,
    }
}

/// All legal `(from, to)` pairs in display order.
#[must_use]
pub fn legal_moves(board: &Board) -> Vec<(TubeId, TubeId)> {
    let mut moves = Vec::new();
    for from in board.tubes() {
        let Some(color) = from.top_color() else {
            continue;
        };
        for to in board.tubes() {
            if to.id() != from.id() && to.can_receive(color) {
                moves.push((from.id(), to.id()));
            }
        }
    }
    moves
}

/// Every tube empty or complete.
#[must_use]
pub fn is_won(board: &Board) -> bool {
    board
        .tubes()
        .iter()
        .all(|t| t.is_empty() || t.is_complete())
}

/// No legal move remains on a board that is not won.
#[must_use]
pub fn is_stuck(board: &Board) -> bool {
    !is_won(board) && legal_moves(board).is_empty()
}

/// Relocate the top ball of `from` onto `to` and log the move.
///
/// On success the returned record has the next sequential move number
/// and the board's status is re-classified (won, then stuck).
///
/// # Errors
///
/// [`MoveError::GameFinished`] on a terminal board,
/// [`MoveError::UnknownTube`] for an id not on the board, and
/// [`MoveError::IllegalMove`] when [`can_move`] is false.
pub fn execute_move(board: &mut Board, from: TubeId, to: TubeId) -> Result<MoveRecord, MoveError> {
    if board.status().is_terminal() {
        return Err(MoveError::GameFinished);
    }
    if board.tube(from).is_none() {
        return Err(MoveError::UnknownTube(from));
    }
    if board.tube(to).is_none() {
        return Err(MoveError::UnknownTube(to));
    }
    if !can_move(board, from, to) {
        return Err(MoveError::IllegalMove { from, to });
    }

    let color = board
        .tube_mut(from)
        .and_then(|t| t.pop())
        .expect("can_move guaranteed a top ball");
    board
        .tube_mut(to)
        .expect("tube id checked above")
        .push(color);

    let record = board.record_move(from, to, color);
    reclassify(board);
    Ok(record)
}

/// Take back the most recent active move.
///
/// Flags the highest-numbered non-undone record and relocates its ball
/// from `to` back to `from`. Returns false when nothing is undoable or
/// the inverse relocation is no longer possible. A terminal board
/// returns to `InProgress`; clearing any score or end time is the
/// caller's bookkeeping.
pub fn undo(board: &mut Board) -> bool {
    let Some(index) = board
        .moves()
        .iter()
        .rposition(|m| !m.is_undone)
    else {
        return false;
    };
    let record = board.moves()[index].clone();

    // The inverse move must itself be possible: the moved ball still on
    // top of its destination and room left in its origin.
    let still_on_top = board
        .tube(record.to)
        .and_then(|t| t.top_color())
        .is_some_and(|c| c == record.color);
    let origin_has_room = board.tube(record.from).is_some_and(|t| !t.is_full());
    if !still_on_top || !origin_has_room {
        return false;
    }

    let color = board
        .tube_mut(record.to)
        .and_then(|t| t.pop())
        .expect("top ball checked above");
    board
        .tube_mut(record.from)
        .expect("origin tube exists")
        .push(color);

    board.moves_mut()[index].is_undone = true;
    if board.status().is_terminal() {
        board.set_status(GameStatus::InProgress);
    }
    true
}

/// Undo up to `n` moves (capped at [`UNDO_BATCH_LIMIT`]).
///
/// Returns how many moves were actually taken back.
pub fn undo_many(board: &mut Board, n: usize) -> usize {
    let n = n.min(UNDO_BATCH_LIMIT);
    let mut undone = 0;
    while undone < n && undo(board) {
        undone += 1;
    }
    undone
}

/// Re-apply up to `n` previously undone moves.
///
/// Candidates are visited once in ascending move-number order. An entry
/// is re-applied only if it is still legal *and* still moves the color
/// it originally logged; otherwise it is skipped and keeps its undone
/// flag; skipped entries are never replaced with a recomputed move.
/// Returns how many moves were re-applied.
pub fn redo(board: &mut Board, n: usize) -> usize {
    if board.status().is_terminal() {
        return 0;
    }

    let candidates: Vec<usize> = board
        .moves()
        .iter()
        .enumerate()
        .filter(|(_, m)| m.is_undone)
        .map(|(i, _)| i)
        .collect();

    let mut applied = 0;
    for index in candidates {
        if applied == n {
            break;
        }
        let record = board.moves()[index].clone();

        let top_matches = board
            .tube(record.from)
            .and_then(|t| t.top_color())
            .is_some_and(|c| c == record.color);
        if !top_matches || !can_move(board, record.from, record.to) {
            continue;
        }

        let color = board
            .tube_mut(record.from)
            .and_then(|t| t.pop())
            .expect("top ball checked above");
        board
            .tube_mut(record.to)
            .expect("can_move checked the destination")
            .push(color);

        board.moves_mut()[index].is_undone = false;
        applied += 1;

        reclassify(board);
        if board.status().is_terminal() {
            break;
        }
    }
    applied
}

/// Won is checked before stuck so a sorted board classifies as a win.
fn reclassify(board: &mut Board) {
    if is_won(board) {
        board.set_status(GameStatus::Completed);
    } else if is_stuck(board) {
        board.set_status(GameStatus::Failed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::decode_board;

    fn board(text: &str, capacity: usize) -> Board {
        decode_board(text, capacity).unwrap()
    }

    const T1: TubeId = TubeId(1);
    const T2: TubeId = TubeId(2);
    const T3: TubeId = TubeId(3);
    const T4: TubeId = TubeId(4);
    const T5: TubeId = TubeId(5);

    #[test]
    fn test_can_move_rules() {
        let b = board("T1=0,1;T2=1;T3=;T4=0,0,0,0;T5=2", 4);

        assert!(!can_move(&b, T1, T1)); // same tube
        assert!(can_move(&b, T1, T2)); // top colors match
        assert!(can_move(&b, T1, T3)); // empty destination
        assert!(!can_move(&b, T2, TubeId(4))); // destination full
        assert!(!can_move(&b, T3, T1)); // empty source
        assert!(!can_move(&b, T5, T1)); // top colors differ
        assert!(!can_move(&b, TubeId(9), T1)); // unknown tube
    }

    #[test]
    fn test_execute_move_logs_and_renumbers() {
        let mut b = board("T1=0,1;T2=;T3=", 4);

        let record = execute_move(&mut b, T1, T2).unwrap();
        assert_eq!(record.move_number, 1);
        assert_eq!(record.color.index(), 1);
        assert!(!record.is_undone);

        assert_eq!(b.tube(T1).unwrap().count(), 1);
        let top = b.tube(T2).unwrap().top_ball().unwrap();
        assert_eq!(top.position, 0);
    }

    #[test]
    fn test_illegal_move_is_value_not_panic() {
        let mut b = board("T1=0;T2=1", 4);
        assert_eq!(
            execute_move(&mut b, T1, T2),
            Err(MoveError::IllegalMove { from: T1, to: T2 })
        );
        assert_eq!(b.moves_count(), 0);
    }

    #[test]
    fn test_unknown_tube() {
        let mut b = board("T1=0;T2=", 4);
        assert_eq!(
            execute_move(&mut b, TubeId(7), T2),
            Err(MoveError::UnknownTube(TubeId(7)))
        );
    }

    #[test]
    fn test_win_detection_and_finished_guard() {
        // One move from victory: capacity 2, move the 0 home.
        let mut b = board("T1=0;T2=0;T3=1,1;T4=", 2);
        execute_move(&mut b, T1, T2).unwrap();
        assert_eq!(b.status(), GameStatus::Completed);
        assert!(is_won(&b));

        assert_eq!(execute_move(&mut b, T2, T4), Err(MoveError::GameFinished));
    }

    #[test]
    fn test_stuck_detection() {
        // All tubes full with mismatched tops: nowhere to go.
        let b = board("T1=0,1;T2=1,0;T3=2,2", 2);
        assert!(is_stuck(&b));
        assert!(!is_won(&b));
    }

    #[test]
    fn test_move_into_dead_end_marks_failed() {
        // Only legal move is T1 -> T2; taking it leaves no moves.
        let mut b = board("T1=0,1;T2=1;T3=2,2", 2);
        assert_eq!(legal_moves(&b), vec![(T1, T2)]);

        execute_move(&mut b, T1, T2).unwrap();
        assert_eq!(b.status(), GameStatus::Failed);
        assert!(is_stuck(&b));
    }

    #[test]
    fn test_won_and_stuck_disjoint() {
        let won = board("T1=0,0;T2=1,1;T3=;T4=", 2);
        assert!(is_won(&won));
        assert!(!is_stuck(&won));
    }

    #[test]
    fn test_undo_restores_position() {
        let mut b = board("T1=0,1;T2=;T3=2", 4);
        let before = b.state_key();

        execute_move(&mut b, T1, T2).unwrap();
        assert!(undo(&mut b));

        assert_eq!(b.state_key(), before);
        assert!(b.moves()[0].is_undone);
        assert_eq!(b.moves_count(), 0);
        assert!(b.can_redo());
    }

    #[test]
    fn test_undo_without_moves() {
        let mut b = board("T1=0;T2=", 4);
        assert!(!undo(&mut b));
    }

    #[test]
    fn test_undo_reopens_completed_game() {
        let mut b = board("T1=0;T2=0;T3=1,1", 2);
        execute_move(&mut b, T1, T2).unwrap();
        assert_eq!(b.status(), GameStatus::Completed);

        assert!(undo(&mut b));
        assert_eq!(b.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_undo_many_caps_at_batch_limit() {
        let mut b = board("T1=0,1,2,3;T2=;T3=;T4=;T5=", 4);
        execute_move(&mut b, T1, T2).unwrap();
        execute_move(&mut b, T1, T3).unwrap();
        execute_move(&mut b, T1, T4).unwrap();
        execute_move(&mut b, T1, T5).unwrap();

        assert_eq!(undo_many(&mut b, 10), UNDO_BATCH_LIMIT);
        assert_eq!(b.moves_count(), 1);
    }

    #[test]
    fn test_undo_many_stops_when_exhausted() {
        let mut b = board("T1=0,1;T2=;T3=", 4);
        execute_move(&mut b, T1, T2).unwrap();
        assert_eq!(undo_many(&mut b, 3), 1);
    }

    #[test]
    fn test_redo_reapplies_in_ascending_order() {
        let mut b = board("T1=0,1,2;T2=;T3=;T4=", 4);
        execute_move(&mut b, T1, T2).unwrap(); // move 1: color 2
        execute_move(&mut b, T1, T3).unwrap(); // move 2: color 1
        undo(&mut b); // undoes move 2
        undo(&mut b); // undoes move 1

        assert_eq!(redo(&mut b, 2), 2);
        assert!(!b.moves()[0].is_undone);
        assert!(!b.moves()[1].is_undone);
        assert_eq!(b.tube(T2).unwrap().top_color().map(|c| c.index()), Some(2));
        assert_eq!(b.tube(T3).unwrap().top_color().map(|c| c.index()), Some(1));
    }

    #[test]
    fn test_redo_skips_now_illegal_entries() {
        let mut b = board("T1=0,1;T2=;T3=0,0,0", 4);
        execute_move(&mut b, T1, T2).unwrap(); // 1 -> T2
        undo(&mut b);
        // Fill T2 so the undone move can no longer land there.
        execute_move(&mut b, T3, T2).unwrap();
        execute_move(&mut b, T3, T2).unwrap();
        execute_move(&mut b, T3, T2).unwrap();
        execute_move(&mut b, T3, T2).unwrap_err(); // T3 empty now

        assert_eq!(redo(&mut b, 1), 0);
        assert!(b.moves()[0].is_undone); // flag kept, not repaired
    }

    #[test]
    fn test_redo_partial_count() {
        let mut b = board("T1=0,1,2;T2=;T3=;T4=", 4);
        execute_move(&mut b, T1, T2).unwrap();
        execute_move(&mut b, T1, T3).unwrap();
        undo(&mut b);
        undo(&mut b);

        assert_eq!(redo(&mut b, 1), 1);
        assert_eq!(b.moves_count(), 1);
        assert!(b.can_redo());
    }

    #[test]
    fn test_legal_moves_enumeration_order() {
        let b = board("T1=0;T2=0;T3=", 2);
        let moves = legal_moves(&b);
        assert_eq!(
            moves,
            vec![(T1, T2), (T1, T3), (T2, T1), (T2, T3)]
        );
    }
}
