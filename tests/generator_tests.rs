//! Level generation and difficulty policy integration tests.
//!
//! The headline property: every generated level ships a solution that
//! actually replays to a completed board.

use ball_sort_engine::{
    execute_move, is_won, params_for_level, validate_level, Difficulty, GameStatus,
    LevelGenerator,
};
use proptest::prelude::*;

// =============================================================================
// Difficulty policy
// =============================================================================

#[test]
fn test_policy_is_pure_and_idempotent() {
    for level in [1, 7, 20, 45, 120] {
        assert_eq!(params_for_level(level), params_for_level(level));
    }
}

#[test]
fn test_difficulty_tiers() {
    assert_eq!(Difficulty::for_level(1), Difficulty::Easy);
    assert_eq!(Difficulty::for_level(10), Difficulty::Easy);
    assert_eq!(Difficulty::for_level(11), Difficulty::Medium);
    assert_eq!(Difficulty::for_level(30), Difficulty::Medium);
    assert_eq!(Difficulty::for_level(31), Difficulty::Hard);
    assert_eq!(Difficulty::for_level(50), Difficulty::Hard);
    assert_eq!(Difficulty::for_level(51), Difficulty::Expert);
}

#[test]
fn test_tube_floor_always_holds() {
    for level in 1..=400 {
        let params = params_for_level(level);
        assert!(
            params.satisfies_tube_floor(),
            "tube floor violated at level {level}: {params:?}"
        );
    }
}

#[test]
fn test_color_count_never_exceeds_palette() {
    for level in 1..=1_000 {
        assert!(params_for_level(level).colors <= 15);
    }
}

// =============================================================================
// Generation
// =============================================================================

#[test]
fn test_generation_is_seed_deterministic() {
    let mut a = LevelGenerator::from_seed(99);
    let mut b = LevelGenerator::from_seed(99);
    for level in 1..=5 {
        let la = a.generate(level);
        let lb = b.generate(level);
        assert_eq!(la.initial_state, lb.initial_state);
        assert_eq!(la.solution, lb.solution);
    }
}

#[test]
fn test_different_seeds_diverge() {
    let mut a = LevelGenerator::from_seed(1);
    let mut b = LevelGenerator::from_seed(2);
    // Level 5 has enough material that identical output would be a bug.
    assert_ne!(a.generate(5).initial_state, b.generate(5).initial_state);
}

#[test]
fn test_generated_level_is_never_already_solved() {
    let mut generator = LevelGenerator::from_seed(7);
    for level in 1..=30 {
        let generated = generator.generate(level);
        let board = generated.board().unwrap();
        assert!(!is_won(&board), "level {level} came out pre-solved");
    }
}

#[test]
fn test_generated_level_validates() {
    let mut generator = LevelGenerator::from_seed(7);
    for level in [1, 4, 12, 25, 60] {
        let generated = generator.generate(level);
        assert!(validate_level(&generated.initial_state));
    }
}

#[test]
fn test_solution_replays_to_completion() {
    let mut generator = LevelGenerator::from_seed(42);
    for level in [1, 2, 3, 8, 15, 35, 75] {
        let generated = generator.generate(level);
        let mut board = generated.board().unwrap();
        for &(from, to) in &generated.solution {
            execute_move(&mut board, from, to)
                .unwrap_or_else(|e| panic!("level {level}: {e}"));
        }
        assert_eq!(board.status(), GameStatus::Completed);
    }
}

#[test]
fn test_ball_counts_match_params() {
    let mut generator = LevelGenerator::from_seed(11);
    for level in [1, 6, 18, 40] {
        let generated = generator.generate(level);
        let board = generated.board().unwrap();
        assert_eq!(board.ball_count(), generated.params.total_balls());
        assert_eq!(board.tube_count(), generated.params.tubes);
    }
}

#[test]
fn test_validate_rejects_uneven_colors() {
    assert!(!validate_level("T1=0,0,1;T2="));
    assert!(validate_level("T1=0,0;T2=1,1"));
    assert!(validate_level("T1=;T2="));
    assert!(!validate_level("garbage"));
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Solvability by construction, across seeds and a broad level range.
    #[test]
    fn prop_every_level_ships_a_working_solution(
        seed in any::<u64>(),
        level in 1u32..=120,
    ) {
        let mut generator = LevelGenerator::from_seed(seed);
        let generated = generator.generate(level);
        let mut board = generated.board().unwrap();
        for &(from, to) in &generated.solution {
            prop_assert!(execute_move(&mut board, from, to).is_ok());
        }
        prop_assert!(is_won(&board));
        prop_assert!(!generated.solution.is_empty());
    }
}
