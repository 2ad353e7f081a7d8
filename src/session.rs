//! Game session management.
//!
//! A [`Session`] owns one board plus a snapshot cache and routes every
//! mutation through the engine, invalidating the cached snapshot on
//! each change. Reads are served from the cache when a live snapshot
//! exists.

use crate::cache::{BoardCache, MemoryCache};
use crate::core::{Board, GameStatus, MoveRecord, TubeId};
use crate::engine::{self, MoveError};
use crate::hint::{HintEngine, HintKind, HintResult};

/// A single player's game in progress.
#[derive(Clone, Debug)]
pub struct Session<C: BoardCache = MemoryCache> {
    id: String,
    board: Board,
    cache: C,
    hints: HintEngine,
}

impl Session<MemoryCache> {
    /// Start a session with the default in-memory cache.
    #[must_use]
    pub fn new(id: impl Into<String>, board: Board) -> Self {
        Self::with_cache(id, board, MemoryCache::new())
    }
}

impl<C: BoardCache> Session<C> {
    #[must_use]
    pub fn with_cache(id: impl Into<String>, board: Board, cache: C) -> Self {
        Self {
            id: id.into(),
            board,
            cache,
            hints: HintEngine::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current board snapshot, cached between mutations.
    pub fn board(&mut self) -> Board {
        if let Some(snapshot) = self.cache.get(&self.id) {
            return snapshot;
        }
        let snapshot = self.board.clone();
        self.cache.put(&self.id, &snapshot);
        snapshot
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.board.status()
    }

    /// Play one move.
    pub fn play(&mut self, from: TubeId, to: TubeId) -> Result<MoveRecord, MoveError> {
        let record = engine::execute_move(&mut self.board, from, to)?;
        self.cache.invalidate(&self.id);
        Ok(record)
    }

    /// Undo the most recent active move. Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        let undone = engine::undo(&mut self.board);
        if undone {
            self.cache.invalidate(&self.id);
        }
        undone
    }

    /// Undo up to `n` moves, capped at the batch limit.
    pub fn undo_many(&mut self, n: usize) -> usize {
        let undone = engine::undo_many(&mut self.board, n);
        if undone > 0 {
            self.cache.invalidate(&self.id);
        }
        undone
    }

    /// Reapply up to `n` undone moves that are still legal.
    pub fn redo(&mut self, n: usize) -> usize {
        let redone = engine::redo(&mut self.board, n);
        if redone > 0 {
            self.cache.invalidate(&self.id);
        }
        redone
    }

    /// Request a hint. Bumps the hint counter on success, which
    /// invalidates the cached snapshot.
    pub fn hint(&mut self, kind: HintKind) -> Option<HintResult> {
        let result = self.hints.hint(&mut self.board, kind);
        if result.is_some() {
            self.cache.invalidate(&self.id);
        }
        result
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        engine::is_won(&self.board)
    }

    #[must_use]
    pub fn is_stuck(&self) -> bool {
        engine::is_stuck(&self.board)
    }
}
