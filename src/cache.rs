//! Board snapshot caching.
//!
//! Sessions serve repeated reads of the same position from a cache and
//! invalidate the entry whenever the underlying board mutates. The
//! trait seam lets callers swap the in-memory store for an external
//! one, or disable caching entirely with [`NoCache`].

use std::time::{Duration, Instant};

use rustc_hash::FxHashMap;

use crate::core::Board;

/// Storage for board snapshots keyed by session id.
pub trait BoardCache {
    /// Fetch a live (non-expired) snapshot.
    fn get(&self, key: &str) -> Option<Board>;

    /// Store a snapshot, replacing any previous entry.
    fn put(&mut self, key: &str, board: &Board);

    /// Drop the snapshot for `key`, if any.
    fn invalidate(&mut self, key: &str);
}

/// In-memory cache with per-entry expiry.
#[derive(Clone, Debug)]
pub struct MemoryCache {
    ttl: Duration,
    entries: FxHashMap<String, (Instant, Board)>,
}

impl MemoryCache {
    /// Default snapshot lifetime.
    pub const DEFAULT_TTL: Duration = Duration::from_secs(30 * 60);

    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(Self::DEFAULT_TTL)
    }

    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: FxHashMap::default(),
        }
    }

    /// Number of entries, expired ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every expired entry.
    pub fn purge_expired(&mut self) {
        let now = Instant::now();
        self.entries
            .retain(|_, (stored, _)| now.duration_since(*stored) < self.ttl);
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardCache for MemoryCache {
    fn get(&self, key: &str) -> Option<Board> {
        let (stored, board) = self.entries.get(key)?;
        if stored.elapsed() >= self.ttl {
            return None;
        }
        Some(board.clone())
    }

    fn put(&mut self, key: &str, board: &Board) {
        self.entries
            .insert(key.to_owned(), (Instant::now(), board.clone()));
    }

    fn invalidate(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Cache that stores nothing. Every read misses.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCache;

impl BoardCache for NoCache {
    fn get(&self, _key: &str) -> Option<Board> {
        None
    }

    fn put(&mut self, _key: &str, _board: &Board) {}

    fn invalidate(&mut self, _key: &str) {}
}
