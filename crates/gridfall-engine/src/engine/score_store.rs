use std::{collections::HashMap, fmt};

/// Key-value persistence seam for the high score. The engine only ever uses
/// the key [`HIGH_SCORE_KEY`](crate::HIGH_SCORE_KEY); hosts decide where the
/// value actually lives (a JSON file, memory, nothing).
pub trait ScoreStore: fmt::Debug {
    fn get(&self, key: &str) -> Option<u64>;
    fn set(&mut self, key: &str, value: u64);
}

/// In-memory store for tests and storage-free hosts.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    values: HashMap<String, u64>,
}

impl MemoryScoreStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn get(&self, key: &str) -> Option<u64> {
        self.values.get(key).copied()
    }

    fn set(&mut self, key: &str, value: u64) {
        self.values.insert(key.to_owned(), value);
    }
}
