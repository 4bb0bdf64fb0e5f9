use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Best time reported when a difficulty has no record yet.
pub const NO_RECORD: u32 = 999;

/// Key-value store for best times, owned by the host.
pub trait HighScoreStore {
    fn get(&self, key: &str) -> Option<u32>;
    fn set(&mut self, key: &str, seconds: u32);
}

/// In-memory store, serializable so the host can save it wherever it likes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryScoreStore {
    records: HashMap<String, u32>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl HighScoreStore for MemoryScoreStore {
    fn get(&self, key: &str) -> Option<u32> {
        self.records.get(key).copied()
    }

    fn set(&mut self, key: &str, seconds: u32) {
        self.records.insert(key.to_owned(), seconds);
    }
}

impl<S: HighScoreStore + ?Sized> HighScoreStore for &mut S {
    fn get(&self, key: &str) -> Option<u32> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, seconds: u32) {
        (**self).set(key, seconds)
    }
}
