//! In-memory identifier -> points store.
//!
//! Lives for the process lifetime, no persistence. DashMap serializes
//! writes and allows concurrent reads, so handlers share one store without
//! extra locking.

use std::collections::HashMap;

use dashmap::DashMap;

#[derive(Debug, Default)]
pub struct PointsStore {
    entries: DashMap<String, u32>,
}

impl PointsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, id: String, points: u32) {
        self.entries.insert(id, points);
    }

    pub fn get(&self, id: &str) -> Option<u32> {
        self.entries.get(id).map(|entry| *entry.value())
    }

    /// Point-in-time copy of every entry, for the listing endpoint.
    pub fn snapshot(&self) -> HashMap<String, u32> {
        self.entries
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
