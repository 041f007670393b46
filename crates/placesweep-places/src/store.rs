//! Deduplicated place store for one sweep session.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::record::PlaceRecord;

/// Records keyed by place identifier, plus the set of identifiers whose
/// details have already been requested.
///
/// The record map is append-only and first-write-wins. Identifiers that were
/// fetched but not stored (permanently closed, unusable response) stay in
/// `attempted` so they are never fetched twice in one session.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct PlaceStore {
    records: BTreeMap<String, PlaceRecord>,
    #[serde(skip)]
    attempted: HashSet<String>,
}

impl PlaceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` once details for `place_id` have been requested, whether or
    /// not a record was stored.
    #[must_use]
    pub fn is_known(&self, place_id: &str) -> bool {
        self.attempted.contains(place_id) || self.records.contains_key(place_id)
    }

    /// Marks `place_id` as attempted. Returns `false` if it already was.
    pub fn mark_attempted(&mut self, place_id: &str) -> bool {
        self.attempted.insert(place_id.to_owned())
    }

    /// Inserts `record` unless its identifier is already stored.
    /// Returns `true` when the record was added.
    pub fn insert(&mut self, record: PlaceRecord) -> bool {
        self.attempted.insert(record.place_id.clone());
        if self.records.contains_key(&record.place_id) {
            return false;
        }
        self.records.insert(record.place_id.clone(), record);
        true
    }

    #[must_use]
    pub fn contains(&self, place_id: &str) -> bool {
        self.records.contains_key(place_id)
    }

    #[must_use]
    pub fn get(&self, place_id: &str) -> Option<&PlaceRecord> {
        self.records.get(place_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Identifiers fetched without producing a record.
    #[must_use]
    pub fn tombstone_count(&self) -> usize {
        self.attempted
            .iter()
            .filter(|id| !self.records.contains_key(*id))
            .count()
    }
}
