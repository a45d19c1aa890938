//! In-memory model of the cache document

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::swapi::{Character, Homeworld};

/// Result of a single search attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => f.write_str("Success"),
            Self::Failure => f.write_str("Failure"),
        }
    }
}

/// A cached lookup, keyed by the verbatim search term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    #[serde(rename = "character_data")]
    pub character: Character,
    #[serde(rename = "homeworld_data", default)]
    pub homeworld: Option<Homeworld>,
    #[serde(rename = "timestamp")]
    pub fetched_at: DateTime<Utc>,
}

/// One line of the search history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "character_name")]
    pub search_term: String,
    #[serde(rename = "result")]
    pub outcome: Outcome,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(search_term: impl Into<String>, outcome: Outcome, timestamp: DateTime<Utc>) -> Self {
        Self {
            search_term: search_term.into(),
            outcome,
            timestamp,
        }
    }
}

/// Everything persisted in the cache file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheDocument {
    #[serde(default)]
    entries: BTreeMap<String, CacheEntry>,
    #[serde(default)]
    search_history: Vec<HistoryEntry>,
}

impl CacheDocument {
    /// Look up the entry for an exact search term
    pub fn get(&self, term: &str) -> Option<&CacheEntry> {
        self.entries.get(term)
    }

    /// Store a freshly fetched character for `term`.
    ///
    /// A homeworld already cached for the term survives an upsert that
    /// carries none.
    pub fn upsert(
        &mut self,
        term: &str,
        character: Character,
        homeworld: Option<Homeworld>,
        fetched_at: DateTime<Utc>,
    ) -> &CacheEntry {
        let homeworld =
            homeworld.or_else(|| self.entries.get(term).and_then(|e| e.homeworld.clone()));

        self.entries.insert(
            term.to_string(),
            CacheEntry {
                character,
                homeworld,
                fetched_at,
            },
        );
        &self.entries[term]
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a history line. Never deduplicates or reorders.
    pub fn append_history(&mut self, entry: HistoryEntry) {
        self.search_history.push(entry);
    }

    /// Full search history in insertion order
    pub fn history(&self) -> &[HistoryEntry] {
        &self.search_history
    }
}
