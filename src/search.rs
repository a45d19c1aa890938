//! Cache-backed character search
//!
//! Decides between serving from cache and asking the remote source, merges
//! partial entries, and records every attempt in the history log. Each call
//! is one locked load → mutate → save transaction.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::cache::{CacheDocument, CacheEntry, CacheStore, HistoryEntry, Outcome};
use crate::config::PartialHitPolicy;
use crate::error::{HolocronError, Result};
use crate::swapi::{Character, CharacterSource, Homeworld};

/// Where the data in a report came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultSource {
    Cache,
    Remote,
}

/// Display-ready result of one search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchReport {
    pub term: String,
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ResultSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character: Option<Character>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homeworld: Option<Homeworld>,
    /// Set only when the data was served from cache
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached_at: Option<DateTime<Utc>>,
    /// Homeworld was requested but could not be retrieved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homeworld_error: Option<String>,
    /// Why the search failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl SearchReport {
    fn from_cache(term: &str, entry: &CacheEntry, with_homeworld: bool) -> Self {
        Self {
            term: term.to_string(),
            outcome: Outcome::Success,
            source: Some(ResultSource::Cache),
            character: Some(entry.character.clone()),
            homeworld: entry.homeworld.clone().filter(|_| with_homeworld),
            cached_at: Some(entry.fetched_at),
            homeworld_error: None,
            failure: None,
        }
    }

    fn fetched(term: &str, entry: &CacheEntry, with_homeworld: bool) -> Self {
        Self {
            source: Some(ResultSource::Remote),
            cached_at: None,
            ..Self::from_cache(term, entry, with_homeworld)
        }
    }

    fn failed(term: &str, reason: String) -> Self {
        Self {
            term: term.to_string(),
            outcome: Outcome::Failure,
            source: None,
            character: None,
            homeworld: None,
            cached_at: None,
            homeworld_error: None,
            failure: Some(reason),
        }
    }

    fn with_homeworld_error(mut self, error: Option<String>) -> Self {
        self.homeworld_error = error;
        self
    }

    /// Convert a failed report into the error the CLI exits with
    pub fn into_result(self) -> Result<Self> {
        if self.outcome.is_success() {
            return Ok(self);
        }
        Err(HolocronError::SearchFailed {
            reason: self
                .failure
                .unwrap_or_else(|| "unknown failure".to_string()),
            term: self.term,
        })
    }
}

/// What to do for a term, decided before any remote call
enum Plan {
    Cached(SearchReport),
    CompleteHomeworld(CacheEntry),
    Fetch,
}

/// Search engine over a cache store and a remote source
pub struct SearchOrchestrator<'a, S: CharacterSource> {
    store: &'a CacheStore,
    source: &'a S,
    partial_hit: PartialHitPolicy,
}

impl<'a, S: CharacterSource> SearchOrchestrator<'a, S> {
    pub fn new(store: &'a CacheStore, source: &'a S) -> Self {
        Self {
            store,
            source,
            partial_hit: PartialHitPolicy::default(),
        }
    }

    /// Choose how a cached character without homeworld is completed
    pub fn with_partial_hit(mut self, policy: PartialHitPolicy) -> Self {
        self.partial_hit = policy;
        self
    }

    /// Look up `term`, optionally with its homeworld.
    ///
    /// Remote failures become `Outcome::Failure` in the report; only cache
    /// errors are returned as `Err`. Every call appends exactly one history
    /// entry and writes the cache once.
    pub fn search(&self, term: &str, want_homeworld: bool) -> Result<SearchReport> {
        let _lock = self.store.lock()?;
        let mut doc = self.store.load()?;
        let now = Utc::now();

        let report = self.resolve(&mut doc, term, want_homeworld, now);

        doc.append_history(HistoryEntry::new(term, report.outcome, now));
        self.store.save(&doc)?;

        info!(term, outcome = %report.outcome, source = ?report.source, "search finished");
        Ok(report)
    }

    fn resolve(
        &self,
        doc: &mut CacheDocument,
        term: &str,
        want_homeworld: bool,
        now: DateTime<Utc>,
    ) -> SearchReport {
        let plan = match doc.get(term) {
            Some(entry) if !want_homeworld => {
                debug!(term, "cache hit");
                Plan::Cached(SearchReport::from_cache(term, entry, false))
            }
            Some(entry) if entry.homeworld.is_some() => {
                debug!(term, "cache hit with homeworld");
                Plan::Cached(SearchReport::from_cache(term, entry, true))
            }
            Some(entry) => {
                debug!(term, policy = %self.partial_hit, "partial hit, homeworld missing");
                match self.partial_hit {
                    PartialHitPolicy::HomeworldOnly => Plan::CompleteHomeworld(entry.clone()),
                    PartialHitPolicy::Refetch => Plan::Fetch,
                }
            }
            None => {
                debug!(term, "cache miss");
                Plan::Fetch
            }
        };

        match plan {
            Plan::Cached(report) => report,
            Plan::CompleteHomeworld(entry) => self.complete_homeworld(doc, term, entry, now),
            Plan::Fetch => self.fetch(doc, term, want_homeworld, now),
        }
    }

    /// Fetch the character (and optionally homeworld) and cache it
    fn fetch(
        &self,
        doc: &mut CacheDocument,
        term: &str,
        want_homeworld: bool,
        now: DateTime<Utc>,
    ) -> SearchReport {
        let character = match self.source.find_character(term) {
            Ok(character) => character,
            Err(e) => {
                info!(term, error = %e, "character lookup failed");
                return SearchReport::failed(term, failure_reason(term, &e));
            }
        };

        let (homeworld, homeworld_error) = if want_homeworld {
            self.fetch_homeworld(&character)
        } else {
            (None, None)
        };

        let entry = doc.upsert(term, character, homeworld, now);
        SearchReport::fetched(term, entry, want_homeworld).with_homeworld_error(homeworld_error)
    }

    /// Add the missing homeworld to an entry whose character is already cached
    fn complete_homeworld(
        &self,
        doc: &mut CacheDocument,
        term: &str,
        cached: CacheEntry,
        now: DateTime<Utc>,
    ) -> SearchReport {
        match self.fetch_homeworld(&cached.character) {
            (Some(homeworld), _) => {
                let entry = doc.upsert(term, cached.character, Some(homeworld), now);
                SearchReport::fetched(term, entry, true)
            }
            // Nothing new was learned; keep the entry and its timestamp as they are
            (None, error) => {
                SearchReport::from_cache(term, &cached, true).with_homeworld_error(error)
            }
        }
    }

    fn fetch_homeworld(&self, character: &Character) -> (Option<Homeworld>, Option<String>) {
        let Some(reference) = character.homeworld.as_deref() else {
            debug!(character = %character.name, "no homeworld reference");
            return (None, None);
        };

        match self.source.fetch_homeworld(reference) {
            Ok(homeworld) => (Some(homeworld), None),
            Err(e) => {
                info!(reference, error = %e, "homeworld lookup failed");
                (
                    None,
                    Some(format!("Failed to retrieve homeworld data from the API: {e}")),
                )
            }
        }
    }
}

fn failure_reason(term: &str, error: &HolocronError) -> String {
    if error.is_transport() {
        format!("Failed to retrieve character data from the API: {error}")
    } else {
        format!("No data found or results in the API response for '{term}'")
    }
}
