//! Local cache of character lookups and the search history
//!
//! The whole cache lives in one JSON document that is loaded at the start of
//! a command and written back atomically after every mutation.

mod atomic;
mod document;
mod store;

pub use document::{CacheDocument, CacheEntry, HistoryEntry, Outcome};
pub use store::{CacheLock, CacheStatus, CacheStore};
