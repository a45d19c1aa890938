use serde::Serialize;

use crate::cache::{CacheStatus, HistoryEntry};
use crate::error::Result;
use crate::search::SearchReport;

/// Format a search report as JSON
pub fn format_search(report: &SearchReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Format the search history as JSON
pub fn format_history(history: &[HistoryEntry]) -> Result<String> {
    Ok(serde_json::to_string_pretty(history)?)
}

/// Format the outcome of `cache --clean` as JSON
pub fn format_clear(removed: bool) -> Result<String> {
    let json = serde_json::json!({
        "status": if removed { "removed" } else { "absent" },
    });
    Ok(serde_json::to_string_pretty(&json)?)
}

/// Format cache status as JSON
pub fn format_cache_status(status: &CacheStatus) -> Result<String> {
    format_json(status)
}

/// Format any serializable value as JSON
pub fn format_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
