pub mod json;
pub mod pretty;

use crate::cache::{CacheStatus, HistoryEntry};
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::search::SearchReport;

/// Format a search report based on output format
pub fn format_search(report: &SearchReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_search(report)),
        OutputFormat::Json => json::format_search(report),
    }
}

/// Format the search history based on output format
pub fn format_history(history: &[HistoryEntry], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_history(history)),
        OutputFormat::Json => json::format_history(history),
    }
}

/// Format the result of clearing the cache based on output format
pub fn format_clear(removed: bool, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_clear(removed)),
        OutputFormat::Json => json::format_clear(removed),
    }
}

/// Format cache status based on output format
pub fn format_cache_status(status: &CacheStatus, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_cache_status(status)),
        OutputFormat::Json => json::format_cache_status(status),
    }
}
