use chrono::{DateTime, Local, Utc};
use colored::Colorize;

use crate::cache::{CacheStatus, HistoryEntry, Outcome};
use crate::search::{ResultSource, SearchReport};
use crate::swapi::{Character, Homeworld};

/// Timestamp layout used for cache and history times
const TIME_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Width of the search term column in the history table
const TERM_WIDTH: usize = 25;

/// Width of the result column in the history table
const RESULT_WIDTH: usize = 10;

/// Render a UTC timestamp in local time
fn local_time(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format(TIME_FORMAT).to_string()
}

/// Format the result of a search
pub fn format_search(report: &SearchReport) -> String {
    let Some(ref character) = report.character else {
        return format!(
            "{} {}",
            "✗".red(),
            report
                .failure
                .as_deref()
                .unwrap_or("The force is not strong within you.")
        );
    };

    let mut output = String::new();

    if report.source == Some(ResultSource::Cache) {
        let suffix = if report.homeworld.is_some() {
            " with homeworld"
        } else {
            ""
        };
        output.push_str(&format!(
            "{}\n",
            format!("Using cached data for '{}'{}...", report.term, suffix).dimmed()
        ));
    }

    output.push_str(&format_character(character));

    if let Some(ref homeworld) = report.homeworld {
        output.push('\n');
        output.push_str(&format_homeworld(homeworld));
    }

    if let Some(ref error) = report.homeworld_error {
        output.push_str(&format!("\n{} {}\n", "!".yellow(), error.yellow()));
    }

    if let Some(ref cached_at) = report.cached_at {
        output.push_str(&format!("\n{} {}\n", "Cached at:".cyan(), local_time(cached_at)));
    }

    output.trim_end().to_string()
}

fn format_character(character: &Character) -> String {
    let mut output = String::new();
    output.push_str(&format!("{} {}\n", "Name:".cyan(), character.name.bold()));
    output.push_str(&format!("{} {}\n", "Height:".cyan(), character.height));
    output.push_str(&format!("{} {}\n", "Mass:".cyan(), character.mass));
    output.push_str(&format!("{} {}\n", "Birth Year:".cyan(), character.birth_year));
    output
}

fn format_homeworld(homeworld: &Homeworld) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", "Homeworld".bold()));
    output.push_str(&"-".repeat(16));
    output.push('\n');
    output.push_str(&format!("{} {}\n", "Name:".cyan(), homeworld.name));
    output.push_str(&format!("{} {}\n", "Population:".cyan(), homeworld.population));

    if let Some((years, days)) = homeworld.earth_comparison() {
        output.push_str(&format!(
            "On {}, 1 year on Earth is {:.2} years and 1 day is {:.2} days.\n",
            homeworld.name, years, days
        ));
    }

    output
}

/// Format the search history as a table
pub fn format_history(history: &[HistoryEntry]) -> String {
    if history.is_empty() {
        return "No search history available.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{}\n",
        format!(
            "{:<tw$}{:<rw$}{}",
            "Search Term",
            "Result",
            "Timestamp",
            tw = TERM_WIDTH,
            rw = RESULT_WIDTH
        )
        .bold()
    ));
    output.push_str(&"-".repeat(60));
    output.push('\n');

    for entry in history {
        let result = match entry.outcome {
            Outcome::Success => entry.outcome.to_string().green(),
            Outcome::Failure => entry.outcome.to_string().red(),
        };
        output.push_str(&format!(
            "{:<tw$}{:<rw$}{}\n",
            entry.search_term,
            result,
            local_time(&entry.timestamp),
            tw = TERM_WIDTH,
            rw = RESULT_WIDTH
        ));
    }

    output.trim_end().to_string()
}

/// Format the outcome of `cache --clean`
pub fn format_clear(removed: bool) -> String {
    if removed {
        format!("{} Cache has been removed.", "✓".green())
    } else {
        "No cache file found.".to_string()
    }
}

/// Format cache status information
pub fn format_cache_status(status: &CacheStatus) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", "Cache Status".bold()));
    output.push_str(&format!("Location: {}\n\n", status.path.display()));

    if !status.exists {
        output.push_str(&format!("  {}\n", "Not cached".dimmed()));
        return output.trim_end().to_string();
    }

    if status.corrupt {
        output.push_str(&format!(
            "  {}\n",
            "Corrupt: run 'holocron cache --clean' to reset".red()
        ));
    }
    if let Some(ref error) = status.error {
        output.push_str(&format!("  {} {}\n", "Unreadable:".red(), error));
    }
    if let Some(entries) = status.entries {
        output.push_str(&format!("  Entries: {}\n", entries));
    }
    if let Some(history) = status.history {
        output.push_str(&format!("  Searches: {}\n", history));
    }
    if let Some(size) = status.size_bytes {
        output.push_str(&format!("  Size: {} bytes\n", size));
    }

    output.trim_end().to_string()
}
