use crate::cache::CacheStore;
use crate::cli::args::{OutputFormat, SearchArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output;
use crate::search::SearchOrchestrator;
use crate::swapi::CharacterSource;

/// Handle the search command
///
/// A search that finds nothing is still recorded in the history. Its report
/// is printed here, then returned as `SearchFailed` so the process exits
/// non-zero.
pub fn search<S: CharacterSource>(
    source: &S,
    store: &CacheStore,
    config: &Config,
    args: &SearchArgs,
    format: OutputFormat,
) -> Result<String> {
    let term = args.term()?;

    let report = SearchOrchestrator::new(store, source)
        .with_partial_hit(config.search.partial_hit)
        .search(&term, args.world)?;

    let rendered = output::format_search(&report, format)?;
    if report.outcome.is_success() {
        return Ok(rendered);
    }

    println!("{rendered}");
    report.into_result().map(|_| String::new())
}
