//! Cache management commands

use crate::cache::CacheStore;
use crate::cli::args::{CacheArgs, OutputFormat};
use crate::error::Result;
use crate::output;

/// Handle cache commands
pub fn cache(store: &CacheStore, args: &CacheArgs, format: OutputFormat) -> Result<String> {
    if args.clean {
        clean(store, format)
    } else if args.history {
        history(store, format)
    } else {
        output::format_cache_status(&store.status(), format)
    }
}

fn clean(store: &CacheStore, format: OutputFormat) -> Result<String> {
    let removed = {
        let _lock = store.lock()?;
        store.clear()?
    };
    output::format_clear(removed, format)
}

fn history(store: &CacheStore, format: OutputFormat) -> Result<String> {
    let doc = store.load()?;
    output::format_history(doc.history(), format)
}
