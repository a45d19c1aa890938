//! Atomic JSON persistence.
//!
//! Writes go to a temp file next to the target, are fsynced, then renamed
//! over the target so readers see either the old or the new document.

use serde::{de::DeserializeOwned, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing::debug;

use crate::error::{HolocronError, Result};

/// Read and parse a JSON file.
///
/// Returns `None` if the file doesn't exist. A file that exists but does not
/// parse is reported as `CorruptCache`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    // Raw bytes, so invalid UTF-8 surfaces as a parse error
    let contents = match fs::read(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    serde_json::from_slice(&contents)
        .map(Some)
        .map_err(|source| HolocronError::CorruptCache {
            path: path.to_path_buf(),
            source,
        })
}

/// Write data to a JSON file atomically.
pub fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let serialized = serde_json::to_string_pretty(data)?;
    let temp_path = temp_path_for(path);

    let written = write_synced(&temp_path, serialized.as_bytes());
    if let Err(e) = written.and_then(|()| fs::rename(&temp_path, path)) {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }

    debug!("Atomically wrote {}", path.display());
    Ok(())
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    file.write_all(bytes)?;
    file.flush()?;
    file.sync_all()
}

/// Temp file beside `path`, unique per process
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "cache.json".into());
    name.push(format!(".{}.tmp", process::id()));
    path.with_file_name(name)
}
