//! Cache file lifecycle: load, save, clear, and cross-process locking

use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::Serialize;
use tracing::{debug, info};

use super::atomic;
use super::document::CacheDocument;
use crate::error::{HolocronError, Result};

/// Owner of the on-disk cache document
#[derive(Debug, Clone)]
pub struct CacheStore {
    cache_file: PathBuf,
    lock_file: PathBuf,
}

impl CacheStore {
    /// Create a store for the given cache file
    pub fn new(cache_file: impl Into<PathBuf>) -> Self {
        let cache_file = cache_file.into();
        let mut lock_name = cache_file
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "cache.json".into());
        lock_name.push(".lock");

        Self {
            lock_file: cache_file.with_file_name(lock_name),
            cache_file,
        }
    }

    /// Location of the cache document
    pub fn path(&self) -> &Path {
        &self.cache_file
    }

    /// Load the whole document; a missing file yields an empty one
    pub fn load(&self) -> Result<CacheDocument> {
        let doc = atomic::read_json::<CacheDocument>(&self.cache_file)?.unwrap_or_default();
        debug!(
            entries = doc.len(),
            history = doc.history().len(),
            "Loaded cache from {}",
            self.cache_file.display()
        );
        Ok(doc)
    }

    /// Replace the persisted document with `doc`
    pub fn save(&self, doc: &CacheDocument) -> Result<()> {
        atomic::write_json(&self.cache_file, doc)
    }

    /// Remove the cache file. Returns whether a file was actually removed.
    pub fn clear(&self) -> Result<bool> {
        match fs::remove_file(&self.cache_file) {
            Ok(()) => {
                info!("Removed cache {}", self.cache_file.display());
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Take the exclusive cross-process lock, blocking until it is free
    pub fn lock(&self) -> Result<CacheLock> {
        if let Some(parent) = self.lock_file.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.lock_file)?;
        file.lock_exclusive()?;
        debug!("Locked {}", self.lock_file.display());

        Ok(CacheLock { file })
    }

    /// Describe the cache file without failing on a damaged one
    pub fn status(&self) -> CacheStatus {
        let mut status = CacheStatus {
            path: self.cache_file.clone(),
            exists: self.cache_file.exists(),
            size_bytes: None,
            entries: None,
            history: None,
            corrupt: false,
            error: None,
        };

        if !status.exists {
            return status;
        }

        status.size_bytes = fs::metadata(&self.cache_file).ok().map(|m| m.len());
        match self.load() {
            Ok(doc) => {
                status.entries = Some(doc.len());
                status.history = Some(doc.history().len());
            }
            Err(HolocronError::CorruptCache { .. }) => status.corrupt = true,
            Err(e) => status.error = Some(e.to_string()),
        }

        status
    }
}

/// Held for the duration of a load → mutate → save sequence
#[derive(Debug)]
pub struct CacheLock {
    file: File,
}

impl Drop for CacheLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

/// Cache file status
#[derive(Debug, Serialize)]
pub struct CacheStatus {
    pub path: PathBuf,
    pub exists: bool,
    pub size_bytes: Option<u64>,
    pub entries: Option<usize>,
    pub history: Option<usize>,
    pub corrupt: bool,
    /// Why the file could not be read, when it exists but is unreadable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
