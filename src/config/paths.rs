use std::fs;
use std::path::PathBuf;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use crate::error::Result;

/// Manages paths for Holocron configuration and data
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory (~/.holocron)
    pub root: PathBuf,
    /// Configuration file path (~/.holocron/config.toml)
    pub config_file: PathBuf,
    /// Default cache document path (~/.holocron/cache.json)
    pub cache_file: PathBuf,
}

impl Paths {
    /// Create a new Paths instance using the user's home directory
    pub fn new() -> Result<Self> {
        let home = std::env::var("HOME")?;
        Ok(Self::with_root(PathBuf::from(home).join(".holocron")))
    }

    /// Create a Paths instance rooted at an explicit directory
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.toml"),
            cache_file: root.join("cache.json"),
            root,
        }
    }

    /// Ensure the root directory exists with proper permissions
    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.root)?;

        #[cfg(unix)]
        {
            let perms = fs::Permissions::from_mode(0o700);
            fs::set_permissions(&self.root, perms)?;
        }

        Ok(())
    }

    /// Check if the config file exists
    pub fn config_exists(&self) -> bool {
        self.config_file.exists()
    }
}
