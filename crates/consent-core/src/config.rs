//! Configuration and data directory management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the persisted registry inside the data directory.
pub const PREFERENCES_FILE: &str = "consentPreferences.json";

/// Paths used by the consent manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsentPaths {
    /// Root data directory.
    pub root: PathBuf,
    /// Registry file (`<root>/consentPreferences.json`).
    pub preferences_file: PathBuf,
}

impl ConsentPaths {
    /// Create paths from a root directory. Creates the directory if needed.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;
        Ok(Self {
            preferences_file: root.join(PREFERENCES_FILE),
            root,
        })
    }
}

/// Top-level consent manager configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsentConfig {
    pub paths: ConsentPaths,
}

impl ConsentConfig {
    /// Build configuration rooted at `data_dir`, creating it if needed.
    pub fn new(data_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        Ok(Self {
            paths: ConsentPaths::new(data_dir)?,
        })
    }

    /// Resolve the data directory: `CONSENT_DATA_DIR`, else the working directory.
    pub fn resolve_data_dir() -> PathBuf {
        std::env::var("CONSENT_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."))
    }
}
