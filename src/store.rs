//! Version store
//!
//! Persists the installed version of each data source as rendered strings
//! in one JSON file. Writes go through a temp file and a rename, so a
//! crash cannot leave a half-written store behind.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::version::Version;

/// Installed data-source versions, keyed by source name
#[derive(Debug, Clone, Default)]
pub struct VersionStore {
    path: PathBuf,
    versions: BTreeMap<String, String>,
}

impl VersionStore {
    /// Open a store file, loading existing entries if present
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let versions = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, versions })
    }

    /// Store without file persistence
    pub fn in_memory() -> Self {
        Self {
            path: PathBuf::new(),
            versions: BTreeMap::new(),
        }
    }

    /// Record the installed version of a source
    pub fn record(&mut self, source: impl Into<String>, version: &Version) {
        self.versions.insert(source.into(), version.to_string());
    }

    /// Raw stored version string of a source
    pub fn raw(&self, source: &str) -> Option<&str> {
        self.versions.get(source).map(String::as_str)
    }

    /// Installed version of a source
    ///
    /// Absent and unparseable entries both come back as
    /// [`Version::Unknown`], so a corrupted entry reads as stale instead of
    /// failing the whole run.
    pub fn version(&self, source: &str) -> Version {
        self.raw(source)
            .and_then(|raw| Version::parse(raw).ok())
            .unwrap_or(Version::Unknown)
    }

    /// Whether a source should be refreshed against the latest upstream
    /// version
    ///
    /// True whenever the stored version differs from `latest`. Unknown
    /// equals nothing, so an unknown stored or upstream version always
    /// triggers a refresh.
    pub fn needs_refresh(&self, source: &str, latest: &Version) -> bool {
        self.version(source) != *latest
    }

    /// Remove a source entry, returning its stored string
    pub fn remove(&mut self, source: &str) -> Option<String> {
        self.versions.remove(source)
    }

    /// Source names in sorted order
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.versions.keys().map(String::as_str)
    }

    /// Number of stored sources
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Whether the store has no entries
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// The backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if using in-memory mode
    pub fn is_in_memory(&self) -> bool {
        self.path.as_os_str().is_empty()
    }

    /// Write the store to its file
    ///
    /// No-op for in-memory stores.
    pub fn save(&self) -> Result<()> {
        if self.is_in_memory() {
            return Ok(());
        }

        let contents = serde_json::to_string_pretty(&self.versions)?;

        // Write to temp file first, then rename for atomicity
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, contents)?;
        fs::rename(&temp_path, &self.path)?;

        debug!(
            "Saved {} source versions to {}",
            self.versions.len(),
            self.path.display()
        );
        Ok(())
    }
}
