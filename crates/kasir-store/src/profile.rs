//! # Profile Store
//!
//! Loads and saves the [`StoreProfile`] document as pretty-printed
//! JSON at a fixed path.
//!
//! Loading is forgiving: a missing, unreadable or malformed document
//! falls back to the built-in defaults (with a warning), because the
//! register must come up even when a settings file was mangled. Keys
//! absent from the document keep their defaults, so documents written
//! by older builds load cleanly. Saving is loud: a failed save
//! surfaces to the caller so edits are never silently dropped.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use kasir_core::StoreProfile;

use crate::error::StoreResult;

/// Persistence handle for the store profile document.
///
/// ## Usage
/// ```rust,ignore
/// let store = ProfileStore::new("data/profile.json");
/// let mut profile = store.load();
/// profile.name = "WARUNG BU SITI".to_string();
/// store.save(&profile)?;
/// ```
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    /// Creates a handle. No file access happens here.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ProfileStore { path: path.into() }
    }

    /// Path of the backing document.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the profile, falling back to defaults on any problem.
    pub fn load(&self) -> StoreProfile {
        if !self.path.exists() {
            return StoreProfile::default();
        }
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "Profile unreadable, using defaults"
                );
                return StoreProfile::default();
            }
        };
        match serde_json::from_str(&text) {
            Ok(profile) => profile,
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "Profile malformed, using defaults"
                );
                StoreProfile::default()
            }
        }
    }

    /// Saves the profile as pretty-printed JSON.
    pub fn save(&self, profile: &StoreProfile) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(profile)?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), "Profile saved");
        Ok(())
    }
}
