//! Saved state carried between command line invocations.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    error::{FieldMapsError, IoResultExt, Result},
    models::{Basemap, ViewState},
    store::StoreSnapshot,
};

/// Map view, active basemap and the marked locations.
///
/// Marker handles are not saved; they are placed again when a session is
/// loaded into a map.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Session {
    #[serde(default)]
    pub view: ViewState,
    #[serde(default)]
    pub basemap: Basemap,
    #[serde(default)]
    pub store: StoreSnapshot,
}

impl Session {
    /// Reads a session, or returns an empty one if `path` does not exist.
    ///
    /// # Errors
    ///
    /// Returns `FieldMapsError::FileSystem` if the file cannot be read
    /// Returns `FieldMapsError::Serialization` if it is not a valid session
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No session at {}, starting fresh", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).fs_context(path)?;
        let session: Self = serde_json::from_str(&text)?;
        debug!(
            "Loaded session with {} location(s) from {}",
            session.store.locations.len(),
            path.display()
        );
        Ok(session)
    }

    /// Writes the session as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).fs_context(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).fs_context(path)?;
        debug!("Saved session to {}", path.display());
        Ok(())
    }

    /// Returns the default session path following XDG Base Directory
    /// specification: `$XDG_DATA_HOME/fieldmaps/session.json`.
    pub fn default_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("fieldmaps")
            .place_data_file("session.json")
            .map_err(|e| FieldMapsError::XdgDirectory(e.to_string()))
    }
}
