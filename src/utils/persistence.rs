//! JSON files under the data directory (`~/.delve/` unless a test points
//! elsewhere).

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::constants::DATA_DIR_NAME;

/// A directory of JSON state files.
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    /// `~/.delve/`. Fails only when there is no home directory.
    pub fn home() -> io::Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Could not determine home directory")
        })?;
        Ok(Self::at(home.join(DATA_DIR_NAME)))
    }

    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }

    /// Reads `filename`, or `T::default()` when it is missing or unreadable.
    pub fn load_or_default<T: Default + DeserializeOwned>(&self, filename: &str) -> T {
        let path = self.path(filename);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return T::default(),
            Err(err) => {
                tracing::warn!(%err, path = %path.display(), "could not read data file");
                return T::default();
            }
        };
        serde_json::from_str(&json).unwrap_or_else(|err| {
            tracing::warn!(%err, path = %path.display(), "ignoring unreadable JSON file");
            T::default()
        })
    }

    /// Writes `data` as pretty JSON, creating the directory if needed.
    ///
    /// The file is written beside its target and renamed into place, so a
    /// crash mid-write leaves the previous contents intact.
    pub fn save<T: Serialize>(&self, filename: &str, data: &T) -> io::Result<()> {
        fs::create_dir_all(&self.root)?;
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let target = self.path(filename);
        let staging = self.path(&format!("{}.tmp", filename));
        fs::write(&staging, json)?;
        fs::rename(&staging, &target)?;
        tracing::debug!(path = %target.display(), "saved data file");
        Ok(())
    }
}

/// [`DataDir::load_or_default`] on the home data directory.
pub fn load_json_or_default<T: Default + DeserializeOwned>(filename: &str) -> T {
    match DataDir::home() {
        Ok(dir) => dir.load_or_default(filename),
        Err(err) => {
            tracing::debug!(%err, filename, "data directory unavailable, using defaults");
            T::default()
        }
    }
}

/// [`DataDir::save`] on the home data directory.
pub fn save_json<T: Serialize>(filename: &str, data: &T) -> io::Result<()> {
    DataDir::home()?.save(filename, data)
}
