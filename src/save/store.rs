//! Save files on disk.
//!
//! A store is a directory holding at most one save per format. Saving
//! replaces the previous file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::payload::{SaveFormat, SavePayload};
use crate::core::SaveError;

/// Directory that holds the save files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveStore {
    dir: PathBuf,
}

impl SaveStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the save file for `format`.
    #[must_use]
    pub fn path(&self, format: SaveFormat) -> PathBuf {
        self.dir.join(format.file_name())
    }

    #[must_use]
    pub fn exists(&self, format: SaveFormat) -> bool {
        self.path(format).is_file()
    }

    /// Write `payload`, replacing any previous save in this format.
    pub fn save(&self, payload: &SavePayload, format: SaveFormat) -> Result<PathBuf, SaveError> {
        let bytes = payload.encode(format)?;
        fs::create_dir_all(&self.dir)?;
        self.delete(format)?;

        let path = self.path(format);
        fs::write(&path, bytes)?;
        info!(path = %path.display(), "game saved");
        Ok(path)
    }

    /// Read the save in `format`, or `None` when there is none.
    pub fn load(&self, format: SaveFormat) -> Result<Option<SavePayload>, SaveError> {
        let path = self.path(format);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no save file");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };
        SavePayload::decode(&bytes, format).map(Some)
    }

    /// Remove the save in `format`. Returns whether there was one.
    pub fn delete(&self, format: SaveFormat) -> Result<bool, SaveError> {
        match fs::remove_file(self.path(format)) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}
