//! File-backed guest store.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::debug;

use super::{GUEST_CART_KEY, GuestStore, GuestStoreError};

/// Keeps the guest slot in `<dir>/guest_cart.json`.
///
/// Writes go to a sibling temporary file that is renamed over the slot, so a
/// crash mid-write leaves the previous payload intact.
#[derive(Debug, Clone)]
pub struct FileGuestStore {
    path: PathBuf,
}

impl FileGuestStore {
    /// Stores the slot inside `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{GUEST_CART_KEY}.json")),
        }
    }

    /// Path of the slot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

impl GuestStore for FileGuestStore {
    fn load(&self) -> Result<Option<String>, GuestStoreError> {
        match fs::read_to_string(&self.path) {
            Ok(payload) if payload.trim().is_empty() => Ok(None),
            Ok(payload) => Ok(Some(payload)),
            Err(source) if source.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(GuestStoreError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn save(&self, payload: &str) -> Result<(), GuestStoreError> {
        let write_error = |source| GuestStoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }

        let temp = self.temp_path();

        fs::write(&temp, payload).map_err(write_error)?;
        fs::rename(&temp, &self.path).map_err(write_error)?;

        debug!(path = %self.path.display(), bytes = payload.len(), "guest cart saved");

        Ok(())
    }

    fn erase(&self) -> Result<(), GuestStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "guest cart erased");

                Ok(())
            }
            Err(source) if source.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(GuestStoreError::Erase {
                path: self.path.clone(),
                source,
            }),
        }
    }
}
