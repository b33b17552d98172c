//! In-memory guest store.

use std::sync::{Mutex, PoisonError};

use super::{GuestStore, GuestStoreError};

/// Keeps the guest slot in process memory. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryGuestStore {
    slot: Mutex<Option<String>>,
}

impl MemoryGuestStore {
    /// An empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot pre-filled with `payload`.
    #[must_use]
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(payload.into())),
        }
    }

    /// Current slot contents.
    pub fn payload(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl GuestStore for MemoryGuestStore {
    fn load(&self) -> Result<Option<String>, GuestStoreError> {
        Ok(self.payload())
    }

    fn save(&self, payload: &str) -> Result<(), GuestStoreError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(payload.to_string());

        Ok(())
    }

    fn erase(&self) -> Result<(), GuestStoreError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;

        Ok(())
    }
}
