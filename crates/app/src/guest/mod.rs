//! Guest cart storage
//!
//! A single durable slot holding the serialized guest cart. Reads and writes
//! are synchronous, and only the cart store writes to the slot.

mod errors;
mod file;
mod memory;

use mockall::automock;

pub use errors::GuestStoreError;
pub use file::FileGuestStore;
pub use memory::MemoryGuestStore;

/// Name of the slot holding the guest cart.
pub const GUEST_CART_KEY: &str = "guest_cart";

/// Durable single-slot storage for the guest cart payload.
#[automock]
pub trait GuestStore: Send + Sync {
    /// Reads the slot. `None` when nothing has been stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn load(&self) -> Result<Option<String>, GuestStoreError>;

    /// Replaces the slot contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn save(&self, payload: &str) -> Result<(), GuestStoreError>;

    /// Removes the slot. Erasing an empty slot succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be modified.
    fn erase(&self) -> Result<(), GuestStoreError>;
}
