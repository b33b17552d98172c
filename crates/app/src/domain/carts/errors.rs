//! Cart store errors.

use imports::prelude::{GuestItemsError, ProductError};
use thiserror::Error;

use crate::{guest::GuestStoreError, remote::RemoteCartError};

#[derive(Debug, Error)]
pub enum CartError {
    #[error("product cannot be added to the cart: {0}")]
    Product(#[from] ProductError),

    #[error("cart service request failed: {0}")]
    Remote(#[from] RemoteCartError),

    #[error("guest cart storage failed: {0}")]
    GuestStore(#[from] GuestStoreError),

    #[error("guest cart could not be encoded: {0}")]
    GuestItems(#[from] GuestItemsError),
}
