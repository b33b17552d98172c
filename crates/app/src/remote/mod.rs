//! Remote cart service
//!
//! The server-side cart for signed-in customers. Every call answers with the
//! complete cart, which replaces whatever the client held before.

mod errors;
pub mod http;
mod models;

use async_trait::async_trait;
use imports::prelude::{Cart, CartItemId};
use mockall::automock;

pub use errors::RemoteCartError;
pub use http::{HttpCartConfig, HttpCartService};
pub use models::AddCartItem;

#[automock]
#[async_trait]
pub trait RemoteCartService: Send + Sync {
    /// Fetch the current cart, created lazily by the server.
    async fn get_cart(&self) -> Result<Cart, RemoteCartError>;

    /// Add a product to the cart. The server consolidates repeated products.
    async fn add_item(&self, item: AddCartItem) -> Result<Cart, RemoteCartError>;

    /// Remove a line by its server id. Unknown ids leave the cart unchanged.
    async fn remove_item(&self, item: &CartItemId) -> Result<Cart, RemoteCartError>;

    /// Set a line's quantity directly.
    ///
    /// Services without such an endpoint return
    /// [`RemoteCartError::Unsupported`].
    async fn update_item(&self, item: &CartItemId, quantity: u32)
    -> Result<Cart, RemoteCartError>;
}
