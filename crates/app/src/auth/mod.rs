//! Authentication state
//!
//! The cart only needs to know whether the current session is signed in.
//! It asks on every operation and never caches the answer.

mod session;

use mockall::automock;

pub use session::SessionAuth;

/// Answers whether the current session is authenticated.
#[automock]
pub trait AuthState: Send + Sync {
    /// Whether requests can be made against the server cart.
    fn is_authenticated(&self) -> bool;
}
