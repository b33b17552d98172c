//! Cart client for the London's Imports storefront: the cart store, its
//! guest and server backends, and the pieces the `imports-cart` binary
//! wires together.

pub mod auth;
pub mod config;
pub mod context;
pub mod domain;
pub mod guest;
pub mod observability;
pub mod remote;

#[cfg(test)]
mod test;
