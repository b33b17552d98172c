//! Imports
//!
//! Cart domain for the London's Imports storefront: product snapshots, cart
//! lines, the guest line collection, the server cart, checkout selection and
//! the totals derived from it.

pub mod cart;
pub mod guest;
pub mod items;
pub mod money;
pub mod prelude;
pub mod products;
pub mod selection;
pub mod totals;
