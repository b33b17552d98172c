//! Carts

pub mod errors;
pub mod merge;
pub mod state;
mod store;

pub use errors::CartError;
pub use merge::MergeReport;
pub use state::CartState;
pub use store::CartStore;
