//! Cart domain concerns

pub mod carts;
