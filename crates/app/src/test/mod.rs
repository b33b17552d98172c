//! Test support for store and merge tests.

pub(crate) mod helpers;
