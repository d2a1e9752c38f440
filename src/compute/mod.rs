//! Compute module - The order search.

pub mod optimizer;

pub use optimizer::*;
