//! Schema module - Catalog, configuration and result types for order optimization.

mod catalog;
mod config;
mod order;
mod run;

pub use catalog::*;
pub use config::*;
pub use order::*;
pub use run::*;
