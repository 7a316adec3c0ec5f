//! Error types for vaultenv operations

mod builders;
mod types;

pub use types::{Error, Result};
