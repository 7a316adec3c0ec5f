//! Core domain types, errors, and constants for `vaultenv`.
//!
//! ## Key Components
//!
//! - **`errors`**: Defines the primary `Error` enum and `Result` type alias,
//!   centralizing every failure mode of a run.
//! - **`types`**: Newtype wrappers like `EnvironmentVariables`,
//!   `SecretReference` and `ReferenceSet` that carry the invariants of a
//!   resolution batch.
//! - **`constants`**: Shared static values such as the reference prefix and
//!   environment variable names.

pub mod constants;
pub mod errors;
pub mod types;

pub use self::{
    constants::*,
    errors::{Error, Result},
    types::*,
};
