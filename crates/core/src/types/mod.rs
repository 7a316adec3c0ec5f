//! Core domain types for `vaultenv`.
//!
//! - **`commands`**: Argument lists for external command execution
//! - **`environment`**: Key/value sets read from and written to env files
//! - **`references`**: Secret references and the set of them a run resolves

pub mod commands;
pub mod environment;
pub mod references;

pub use commands::*;
pub use environment::*;
pub use references::*;
