//! `vaultenv` resolves secret references in an env file against Azure Key
//! Vault and writes the resolved values to a new env file.

pub mod command_executor;
pub mod config;
pub mod execute;
pub mod secrets;

pub use config::{Cli, RunConfig};
pub use execute::{execute, RunSummary};
