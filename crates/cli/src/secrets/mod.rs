//! Secret fetching and concurrent resolution
//!
//! A [`SecretBackend`] knows how to fetch one secret from the vault. The
//! [`Resolver`] fans a whole [`ReferenceSet`](vaultenv_core::ReferenceSet)
//! out over a backend and reports what resolved and what failed.

mod backend;
mod cli_backend;
mod credential;
mod keyvault;
mod resolver;


pub use backend::{BackendKind, SecretBackend};
pub use cli_backend::CliBackend;
pub use credential::CredentialSource;
pub use keyvault::{KeyVaultBackend, VaultTarget};
pub use resolver::{ResolutionFailure, ResolutionReport, Resolver};
