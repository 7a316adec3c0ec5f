//! The capability every secret store client provides

use async_trait::async_trait;
use vaultenv_core::{Result, SecretReference};

/// Fetch a secret's value by name
///
/// Implementations are shared read-only across every concurrent resolution
/// unit, so `fetch` must be safe to call from many tasks at once.
#[async_trait]
pub trait SecretBackend: Send + Sync {
    /// Fetch the value of `reference`, the latest version unless one is pinned
    ///
    /// # Returns
    /// * `Ok(value)` - The secret's current value
    /// * `Err(error)` - The secret could not be fetched; the error names the secret
    async fn fetch(&self, reference: &SecretReference) -> Result<String>;
}

/// Which client talks to the vault
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum BackendKind {
    /// Call the Key Vault REST API directly
    #[default]
    Api,
    /// Shell out to the `az` command-line client for each secret
    Cli,
}
