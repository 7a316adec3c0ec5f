//! Credential selection for the Key Vault API backend
//!
//! Tokens are acquired lazily by the SDK pipeline and cached for the life of
//! the client, so one credential serves every concurrent fetch.

use azure_core::credentials::{Secret, TokenCredential};
use azure_identity::{ClientSecretCredential, DeveloperToolsCredential};
use std::fmt;
use std::sync::Arc;
use vaultenv_core::{
    Error, Result, AZURE_CLIENT_ID_VAR, AZURE_CLIENT_SECRET_VAR, AZURE_TENANT_ID_VAR,
};

/// Where the API backend gets its tokens from
#[derive(Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Service principal from `AZURE_TENANT_ID`, `AZURE_CLIENT_ID` and
    /// `AZURE_CLIENT_SECRET`
    ServicePrincipal {
        tenant_id: String,
        client_id: String,
        client_secret: String,
    },
    /// Whatever `az login` (or `azd auth login`) left on this machine
    DeveloperTools,
}

impl CredentialSource {
    /// Pick a source from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Pick a source using `lookup` to read variables; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        match (
            var(AZURE_TENANT_ID_VAR),
            var(AZURE_CLIENT_ID_VAR),
            var(AZURE_CLIENT_SECRET_VAR),
        ) {
            (Some(tenant_id), Some(client_id), Some(client_secret)) => Self::ServicePrincipal {
                tenant_id,
                client_id,
                client_secret,
            },
            _ => Self::DeveloperTools,
        }
    }

    /// Short name for logs
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ServicePrincipal { .. } => "service-principal",
            Self::DeveloperTools => "developer-tools",
        }
    }

    /// Construct the SDK credential; no token is requested yet
    pub fn build(&self) -> Result<Arc<dyn TokenCredential>> {
        match self {
            Self::ServicePrincipal {
                tenant_id,
                client_id,
                client_secret,
            } => {
                let credential = ClientSecretCredential::new(
                    tenant_id,
                    client_id.clone(),
                    Secret::new(client_secret.clone()),
                    None,
                )
                .map_err(|e| {
                    Error::credential(format!("invalid service principal settings: {e}"))
                })?;
                Ok(credential)
            }
            Self::DeveloperTools => {
                let credential = DeveloperToolsCredential::new(None).map_err(|e| {
                    Error::credential(format!("{e}; run `az login` in a terminal"))
                })?;
                Ok(credential)
            }
        }
    }
}

impl fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ServicePrincipal {
                tenant_id,
                client_id,
                ..
            } => f
                .debug_struct("ServicePrincipal")
                .field("tenant_id", tenant_id)
                .field("client_id", client_id)
                .field("client_secret", &"<redacted>")
                .finish(),
            Self::DeveloperTools => f.write_str("DeveloperTools"),
        }
    }
}
