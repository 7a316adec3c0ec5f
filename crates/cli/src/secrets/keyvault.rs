//! Key Vault API backend on top of the Azure SDK secret client

use super::backend::SecretBackend;
use async_trait::async_trait;
use azure_core::credentials::TokenCredential;
use azure_security_keyvault_secrets::models::SecretClientGetSecretOptions;
use azure_security_keyvault_secrets::SecretClient;
use std::sync::Arc;
use url::Url;
use vaultenv_core::{Error, Result, SecretReference, KEYVAULT_DNS_SUFFIX};

/// The vault a run reads from, as a name for the CLI and a URL for the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultTarget {
    name: String,
    url: Url,
}

impl VaultTarget {
    /// Accept either a bare vault name or a full `https://` endpoint
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(Error::configuration("vault name is empty"));
        }

        // Bearer tokens never travel over plain HTTP
        if raw.starts_with("http://") {
            return Err(Error::configuration(format!(
                "invalid vault URL '{raw}': only https endpoints are accepted"
            )));
        }

        if raw.starts_with("https://") {
            let url = Url::parse(raw)
                .map_err(|e| Error::configuration(format!("invalid vault URL '{raw}': {e}")))?;
            let name = url
                .host_str()
                .and_then(|host| host.split('.').next())
                .filter(|name| !name.is_empty())
                .ok_or_else(|| Error::configuration(format!("vault URL '{raw}' has no host")))?
                .to_string();
            return Ok(Self { name, url });
        }

        if !raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(Error::configuration(format!(
                "invalid vault name '{raw}': only letters, digits and '-' are allowed"
            )));
        }

        let url = Url::parse(&format!("https://{raw}.{KEYVAULT_DNS_SUFFIX}/"))
            .map_err(|e| Error::configuration(format!("invalid vault name '{raw}': {e}")))?;
        Ok(Self {
            name: raw.to_string(),
            url,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }
}

/// Fetches secrets through one shared [`SecretClient`]
///
/// The client's pipeline is reference counted and caches its token, so a
/// single backend serves every concurrent fetch.
pub struct KeyVaultBackend {
    client: SecretClient,
}

impl KeyVaultBackend {
    /// Create a client for `vault`; performs no I/O
    pub fn new(vault: &VaultTarget, credential: Arc<dyn TokenCredential>) -> Result<Self> {
        let client = SecretClient::new(vault.url().as_str(), credential, None).map_err(|e| {
            Error::configuration(format!(
                "cannot create Key Vault client for '{}': {e}",
                vault.url()
            ))
        })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl SecretBackend for KeyVaultBackend {
    async fn fetch(&self, reference: &SecretReference) -> Result<String> {
        let options = reference.version().map(|version| SecretClientGetSecretOptions {
            secret_version: Some(version.to_string()),
            ..Default::default()
        });

        let response = self
            .client
            .get_secret(reference.name(), options)
            .await
            .map_err(|e| Error::secret_resolution(reference.to_string(), e.to_string()))?;

        let secret = response.into_body().await.map_err(|e| {
            Error::secret_resolution(
                reference.to_string(),
                format!("malformed secret response: {e}"),
            )
        })?;

        secret
            .value
            .ok_or_else(|| Error::secret_resolution(reference.to_string(), "secret has no value"))
    }
}
