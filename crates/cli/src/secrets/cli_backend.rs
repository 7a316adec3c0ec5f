//! Subprocess client around `az keyvault secret show`

use super::backend::SecretBackend;
use crate::command_executor::CommandExecutor;
use async_trait::async_trait;
use std::sync::Arc;
use vaultenv_core::types::CommandArguments;
use vaultenv_core::{Error, Result, SecretReference};

/// Spawns one client process per fetch
pub struct CliBackend {
    executor: Arc<dyn CommandExecutor>,
    command: String,
    vault_name: String,
}

impl CliBackend {
    pub fn new(
        executor: Arc<dyn CommandExecutor>,
        command: impl Into<String>,
        vault_name: impl Into<String>,
    ) -> Self {
        Self {
            executor,
            command: command.into(),
            vault_name: vault_name.into(),
        }
    }

    pub(crate) fn arguments(&self, reference: &SecretReference) -> CommandArguments {
        let mut args = CommandArguments::from([
            "keyvault",
            "secret",
            "show",
            "--vault-name",
            self.vault_name.as_str(),
            "--name",
            reference.name(),
        ]);
        if let Some(version) = reference.version() {
            args.extend(["--version", version]);
        }
        args.extend(["--query", "value"]);
        args
    }

    /// The client prints the value as a JSON string; fall back to trimming
    /// quotes when the output is not valid JSON
    pub(crate) fn parse_value(stdout: &str) -> String {
        let trimmed = stdout.trim();
        serde_json::from_str::<String>(trimmed)
            .unwrap_or_else(|_| trimmed.trim_matches('"').to_string())
    }
}

#[async_trait]
impl SecretBackend for CliBackend {
    async fn fetch(&self, reference: &SecretReference) -> Result<String> {
        let args = self.arguments(reference);
        let output = self
            .executor
            .execute(&self.command, &args)
            .await
            .map_err(|e| {
                Error::secret_resolution_with_source(
                    reference.to_string(),
                    format!("failed to run '{}'", self.command),
                    e,
                )
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = match stderr.trim() {
                "" => format!("'{}' exited with {}", self.command, output.status),
                detail => detail.to_string(),
            };
            return Err(Error::secret_resolution(reference.to_string(), message));
        }

        let stdout = String::from_utf8(output.stdout).map_err(|e| {
            Error::secret_resolution_with_source(
                reference.to_string(),
                "client output is not valid UTF-8",
                e,
            )
        })?;
        Ok(Self::parse_value(&stdout))
    }
}
