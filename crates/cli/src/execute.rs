//! Read → Resolve → Merge → Write

use crate::command_executor::{CommandExecutor, SystemCommandExecutor};
use crate::config::RunConfig;
use crate::secrets::{
    BackendKind, CliBackend, CredentialSource, KeyVaultBackend, ResolutionFailure, Resolver,
    SecretBackend,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn, Instrument};
use vaultenv_core::Result;
use vaultenv_env::{copy_env_file, load_source, merge, write_env_file, SourceMode};
use vaultenv_utils::tracing::resolution_span;

/// What a finished run did
#[derive(Debug)]
pub struct RunSummary {
    pub requested: usize,
    pub resolved: usize,
    pub failures: Vec<ResolutionFailure>,
    pub output_file: PathBuf,
}

/// Run the whole pipeline with the backend selected in `config`
pub async fn execute(config: &RunConfig) -> Result<RunSummary> {
    let executor: Arc<dyn CommandExecutor> = Arc::new(SystemCommandExecutor::new());
    execute_with(config, || build_backend(config, executor)).await
}

/// Run the pipeline, building the backend with `make_backend`
///
/// The backend is only built once the secrets file has been read and holds at
/// least one reference, so an empty file never needs a credential.
pub async fn execute_with<F, Fut>(config: &RunConfig, make_backend: F) -> Result<RunSummary>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<Arc<dyn SecretBackend>>>,
{
    let source = load_source(&config.secrets_file, config.mode)?;
    let requested = source.references.len();

    let (resolved, failures) = if source.references.is_empty() {
        info!(path = %config.secrets_file.display(), "no secret references found");
        (Default::default(), Vec::new())
    } else {
        let backend = make_backend().await?;
        let mut resolver = Resolver::new(backend);
        if let Some(max_concurrent) = config.max_concurrent {
            resolver = resolver.with_max_concurrent(max_concurrent);
        }

        let report = resolver
            .resolve(&source.references)
            .instrument(resolution_span(config.vault.name(), requested))
            .await;
        (report.resolved, report.failures)
    };

    if config.mode == SourceMode::Prefixed && source.references.is_empty() {
        copy_env_file(&config.secrets_file, &config.output_file)?;
    } else {
        let output = merge(&source.base, &resolved);
        write_env_file(&config.output_file, &output)?;
    }

    if requested > 0 && resolved.is_empty() {
        warn!(requested, "none of the requested secrets could be resolved");
    }
    info!("Done. Resolved {} of {} secrets.", resolved.len(), requested);

    Ok(RunSummary {
        requested,
        resolved: resolved.len(),
        failures,
        output_file: config.output_file.clone(),
    })
}

/// Construct the configured backend
///
/// For the API variant the credential is chosen here, but the first token is
/// only requested by the first fetch.
pub async fn build_backend(
    config: &RunConfig,
    executor: Arc<dyn CommandExecutor>,
) -> Result<Arc<dyn SecretBackend>> {
    match config.backend {
        BackendKind::Api => {
            let source = CredentialSource::from_env();
            let backend = KeyVaultBackend::new(&config.vault, source.build()?)?;
            info!(vault = %config.vault.url(), credential = source.name(), "using key vault API");
            Ok(Arc::new(backend))
        }
        BackendKind::Cli => Ok(Arc::new(CliBackend::new(
            executor,
            config.cli_command.clone(),
            config.vault.name(),
        ))),
    }
}
