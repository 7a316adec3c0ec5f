//! Concurrent fan-out of secret fetches
//!
//! One task is spawned per reference. Each task owns its own result slot
//! (its `JoinHandle` output); nothing is shared between tasks except the
//! read-only backend. After every handle has been awaited the slots are
//! folded into the report on the calling task, so no container is ever
//! written concurrently.

use super::backend::SecretBackend;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{info, warn, Instrument};
use vaultenv_core::{EnvironmentVariables, Error, ReferenceSet, Result, SecretReference};

/// A reference that could not be resolved
#[derive(Debug)]
pub struct ResolutionFailure {
    /// Local key the secret was meant for
    pub key: String,
    pub reference: SecretReference,
    pub error: Error,
}

/// Outcome of one resolution batch
#[derive(Debug, Default)]
pub struct ResolutionReport {
    /// Successfully fetched values keyed by local key
    pub resolved: EnvironmentVariables,
    /// Failures, sorted by local key
    pub failures: Vec<ResolutionFailure>,
    /// Number of references the batch started with
    pub requested: usize,
}

impl ResolutionReport {
    #[must_use]
    pub fn resolved_count(&self) -> usize {
        self.resolved.len()
    }

    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    /// Every requested reference resolved
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.resolved.len() == self.requested
    }
}

/// Resolves a [`ReferenceSet`] against a shared backend
pub struct Resolver {
    backend: Arc<dyn SecretBackend>,
    /// Optional cap on fetches in flight
    limit: Option<Arc<Semaphore>>,
}

impl Resolver {
    /// Create a resolver with unbounded fan-out
    pub fn new(backend: Arc<dyn SecretBackend>) -> Self {
        Self {
            backend,
            limit: None,
        }
    }

    /// Allow at most `max_concurrent` fetches in flight at once
    ///
    /// The cap is clamped to what a tokio semaphore can hold.
    #[must_use]
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        let permits = max_concurrent.clamp(1, Semaphore::MAX_PERMITS);
        self.limit = Some(Arc::new(Semaphore::new(permits)));
        self
    }

    /// Fetch every reference concurrently and wait for all of them
    ///
    /// Never fails as a whole: a reference that cannot be fetched is logged,
    /// recorded in [`ResolutionReport::failures`] and left out of
    /// [`ResolutionReport::resolved`]. There is no timeout, so a fetch that
    /// never returns stalls the batch.
    pub async fn resolve(&self, references: &ReferenceSet) -> ResolutionReport {
        let units: Vec<(String, SecretReference, JoinHandle<Result<String>>)> = references
            .iter()
            .map(|(key, reference)| {
                let handle = self.spawn_unit(key.clone(), reference.clone());
                (key.clone(), reference.clone(), handle)
            })
            .collect();

        let mut report = ResolutionReport {
            requested: references.len(),
            ..ResolutionReport::default()
        };

        // Barrier: every unit is awaited before the report is returned
        for (key, reference, handle) in units {
            let outcome = handle.await.unwrap_or_else(|join_error| {
                warn!(
                    key = %key,
                    secret = %reference,
                    error = %join_error,
                    "resolution task aborted"
                );
                Err(Error::secret_resolution(
                    reference.to_string(),
                    format!("resolution task aborted: {join_error}"),
                ))
            });

            match outcome {
                Ok(value) => {
                    report.resolved.insert(key, value);
                }
                Err(error) => report.failures.push(ResolutionFailure {
                    key,
                    reference,
                    error,
                }),
            }
        }

        report.failures.sort_by(|a, b| a.key.cmp(&b.key));
        report
    }

    fn spawn_unit(&self, key: String, reference: SecretReference) -> JoinHandle<Result<String>> {
        let backend = Arc::clone(&self.backend);
        let limit = self.limit.clone();

        let unit = async move {
            let _permit = match limit {
                Some(semaphore) => Some(semaphore.acquire_owned().await.map_err(|e| {
                    Error::secret_resolution(
                        reference.to_string(),
                        format!("concurrency limiter closed: {e}"),
                    )
                })?),
                None => None,
            };

            let result = backend.fetch(&reference).await;
            match &result {
                Ok(_) => info!(key = %key, secret = %reference, "resolved secret"),
                Err(e) => warn!(
                    key = %key,
                    secret = %reference,
                    error = %e,
                    "could not resolve secret"
                ),
            }
            result
        };

        tokio::spawn(unit.in_current_span())
    }
}
