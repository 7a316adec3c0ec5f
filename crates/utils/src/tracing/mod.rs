use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vaultenv_core::VAULTENV_LOG_VAR;

// Re-export tracing macros for convenience
pub use tracing::level_filters::LevelFilter;
pub use tracing::{debug, error, info, instrument, span, trace, warn, Level, Span};

/// Initialize the tracing system
///
/// The filter comes from `VAULTENV_LOG`, then `RUST_LOG`, and falls back to
/// `default_level` (driven by `-v`/`-q`). Output always goes to stderr so the
/// written env file is the only thing a run produces on disk or stdout.
pub fn init(default_level: LevelFilter) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_env(VAULTENV_LOG_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::default().add_directive(default_level.into()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(is_tty())
        .compact()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Check if stderr is attached to a terminal
fn is_tty() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stderr())
}

/// Create a span covering one resolution batch
pub fn resolution_span(vault: &str, requested: usize) -> Span {
    span!(Level::INFO, "resolve", vault = %vault, requested = %requested)
}
