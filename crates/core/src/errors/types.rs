//! Core error type definitions

use std::path::PathBuf;

/// Result type alias for vaultenv operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for vaultenv operations using thiserror
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Environment file could not be read or parsed
    #[error("failed to read environment file '{}': {message}", .path.display())]
    EnvFile {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Secret resolution errors
    #[error("failed to resolve secret '{reference}': {message}")]
    SecretResolution {
        reference: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Command execution errors
    #[error("{}", format_command_error(.command, .args, .message, .exit_code))]
    CommandExecution {
        command: String,
        args: Vec<String>,
        message: String,
        exit_code: Option<i32>,
    },

    /// No credential could be obtained for the secret store
    #[error("unable to authenticate: {message}")]
    Credential { message: String },

    /// Configuration errors
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// File system operations
    #[error("file system {operation} operation failed for '{}': {source}", .path.display())]
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

fn format_command_error(
    command: &str,
    args: &[String],
    message: &str,
    exit_code: &Option<i32>,
) -> String {
    let invocation = if args.is_empty() {
        command.to_string()
    } else {
        format!("{command} {}", args.join(" "))
    };
    match exit_code {
        Some(code) => format!("command '{invocation}' failed with exit code {code}: {message}"),
        None => format!("command '{invocation}' failed: {message}"),
    }
}
