//! Command-line surface and the validated configuration it produces

use crate::secrets::{BackendKind, VaultTarget};
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;
use vaultenv_core::{
    Error, Result, DEFAULT_CLI_COMMAND, DEFAULT_OUTPUT_FILE, VAULTENV_BACKEND_VAR,
    VAULTENV_OUTPUT_FILE_VAR, VAULTENV_SECRETS_FILE_VAR, VAULTENV_VAULT_VAR,
};
use vaultenv_env::SourceMode;
use vaultenv_utils::tracing::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "vaultenv")]
#[command(about = "Resolve Key Vault secret references into a .env file", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Env file listing KEY=secret-name references (or a full env file with --mode prefixed)
    #[arg(
        short = 's',
        long = "secrets-file",
        visible_alias = "secrets-env-file",
        env = VAULTENV_SECRETS_FILE_VAR,
        value_name = "PATH"
    )]
    pub secrets_file: Option<PathBuf>,

    /// Env file to write resolved values to
    #[arg(
        short = 'r',
        long = "output-file",
        visible_alias = "result-env-file-path",
        env = VAULTENV_OUTPUT_FILE_VAR,
        default_value = DEFAULT_OUTPUT_FILE,
        value_name = "PATH"
    )]
    pub output_file: PathBuf,

    /// Key Vault name, or its full https:// URL
    #[arg(
        short = 'k',
        long = "vault",
        visible_alias = "keyvault",
        env = VAULTENV_VAULT_VAR,
        value_name = "NAME"
    )]
    pub vault: Option<String>,

    /// How secrets are fetched
    #[arg(long, value_enum, default_value_t = BackendKind::Api, env = VAULTENV_BACKEND_VAR)]
    pub backend: BackendKind,

    /// How the secrets file marks references
    #[arg(long, value_enum, default_value_t = ModeArg::References)]
    pub mode: ModeArg,

    /// Maximum number of secrets fetched at once (unbounded if omitted)
    #[arg(long, value_name = "N")]
    pub max_concurrent: Option<usize>,

    /// Command-line client used by the cli backend
    #[arg(long, default_value = DEFAULT_CLI_COMMAND, value_name = "PATH")]
    pub cli_command: String,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Command-line spelling of [`SourceMode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Every entry is KEY=secret-name
    References,
    /// Only values starting with keyvault:// are references
    Prefixed,
}

impl From<ModeArg> for SourceMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::References => SourceMode::References,
            ModeArg::Prefixed => SourceMode::Prefixed,
        }
    }
}

/// Everything a run needs, checked before any file is touched
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub secrets_file: PathBuf,
    pub output_file: PathBuf,
    pub vault: VaultTarget,
    pub backend: BackendKind,
    pub mode: SourceMode,
    pub max_concurrent: Option<usize>,
    pub cli_command: String,
}

impl Cli {
    /// Default log level when neither `VAULTENV_LOG` nor `RUST_LOG` is set
    #[must_use]
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::WARN;
        }
        match self.verbose {
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    /// Validate flags into a [`RunConfig`]
    pub fn into_config(self) -> Result<RunConfig> {
        let vault = match self.vault.as_deref().map(str::trim) {
            Some(vault) if !vault.is_empty() => VaultTarget::parse(vault)?,
            _ => return Err(Error::configuration("missing vault flag, use -h for help")),
        };

        let secrets_file = match self.secrets_file {
            Some(path) if !path.as_os_str().is_empty() => path,
            _ => {
                return Err(Error::configuration(
                    "missing secrets-file flag, use -h for help",
                ));
            }
        };

        if self.output_file.as_os_str().is_empty() {
            return Err(Error::configuration("missing output-file flag, use -h for help"));
        }

        if self.max_concurrent == Some(0) {
            return Err(Error::configuration("max-concurrent must be at least 1"));
        }

        if self.cli_command.trim().is_empty() {
            return Err(Error::configuration("cli-command must not be empty"));
        }

        Ok(RunConfig {
            secrets_file,
            output_file: self.output_file,
            vault,
            backend: self.backend,
            mode: self.mode.into(),
            max_concurrent: self.max_concurrent,
            cli_command: self.cli_command,
        })
    }
}
