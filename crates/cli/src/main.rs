use clap::Parser;
use vaultenv::{execute, Cli};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    vaultenv_utils::tracing::init(cli.log_level())
        .map_err(|e| eyre::eyre!("failed to initialise logging: {e}"))?;

    let config = cli.into_config()?;
    // Partial resolution is not an error; only precondition failures exit nonzero
    execute(&config).await?;

    Ok(())
}
