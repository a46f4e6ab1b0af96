use anyhow::Context;
use clap::Parser;
use exgate::cli::{self, output, Cli};
use tracing::debug;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli::load_config(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config.display()))?;
    config.init_logging();
    debug!(config = %cli.config.display(), "exgate starting");

    cli::run(cli, config).await?;
    Ok(())
}
