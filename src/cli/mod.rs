//! Command-line interface definitions.

pub mod catalog;
pub mod check;
pub mod connect;
pub mod output;
pub mod provider;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// exgate - Exchange connectivity manager.
#[derive(Parser, Debug)]
#[command(name = "exgate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the active exchange provider
    Provider,

    /// Connect to the active provider (or the given one) and report the result
    Connect(ConnectArgs),

    /// Test API credentials for a provider
    Check(CheckArgs),

    /// Administer the provider catalog
    #[command(subcommand)]
    Catalog(CatalogCommand),
}

/// Arguments for the `connect` subcommand.
#[derive(Parser, Debug)]
pub struct ConnectArgs {
    /// Connect to this provider instead of the active one
    #[arg(long)]
    pub provider: Option<String>,
}

/// Arguments for the `check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Provider whose credentials to test
    pub provider: String,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

/// Subcommands for `exgate catalog`
#[derive(Subcommand, Debug)]
pub enum CatalogCommand {
    /// List registered providers
    List,
    /// Register a provider
    Add(ProviderArg),
    /// Make a provider the active one
    Activate(ProviderArg),
}

/// Provider name argument.
#[derive(Parser, Debug)]
pub struct ProviderArg {
    /// Provider name
    pub name: String,
}

/// Load the configuration file, falling back to defaults when it does not
/// exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be parsed or validated.
pub fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        Config::load(path)
    } else {
        Config::parse_toml("")
    }
}

/// Run the selected command.
///
/// # Errors
///
/// Returns an error if the command cannot complete.
pub async fn run(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Provider => provider::execute(&config).await,
        Commands::Connect(args) => connect::execute(&config, args.provider.as_deref()).await,
        Commands::Check(args) => check::execute(&config, &args.provider, args.json).await,
        Commands::Catalog(command) => catalog::execute(&config, command),
    }
}
