mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use egytech_lib::config;
use egytech_lib::ApiConfig;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "egytech")]
#[command(about = "Query the egytech.fyi tech compensation survey")]
struct Cli {
    /// Output format: table, json, csv or markdown
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    output: OutputFormat,

    /// TOML config file with the API base URL and endpoint paths [env: EGYTECH_CONFIG]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the API base URL [env: EGYTECH_BASE_URL]
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List individual survey participants
    Participants(commands::participants::ParticipantsArgs),
    /// Show compensation statistics and the salary distribution
    Stats(commands::stats::StatsArgs),
    /// Run several queries and merge their rows
    Pool(commands::pool::PoolArgs),
}

/// Flags win over the environment, which wins over the built-in default.
fn resolve_config(cli: &Cli) -> Result<ApiConfig> {
    let path = cli
        .config
        .clone()
        .or_else(|| std::env::var_os("EGYTECH_CONFIG").map(PathBuf::from));
    let mut api_config = match path {
        Some(path) => config::load(&path)?,
        None => ApiConfig::default(),
    };

    let base_url = cli
        .base_url
        .clone()
        .or_else(|| std::env::var("EGYTECH_BASE_URL").ok());
    if let Some(base_url) = base_url {
        api_config = config::with_base_url(api_config, &base_url)?;
    }
    Ok(api_config)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("egytech=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let api_config = resolve_config(&cli)?;
    tracing::debug!("Using API at {}", api_config.base_url);

    match &cli.command {
        Commands::Participants(args) => {
            commands::participants::run(args, &api_config, cli.output).await?
        }
        Commands::Stats(args) => commands::stats::run(args, &api_config, cli.output).await?,
        Commands::Pool(args) => commands::pool::run(args, &api_config, cli.output).await?,
    }

    Ok(())
}
