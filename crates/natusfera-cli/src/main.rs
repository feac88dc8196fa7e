//! Natusfera command line client
//!
//! Runs one query against the Natusfera API and prints the result as JSON
//! on stdout. Logs go to stderr.

mod error;

use std::io::Write;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use natusfera_client::{ClientConfig, NatusferaClient};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::error::Result;

/// Download projects, places and observations from Natusfera
#[derive(Debug, Parser)]
#[command(name = "natusfera", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// API host, overrides NATUSFERA_API_URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Records requested per page, overrides NATUSFERA_PAGE_SIZE
    #[arg(long, global = true)]
    page_size: Option<usize>,

    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Get a project by id
    Project { id: u64 },
    /// Search projects by name
    Projects { name: String },
    /// Get an observation by id
    Observation { id: u64 },
    /// Observations matching a free-text query
    Search { query: String },
    /// Observations of a user
    User { login: String },
    /// Observations of a project
    ProjectObservations { id: u64 },
    /// Observations of an iconic taxon (e.g. Aves, Insecta, Plantae)
    Taxon { name: String },
    /// Search places by name
    Places { name: String },
    /// Observations of every place matching a name
    Place { name: String },
    /// Observations of a place by id
    PlaceId { id: u64 },
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("natusfera: {}", e);
            ExitCode::FAILURE
        }
    }
}

const DEFAULT_LOG_DIRECTIVE: &str = "natusfera=info";

/// `RUST_LOG` when set and valid, otherwise info-level logs for this tool
fn env_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_DIRECTIVE))
}

/// Apply command line overrides on top of the environment configuration
fn client_config(cli: &Cli, mut config: ClientConfig) -> Result<ClientConfig> {
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.trim_end_matches('/').to_string();
    }
    if let Some(page_size) = cli.page_size {
        config.page_size = page_size;
    }
    config.validate()?;
    Ok(config)
}

async fn run(cli: Cli) -> Result<()> {
    let rust_log = std::env::var("RUST_LOG").ok();
    tracing_subscriber::registry()
        .with(env_filter(rust_log.as_deref()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = client_config(&cli, ClientConfig::from_env()?)?;
    info!(base_url = %config.base_url, page_size = config.page_size, "Using Natusfera API");

    let client = NatusferaClient::with_config(config)?;

    match cli.command {
        Command::Project { id } => write_json(&client.project_by_id(id).await?, cli.pretty),
        Command::Projects { name } => write_json(&client.projects_by_name(&name).await?, cli.pretty),
        Command::Observation { id } => write_json(&client.observation_by_id(id).await?, cli.pretty),
        Command::Search { query } => {
            write_json(&client.observations_by_query(&query).await?, cli.pretty)
        }
        Command::User { login } => write_json(&client.observations_by_user(&login).await?, cli.pretty),
        Command::ProjectObservations { id } => {
            write_json(&client.observations_by_project(id).await?, cli.pretty)
        }
        Command::Taxon { name } => write_json(&client.observations_by_taxon(&name).await?, cli.pretty),
        Command::Places { name } => write_json(&client.places_by_name(&name).await?, cli.pretty),
        Command::Place { name } => {
            write_json(&client.observations_by_place_name(&name).await?, cli.pretty)
        }
        Command::PlaceId { id } => write_json(&client.observations_by_place_id(id).await?, cli.pretty),
    }
}

fn write_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, value)?;
    } else {
        serde_json::to_writer(&mut out, value)?;
    }
    writeln!(out)?;
    Ok(())
}
