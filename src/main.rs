use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use pokeapi_csv::{Config, pipeline};

/// Export PokeAPI Pokémon, moves and abilities to pipe-delimited CSV files
#[derive(Debug, Parser)]
#[command(name = "pokeapi-csv", version, about)]
struct Cli {
    /// JSON config file; command line flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Page size requested from each list endpoint
    #[arg(short, long)]
    limit: Option<usize>,

    /// Language for names, effects and flavor text
    #[arg(long)]
    lang: Option<String>,

    /// Output directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

impl Cli {
    fn into_config(self) -> pokeapi_csv::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if let Some(limit) = self.limit {
            config.api.limit = limit;
        }
        if let Some(lang) = self.lang {
            config.api.language = lang;
        }
        if let Some(output) = self.output {
            config.output.dir = output;
        }
        if let Some(base_url) = self.base_url {
            config.api.base_url = base_url;
        }
        if let Some(secs) = self.timeout {
            config.api.request_timeout = std::time::Duration::from_secs(secs);
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = match Cli::parse().into_config() {
        Ok(config) => config,
        Err(e) => {
            error!(error_code = e.error_code(), error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    info!(
        base_url = %config.api.base_url,
        limit = config.api.limit,
        lang = %config.api.language,
        output = %config.output.dir.display(),
        "Starting export"
    );

    match pipeline::run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error_code = e.error_code(), error = %e, "Export failed");
            ExitCode::FAILURE
        }
    }
}
