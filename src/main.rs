use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use league_table::api::routes::standings::StandingsResponse;
use league_table::api::state::AppState;
use league_table::cache::MatchCache;
use league_table::calculate;
use league_table::config::AppConfig;
use league_table::source::CsvFileSource;

#[derive(Parser)]
#[command(name = "league-table")]
#[command(about = "Ligue 1 standings and head-to-head statistics from match results")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Match results CSV (overrides data file discovery)
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the standings tables as JSON
    Standings,

    /// Print a team's head-to-head record as JSON
    H2h {
        /// Team name (full or partial)
        team: String,
    },
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // stdout is reserved for command output
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn build_cache(config: &AppConfig) -> Result<MatchCache> {
    let start_dir = std::env::current_dir().context("Failed to resolve working directory")?;
    let source = CsvFileSource::new(config.data.location(start_dir), config.parse_options());
    Ok(MatchCache::new(Arc::new(source), config.cache_ttl()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
    if let Some(path) = cli.data_file {
        config.data.path = Some(path);
    }

    let level = cli.log_level.clone().unwrap_or_else(|| config.log_level.clone());
    init_tracing(&level, cli.json_logs);

    tracing::info!("Starting league-table v{}", env!("CARGO_PKG_VERSION"));

    let cache = build_cache(&config)?;

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            // Warm the cache; a failure here is retried on the first request
            if let Err(e) = cache.get_matches().await {
                tracing::warn!("Initial data load failed: {}", e);
            }

            let state = AppState::new(cache);
            let app = league_table::api::build_router(state, &config.server.cors_origin);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Standings => {
            let snapshot = cache.get_matches().await?;
            let rows = calculate::standings(&snapshot.matches);
            let response = StandingsResponse::from_rows(&rows);
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::H2h { team } => {
            let snapshot = cache.get_matches().await?;
            let rows = calculate::head_to_head_table(&snapshot.matches, &team);
            if rows.is_empty() {
                tracing::warn!("No matches found for {:?}", team);
            }
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
    }

    Ok(())
}
