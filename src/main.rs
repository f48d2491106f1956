//! SurfsUp
//!
//! Command-line entry point:
//! - `serve`: run the API server (default)
//! - `check`: verify the dataset and print a summary
//! - `config`: print a default config file

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use surfsup::api::{serve, AppState};
use surfsup::config::{generate_default_config, Config, LoggingConfig};
use surfsup::query;
use surfsup::store::SqliteStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "surfsup")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Read-only climate API over the Hawaii weather dataset")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the SQLite dataset, overrides the config file
    #[arg(short, long, global = true)]
    pub database: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the API server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Verify the dataset schema and print a summary
    Check,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Config { output }) = &cli.command {
        return write_default_config(output.as_ref());
    }

    // An explicit or discovered file that fails to load stops startup
    let source = cli
        .config
        .clone()
        .or_else(|| Config::find(&Config::default_paths()));
    let mut config = match &source {
        Some(path) => Config::load_with_env(path)?,
        None => Config::from_env()?,
    };
    if let Some(database) = cli.database {
        config.store.database_path = database;
    }

    init_tracing(&config.logging);

    match &source {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("Using default config with environment overrides"),
    }

    match cli.command {
        Some(Commands::Check) => check(&config),
        Some(Commands::Serve { host, port }) => {
            if let Some(host) = host {
                config.api.host = host;
            }
            if let Some(port) = port {
                config.api.port = port;
            }
            run_server(config).await
        }
        Some(Commands::Config { .. }) => Ok(()),
        None => run_server(config).await,
    }
}

/// Initialize tracing; `RUST_LOG` takes precedence over the config level
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "surfsup={level},tower_http={level}",
            level = logging.level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format.eq_ignore_ascii_case("json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn open_store(config: &Config) -> anyhow::Result<SqliteStore> {
    let path = &config.store.database_path;
    SqliteStore::open_with_timeout(path, config.store.busy_timeout())
        .with_context(|| format!("Unable to open dataset {}", path))
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    tracing::info!("Starting SurfsUp API server v{}", env!("CARGO_PKG_VERSION"));

    let store = Arc::new(open_store(&config)?);
    let summary = query::summary(store.as_ref())?;
    tracing::info!("Dataset {:?}: {}", store.path(), summary);

    let active_station = config.observations.active_station();
    tracing::info!("Active station: {}", active_station);

    let state = AppState::with_active_station(store, config.api.clone(), active_station);
    serve(state, &config.api).await?;

    tracing::info!("SurfsUp API server stopped");
    Ok(())
}

fn check(config: &Config) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let summary = query::summary(&store)?;
    let stations = query::station_metadata(&store)?;

    println!("Dataset: {}", store.path().display());
    println!("Schema:  ok");
    println!("Summary: {}", summary);
    println!();
    println!(
        "{:<12} {:<40} {:>9} {:>10} {:>9}",
        "STATION", "NAME", "LAT", "LON", "ELEV"
    );
    for station in stations {
        println!(
            "{:<12} {:<40} {:>9.4} {:>10.4} {:>9.1}",
            station.id, station.name, station.latitude, station.longitude, station.elevation
        );
    }

    Ok(())
}

fn write_default_config(output: Option<&PathBuf>) -> anyhow::Result<()> {
    let content = generate_default_config();
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Unable to write {}", path.display()))?;
            println!("Config written to {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}
