//! `hc` command line entry point.
//!
//! Usage:
//! ```text
//! hc serve --port 8080
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use hc::api::{self, AppState};
use hc::config::{self, ServerConfig, DEFAULT_BIND_ADDRESS, DEFAULT_PORT};
use hc::logging::{init_logging, LogFormat, LoggingConfig};
use hc::{ProxyExecutor, Store};
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(name = "hc", version)]
#[command(about = "HTTP Client - a browser-based GUI HTTP client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the local web server that hosts the HTTP client interface
    Serve(ServeArgs),
}

#[derive(Args)]
struct ServeArgs {
    /// Port to run the server on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Address to bind
    #[arg(long, default_value = DEFAULT_BIND_ADDRESS)]
    bind: String,

    /// Database file (default: ~/.hc/hc.db)
    #[arg(long, env = "HC_DB_PATH")]
    db_path: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    /// Write logs to daily files in this directory instead of stderr
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Serve(args) => serve(args).await,
    }
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let _log_guard = init_logging(&LoggingConfig {
        format: args.log_format,
        log_dir: args.log_dir,
    })
    .context("failed to initialize logging")?;

    let db_path = match args.db_path {
        Some(path) => path,
        None => config::default_db_path().context("failed to get database path")?,
    };
    let config = ServerConfig {
        port: args.port,
        bind_address: args.bind,
        db_path,
    };

    let store = Store::open(&config.db_path).context("failed to initialize database")?;
    let executor = ProxyExecutor::new().context("failed to create HTTP client")?;

    let listener = TcpListener::bind(config.listen_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr()))?;

    tracing::info!(port = config.port, "Starting HC server");
    tracing::info!("Open {} in your browser", config.ui_url());

    api::serve(listener, AppState::new(store, executor, config.port)).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
