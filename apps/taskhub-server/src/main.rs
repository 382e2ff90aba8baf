use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use std::path::PathBuf;

use taskhub_api::infra::storage::migrations::Migrator;
use taskhub_api::{router, AppState};

mod config;
mod logging;

use config::AppConfig;

/// Taskhub Server - multi-user task tracking API
#[derive(Parser)]
#[command(name = "taskhub-server")]
#[command(about = "Taskhub Server - multi-user task tracking API")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    logging::init(&config.logging, cli.verbose);
    tracing::info!("Taskhub Server starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config),
    }
}

async fn run_server(config: AppConfig) -> Result<()> {
    config.validate()?;

    tracing::info!("Connecting to database: {}", config.database.url);
    let db = Database::connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Running database migrations");
    Migrator::up(&db, None)
        .await
        .context("Failed to run migrations")?;

    let state = AppState::new(db, &config.auth);
    let app = router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn check_config(config: AppConfig) -> Result<()> {
    config.validate()?;
    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install ctrl-c handler: {e}");
    } else {
        tracing::info!("Shutdown signal received");
    }
}
