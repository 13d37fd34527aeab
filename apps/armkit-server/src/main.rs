mod seed;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use armkit::ConverterRegistry;
use armkit::rest::{ApiState, ListRouter, PaginationLimits, router};
use armkit_bootstrap::{AppConfig, CliArgs, init_logging};
use armkit_database::{DatabaseClient, InMemoryDatabaseClient};
use clap::{Parser, Subcommand};

/// armkit server - ARM-style resource listing over an in-memory store
#[derive(Parser)]
#[command(name = "armkit-server")]
#[command(about = "armkit server - ARM-style resource listing over an in-memory store")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (YAML) and exit
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
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.config
        && !path.is_file()
    {
        anyhow::bail!("config file does not exist: {}", path.display());
    }

    let args = CliArgs {
        port: cli.port,
        verbose: cli.verbose,
    };

    // defaults -> YAML (if provided) -> env (ARMKIT__*) -> CLI overrides
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    init_logging(&config.logging);

    if cli.print_config {
        println!("Effective configuration:\n{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(&config),
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    println!("Configuration is valid");
    println!("{}", config.to_yaml()?);
    Ok(())
}

fn converters() -> ConverterRegistry {
    daprrp::register_converters(corerp::register_converters(ConverterRegistry::new()))
}

async fn run_server(config: AppConfig) -> Result<()> {
    let store = Arc::new(InMemoryDatabaseClient::with_default_page_size(
        config.pagination.default_page_size,
    ));
    let db: Arc<dyn DatabaseClient> = store;
    if let Some(path) = &config.store.seed_file {
        seed::load(db.as_ref(), path).await?;
    }

    let converters = Arc::new(converters());
    let lists = daprrp::register_lists(
        corerp::register_lists(ListRouter::new(), &db, &converters),
        &db,
        &converters,
    );
    tracing::info!(list_routes = lists.len(), "registered resource providers");

    let state = ApiState::new(lists).with_pagination(PaginationLimits {
        min_top: config.pagination.min_top,
        max_top: config.pagination.max_top,
    });
    let app = router(state, config.server.request_timeout());

    let listener = tokio::net::TcpListener::bind(config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;
    tracing::info!(addr = %config.server.bind_addr, "armkit server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated with an error")?;
    tracing::info!("armkit server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
