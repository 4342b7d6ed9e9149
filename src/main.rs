//! Pokédex record server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Browser form post
//!     ─────────────────▶ http::server ──▶ http::handlers ──┬──▶ domain::normalize ──▶ store (insert/list)
//!                                                          └──▶ catalog::client ─────▶ remote catalog
//!     ◀───────────────── http::views / http::table ◀───────┘
//!
//!     stdin "stop" / Ctrl+C ──▶ lifecycle ──▶ stop accepting ──▶ store.close() ──▶ exit 0 | 1
//! ```
//!
//! Startup order: config → logging → metrics → store connect → bind → listen.
//! Any startup failure exits with code 1.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tokio::net::TcpListener;

use pokedex_server::catalog::CatalogClient;
use pokedex_server::config::resolve_config;
use pokedex_server::http::{AppState, HttpServer};
use pokedex_server::lifecycle::{signals, Lifecycle, OperatorConsole};
use pokedex_server::observability::{logging, metrics};
use pokedex_server::store;

#[derive(Parser)]
#[command(name = "pokedex-server")]
#[command(about = "Record front end with remote catalog lookups", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config and PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match resolve_config(cli.config.as_deref(), cli.port) {
        Ok(config) => config,
        Err(e) => {
            logging::init_logging("info");
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::from(1);
        }
    };

    logging::init_logging(&config.observability.log_level);
    if let Err(e) = dotenv {
        tracing::debug!("No .env file loaded: {}", e);
    }
    tracing::info!("pokedex-server v{} starting", env!("CARGO_PKG_VERSION"));

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics endpoint");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // The store must be ready before any request can arrive.
    let store = match store::connect(&config.store).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, "Database connection failed");
            return ExitCode::from(1);
        }
    };

    let catalog = match CatalogClient::new(&config.catalog) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Catalog client setup failed");
            return ExitCode::from(1);
        }
    };

    let listener = match TcpListener::bind(config.listener.bind_address()).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(address = %config.listener.bind_address(), error = %e, "Server startup failed");
            return ExitCode::from(1);
        }
    };

    let mut listener_config = config.listener.clone();
    if let Ok(addr) = listener.local_addr() {
        listener_config.port = addr.port();
    }
    let base_url = listener_config.base_url();

    let lifecycle = Lifecycle::new(store.clone());
    let state = AppState::new(store, catalog, &base_url);
    let server = HttpServer::new(&config, state);

    let server_shutdown = lifecycle.subscribe();
    tokio::spawn(async move {
        if let Err(e) = server.run(listener, server_shutdown).await {
            tracing::error!(error = %e, "HTTP server failed");
        }
    });

    lifecycle.mark_listening();
    tracing::info!("Server active at {}", base_url);
    println!("Type 'stop' to shutdown:");

    let mut console = OperatorConsole::stdin();
    let stop_requested = tokio::select! {
        stop = console.wait_for_stop() => stop,
        _ = signals::interrupt() => true,
    };
    if !stop_requested {
        tracing::info!("Waiting for Ctrl+C to shut down");
        signals::interrupt().await;
    }

    match lifecycle.shutdown().await {
        Some(outcome) => {
            tracing::info!(exit_code = outcome.exit_code(), "Shutdown complete");
            ExitCode::from(outcome.exit_code())
        }
        None => ExitCode::SUCCESS,
    }
}
