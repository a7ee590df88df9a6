use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use noteful_api::config::{config, AppConfig};
use noteful_api::database::{DatabaseManager, MemoryStore, PgStore, Storage};
use noteful_api::{app, AppState};

#[derive(Parser)]
#[command(name = "noteful-api")]
#[command(about = "Folders and notes REST API")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Port to listen on (overrides API_PORT)")]
        port: Option<u16>,

        #[arg(long, help = "Keep data in memory instead of PostgreSQL")]
        memory: bool,
    },

    #[command(about = "Apply pending database migrations and exit")]
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("noteful_api=info,tower_http=info")),
        )
        .init();

    let config = config();
    tracing::info!("Starting Noteful API in {:?} mode", config.environment);

    match Cli::parse().command.unwrap_or(Commands::Serve { port: None, memory: false }) {
        Commands::Serve { port, memory } => serve(config, port, memory).await,
        Commands::Migrate => {
            let pool = DatabaseManager::connect(&config.database).await?;
            DatabaseManager::migrate(&pool).await?;
            Ok(())
        }
    }
}

async fn serve(config: &AppConfig, port: Option<u16>, memory: bool) -> anyhow::Result<()> {
    let store: Arc<dyn Storage> = if memory {
        tracing::warn!("Using in-memory storage; data is lost on exit");
        Arc::new(MemoryStore::new())
    } else {
        let pool = DatabaseManager::connect(&config.database).await?;
        if config.database.run_migrations {
            DatabaseManager::migrate(&pool).await?;
        }
        Arc::new(PgStore::new(pool))
    };

    let state = AppState::new(store, &config.api.base_path);
    let router = app(state, config);

    let bind_addr = match port {
        Some(port) => format!("{}:{}", config.api.host, port),
        None => config.bind_addr(),
    };
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Noteful API listening on http://{}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
