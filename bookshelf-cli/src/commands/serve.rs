//! HTTP server command
//!
//! Runs the bookshelf API against PostgreSQL, or against the in-memory
//! store with `--in-memory`.

use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};
use clap::Parser;

use bookshelf_server::db::{PoolConfig, DEFAULT_MAX_CONNECTIONS};
use bookshelf_server::{run_server, AppState, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Address to bind to
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", required_unless_present = "in_memory")]
    pub database_url: Option<String>,

    /// Maximum connections in the database pool
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Serve from an in-process store instead of PostgreSQL (data is lost on exit).
    /// Takes precedence over `--database-url`.
    #[arg(long)]
    pub in_memory: bool,
}

impl ServeArgs {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: SocketAddr::new(self.host, self.port),
            cors_permissive: self.cors_permissive,
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.server_config();

    let state = match args.database_url.as_deref() {
        Some(database_url) if !args.in_memory => {
            let pool = PoolConfig::new(database_url)
                .max_connections(args.max_connections)
                .connect()
                .await
                .context("Failed to create database pool")?;
            tracing::info!(max_connections = args.max_connections, "Database pool ready");
            AppState::postgres(pool)
        }
        _ => {
            tracing::warn!("Using in-memory store; data will not persist");
            AppState::in_memory()
        }
    };

    tracing::info!("Starting bookshelf server on {}", config.bind_addr);

    // Blocks until shutdown
    run_server(state, config).await.context("Server error")?;

    Ok(())
}
