//! HTTP server command
//!
//! Picks the store from configuration: PostgreSQL when a database URL is
//! known, otherwise an in-memory store loaded from a seed file.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use trivia_core::{MemoryStore, QuestionStore, QuizSelector, SeedData};
use trivia_server::db::open_store;
use trivia_server::http::{run_server, AppState, ServerConfig};

use crate::config::TriviaConfig;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default from config: 127.0.0.1:5000)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config); omit to serve from memory
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// JSON seed file for the in-memory store (default: bundled question bank)
    #[arg(long, value_name = "PATH")]
    pub seed_file: Option<PathBuf>,

    /// Fixed seed for reproducible quiz draws
    #[arg(long)]
    pub rng_seed: Option<u64>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config: TriviaConfig) -> Result<()> {
    let server_config = ServerConfig {
        bind_addr: args.bind.unwrap_or(config.server.bind),
        cors_permissive: args.cors_permissive || config.server.cors_permissive,
    };

    let store: Arc<dyn QuestionStore> = match args.database_url.or(config.database.url) {
        Some(url) => {
            let store = open_store(&url, config.database.max_connections)
                .await
                .context("Failed to open PostgreSQL question store")?;
            tracing::info!("Using PostgreSQL question store");
            Arc::new(store)
        }
        None => {
            let seed = match args.seed_file.or(config.quiz.seed_file) {
                Some(path) => SeedData::from_path(&path)
                    .context(format!("Failed to load seed file {}", path.display()))?,
                None => SeedData::bundled().context("Bundled seed data is invalid")?,
            };
            let store = MemoryStore::from_seed(seed)
                .await
                .context("Failed to load seed data")?;
            tracing::info!("Using in-memory question store");
            Arc::new(store)
        }
    };

    let selector = match args.rng_seed.or(config.quiz.rng_seed) {
        Some(seed) => {
            tracing::info!(seed, "Quiz draws are seeded");
            QuizSelector::seeded(seed)
        }
        None => QuizSelector::default(),
    };

    tracing::info!("Starting trivia server on {}", server_config.bind_addr);
    run_server(AppState::new(store).with_selector(selector), server_config)
        .await
        .context("Server error")?;

    Ok(())
}
