//! Database schema and seed command

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use trivia_core::SeedData;
use trivia_server::db::{connect, migrations};

use crate::config::TriviaConfig;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides config/environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Load questions from a JSON seed file after migrating
    #[arg(long, value_name = "PATH", conflicts_with = "bundled_seed")]
    pub seed_file: Option<PathBuf>,

    /// Load the bundled question bank after migrating
    #[arg(long)]
    pub bundled_seed: bool,
}

/// Create tables and optionally load seed data
pub async fn run_migrate(args: MigrateArgs, config: TriviaConfig) -> Result<()> {
    let database_url = args
        .database_url
        .or(config.database.url)
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or ~/.trivia/config.toml")?;

    let pool = connect(&database_url, config.database.max_connections)
        .await
        .context("Failed to create database pool")?;
    migrations::run(&pool).await.context("Migration failed")?;

    let seed = match (args.seed_file, args.bundled_seed) {
        (Some(path), _) => Some(
            SeedData::from_path(&path)
                .context(format!("Failed to load seed file {}", path.display()))?,
        ),
        (None, true) => Some(SeedData::bundled().context("Bundled seed data is invalid")?),
        (None, false) => None,
    };

    if let Some(seed) = seed {
        let count = migrations::seed(&pool, seed)
            .await
            .context("Failed to load seed data")?;
        println!("Loaded {} questions", count);
    }

    println!("Migrations complete");
    Ok(())
}
