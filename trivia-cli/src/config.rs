//! Configuration file and the `config` subcommand
//!
//! Layering, lowest to highest: built-in defaults, `~/.trivia/config.toml`
//! (or `$TRIVIA_CONFIG`), environment (`DATABASE_URL`), command-line flags.

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

/// Settings for the trivia binary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriviaConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
    pub quiz: QuizSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind: SocketAddr,
    pub cors_permissive: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
            cors_permissive: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// PostgreSQL URL; without one the server runs on an in-memory store
    pub url: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: trivia_server::db::DEFAULT_MAX_CONNECTIONS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizSection {
    /// Fixed seed for reproducible quiz draws
    pub rng_seed: Option<u64>,
    /// JSON seed file for the in-memory store
    pub seed_file: Option<PathBuf>,
}

impl TriviaConfig {
    /// Load the config file, falling back to defaults when it does not exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .context(format!("Failed to read config file: {:?}", config_path))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file (invalid TOML)")
    }

    /// Config file path: $TRIVIA_CONFIG or ~/.trivia/config.toml
    pub fn config_path() -> PathBuf {
        if let Ok(path) = env::var("TRIVIA_CONFIG") {
            return PathBuf::from(path);
        }
        Self::config_dir().join("config.toml")
    }

    /// ~/.trivia
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".trivia")
    }
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a config file with default values
    Init(InitArgs),
    /// Print the effective configuration as TOML
    Show,
    /// Show config file path
    Path,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Init(args) => run_init(args),
        ConfigCommands::Show => run_show(),
        ConfigCommands::Path => {
            println!("{}", TriviaConfig::config_path().display());
            Ok(())
        }
    }
}

fn run_init(args: InitArgs) -> Result<()> {
    let config_path = TriviaConfig::config_path();

    if config_path.exists() && !args.force {
        anyhow::bail!(
            "Config already exists at {:?}\n\nUse --force to overwrite",
            config_path
        );
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let content = toml::to_string_pretty(&TriviaConfig::default())
        .context("Failed to serialize default config")?;
    fs::write(&config_path, content)
        .context(format!("Failed to write config file: {:?}", config_path))?;

    println!("Created config at: {:?}", config_path);
    Ok(())
}

fn run_show() -> Result<()> {
    let config = TriviaConfig::load()?;
    print!(
        "{}",
        toml::to_string_pretty(&config).context("Failed to serialize config")?
    );
    Ok(())
}
