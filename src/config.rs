use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

pub const SERVER_URL_ENV: &str = "LOGBOOK_SERVER_URL";
pub const SERVER_TOKEN_ENV: &str = "LOGBOOK_SERVER_TOKEN";
pub const STORAGE_DIR_ENV: &str = "LOGBOOK_STORAGE_DIR";

const DEFAULT_STORAGE_DIR: &str = "./logbook-data";

/// Remote collector settings, resolved once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteConfig {
    pub server_url: Option<String>,
    pub server_token: Option<String>,
}

impl RemoteConfig {
    /// Read `LOGBOOK_SERVER_URL` and `LOGBOOK_SERVER_TOKEN` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            server_url: non_empty(lookup(SERVER_URL_ENV)),
            server_token: non_empty(lookup(SERVER_TOKEN_ENV)),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.server_url.is_some()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Parser, Debug)]
#[clap(name = "logbook", version, about)]
pub struct Cli {
    /// Path to configuration file
    #[clap(long, default_value = "./logbook.toml")]
    pub config: PathBuf,

    /// Override the directory holding the log collection
    #[clap(long)]
    pub storage_dir: Option<PathBuf>,

    /// Override the remote collector URL
    #[clap(long)]
    pub server_url: Option<String>,

    /// Override the bearer token sent to the collector
    #[clap(long)]
    pub server_token: Option<String>,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record an entry
    Log {
        level: String,
        action: String,
        /// Metadata as a JSON object
        #[clap(long)]
        meta: Option<String>,
    },
    /// Print all stored entries, oldest first
    Show,
    /// Remove all stored entries
    Clear,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    storage_dir: Option<PathBuf>,
    server_url: Option<String>,
    server_token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub storage_dir: PathBuf,
    pub remote: RemoteConfig,
}

/// File values, then environment, then CLI flags. A missing file is not an error.
pub fn load_config(cli: &Cli) -> Result<Config> {
    load_config_with(cli, |key| env::var(key).ok())
}

pub fn load_config_with<F>(cli: &Cli, lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let file_config = if cli.config.exists() {
        let config_content = fs::read_to_string(&cli.config)
            .with_context(|| format!("Failed to read config file: {:?}", cli.config))?;
        toml::from_str(&config_content).context("Failed to parse config file")?
    } else {
        FileConfig::default()
    };

    let from_env = RemoteConfig::from_lookup(&lookup);

    let storage_dir = cli
        .storage_dir
        .clone()
        .or_else(|| non_empty(lookup(STORAGE_DIR_ENV)).map(PathBuf::from))
        .or(file_config.storage_dir)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR));

    let remote = RemoteConfig {
        server_url: non_empty(cli.server_url.clone())
            .or(from_env.server_url)
            .or(non_empty(file_config.server_url)),
        server_token: non_empty(cli.server_token.clone())
            .or(from_env.server_token)
            .or(non_empty(file_config.server_token)),
    };

    Ok(Config {
        storage_dir,
        remote,
    })
}
