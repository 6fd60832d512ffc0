use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use logbook::config::{self, Command};
use logbook::{FileStore, LogStore, Meta};
use simple_logger::SimpleLogger;

#[tokio::main]
async fn main() -> Result<()> {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .env()
        .init()
        .context("Failed to initialize logger")?;

    // Parse command-line arguments
    let cli = config::Cli::parse();

    // Load configuration
    let config = config::load_config(&cli)?;
    info!(
        "Using storage directory {:?} (remote delivery {})",
        config.storage_dir,
        if config.remote.is_enabled() { "enabled" } else { "disabled" }
    );

    let store = LogStore::new(FileStore::new(&config.storage_dir), config.remote);

    match cli.command {
        Command::Log {
            level,
            action,
            meta,
        } => {
            let meta = meta.as_deref().map(parse_meta).transpose()?;
            let entry = store.log(level, action, meta).await;
            println!("{}", serde_json::to_string(&entry)?);
        }
        Command::Show => {
            for entry in store.get_logs() {
                println!("{}", serde_json::to_string(&entry)?);
            }
        }
        Command::Clear => {
            store.clear_logs();
            info!("Stored logs cleared");
        }
    }

    Ok(())
}

fn parse_meta(raw: &str) -> Result<Meta> {
    let value: serde_json::Value =
        serde_json::from_str(raw).context("Invalid --meta value: not JSON")?;
    match value {
        serde_json::Value::Object(map) => Ok(map),
        _ => anyhow::bail!("Invalid --meta value: expected a JSON object"),
    }
}
