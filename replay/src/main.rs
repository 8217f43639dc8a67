//! Strata event replay
//!
//! Feeds a recording of gateway dispatches through the normalizer and cache,
//! printing each normalized event as a JSON line. No network is involved:
//! fetches fail with an offline transport.
//!
//! Usage:
//!   strata-replay --config bot.toml --seed cache.json --events dispatches.jsonl
//!
//! Without `--events`, dispatches are read from stdin.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::sync::Arc;
use strata_client::{Client, ClientConfig, EventPipeline, OfflineRest};
use strata_replay::{parse_seed, replay, seed_cache};
use strata_types::Snowflake;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "strata-replay")]
#[command(about = "Replay recorded gateway dispatches through the Strata pipeline")]
struct Args {
    /// Path to the client config (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bot user id, used when no config file is given
    #[arg(long, default_value = "0")]
    bot_id: Snowflake,

    /// Cache snapshot to seed before replaying (JSON)
    #[arg(short, long)]
    seed: Option<PathBuf>,

    /// Recorded dispatches, one JSON object per line
    #[arg(short, long)]
    events: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();

    let config = match &args.config {
        Some(path) => ClientConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ClientConfig {
            bot_id: args.bot_id,
            cache: Default::default(),
        },
    };
    info!("Replaying as bot {}", config.bot_id);

    let client = Arc::new(Client::from_config(&config, Arc::new(OfflineRest)));

    if let Some(path) = &args.seed {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed {}", path.display()))?;
        seed_cache(&client, parse_seed(&contents)?).await?;
    }

    let pipeline = EventPipeline::new(client);
    let stdout = io::stdout().lock();
    let summary = match &args.events {
        Some(path) => {
            let file = fs::File::open(path)
                .with_context(|| format!("Failed to open events {}", path.display()))?;
            replay(&pipeline, BufReader::new(file), stdout).await?
        }
        None => replay(&pipeline, io::stdin().lock(), stdout).await?,
    };

    info!(
        "Replay finished: {} normalized, {} failed",
        summary.normalized, summary.failed
    );
    Ok(())
}
