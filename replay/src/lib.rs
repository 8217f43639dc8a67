//! Replay support for the `strata-replay` binary.
//!
//! Seeds a client's cache from a snapshot, then feeds recorded gateway
//! dispatches through an [`EventPipeline`] and writes one JSON line per
//! dispatch.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::io::{BufRead, Write};
use strata_client::{Client, EventPipeline, NormalizedEvent};
use strata_types::{EntityKind, GatewayDispatch};
use tracing::{debug, info, warn};

/// Raw wire records keyed by kind, e.g. `{"message": [{...}], "guild": [...]}`.
pub type Seed = HashMap<EntityKind, Vec<Value>>;

/// One line of replay output.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ReplayRecord {
    Normalized { t: String, d: NormalizedEvent },
    Failed { t: String, error: String },
}

/// Counts reported once the replay finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub normalized: usize,
    pub failed: usize,
}

/// Parses a seed snapshot.
pub fn parse_seed(json: &str) -> Result<Seed> {
    serde_json::from_str(json).context("Failed to parse seed snapshot")
}

/// Builds every seed record with the client's builder and stores it.
/// Returns how many records were stored.
pub async fn seed_cache(client: &Client, seed: Seed) -> Result<usize> {
    let mut stored = 0;
    for (kind, records) in seed {
        if !client.cache().is_enabled(kind) {
            debug!("Skipping {} seed records: section disabled", kind);
            continue;
        }
        for raw in records {
            let structure = client
                .builder()
                .build(kind, &raw)
                .with_context(|| format!("Invalid {kind} seed record"))?;
            client.cache().set(structure).await;
            stored += 1;
        }
    }
    info!("Seeded {} records", stored);
    Ok(stored)
}

/// Replays newline-delimited dispatches from `events`, writing one record
/// per dispatch to `out`. Blank lines are skipped; a line that is not a
/// dispatch aborts the replay.
pub async fn replay<R: BufRead, W: Write>(
    pipeline: &EventPipeline,
    events: R,
    mut out: W,
) -> Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();

    for (index, line) in events.lines().enumerate() {
        let line = line.context("Failed to read event stream")?;
        if line.trim().is_empty() {
            continue;
        }
        let dispatch: GatewayDispatch = serde_json::from_str(&line)
            .with_context(|| format!("Line {} is not a gateway dispatch", index + 1))?;
        let name = dispatch.t.clone();

        let record = match pipeline.handle(dispatch).await {
            Ok(event) => {
                summary.normalized += 1;
                ReplayRecord::Normalized { t: name, d: event }
            }
            Err(e) => {
                warn!("Line {}: {}", index + 1, e);
                summary.failed += 1;
                ReplayRecord::Failed {
                    t: name,
                    error: e.to_string(),
                }
            }
        };
        serde_json::to_writer(&mut out, &record)?;
        writeln!(out)?;
    }

    out.flush()?;
    Ok(summary)
}
