//! Command line and session configuration.

use anyhow::Context;
use clap::Parser;
use reciflow_core::SessionConfig;
use std::path::{Path, PathBuf};

/// Follow a Quran recitation verse by verse.
///
/// Recognized text is read from standard input, one utterance per line.
#[derive(Debug, Parser)]
#[command(name = "reciflow", version)]
pub struct Args {
    /// SQLite database with a `verses (Chapter, Verse, Text)` table.
    #[arg(long, env = "RECIFLOW_DB", default_value = "verses.db")]
    pub db: PathBuf,

    /// JSON file with session thresholds and pacing.
    #[arg(long, env = "RECIFLOW_CONFIG")]
    pub config: Option<PathBuf>,

    /// Chapters to search when identifying the start (comma separated).
    #[arg(long, value_delimiter = ',')]
    pub units: Vec<u32>,

    /// Units recited in one full cycle.
    #[arg(long)]
    pub repetitions: Option<u32>,

    /// Seconds to wait for speech before giving up.
    #[arg(long)]
    pub max_wait: Option<u64>,
}

/// Read a session config from a JSON file. Missing fields take defaults.
pub fn read_config_file(path: &Path) -> anyhow::Result<SessionConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("invalid config file {}", path.display()))
}

/// Resolve the session config: file (or defaults), then flag overrides.
pub fn load_session_config(args: &Args) -> anyhow::Result<SessionConfig> {
    let mut config = match &args.config {
        Some(path) => read_config_file(path)?,
        None => SessionConfig::default(),
    };

    if !args.units.is_empty() {
        config.start_units = Some(args.units.clone());
    }
    if let Some(repetitions) = args.repetitions {
        config.repetition_cap = repetitions;
    }
    if let Some(max_wait) = args.max_wait {
        config.max_wait_secs = max_wait;
    }

    config.validate()?;
    Ok(config)
}
