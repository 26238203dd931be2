pub mod config;
pub mod display;
pub mod speech;
pub mod store;

use anyhow::Context;
use clap::Parser;
use reciflow_core::{RecitationSession, RunOutcome};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Args;
use crate::display::TerminalPrompt;
use crate::speech::StdinTranscriptSource;
use crate::store::SqliteCorpusStore;

pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout is the prompt.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let session_config = config::load_session_config(&args)?;

    tracing::info!("Loading corpus from {}...", args.db.display());
    let store = SqliteCorpusStore::open(&args.db)
        .with_context(|| format!("failed to open corpus database {}", args.db.display()))?;
    let corpus = store.load_corpus()?;
    tracing::info!(
        passages = corpus.len(),
        units = corpus.unit_ids().len(),
        "Corpus loaded"
    );

    let mut session = RecitationSession::new(&corpus, session_config)?;
    let speech = StdinTranscriptSource::spawn(std::io::BufReader::new(std::io::stdin()));
    let display = TerminalPrompt::new(std::io::stdout());

    tracing::info!("Recite...");
    match session.run(speech, display) {
        RunOutcome::CycleComplete => tracing::info!("All repetitions have been processed"),
        RunOutcome::InputExhausted => tracing::info!("No further input, stopping"),
        RunOutcome::NoCandidates => tracing::warn!("No passages to match against, stopping"),
    }

    println!("{}", serde_json::to_string_pretty(session.report())?);

    Ok(())
}
