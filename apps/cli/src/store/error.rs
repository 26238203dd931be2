//! Store error types.

use reciflow_core::CorpusError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("invalid corpus: {0}")]
    Corpus(#[from] CorpusError),

    #[error("the verses table is empty")]
    EmptyCorpus,
}
