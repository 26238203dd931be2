//! Read-only SQLite verse store.

pub mod error;
pub mod repository;

pub use error::StoreError;
pub use repository::SqliteCorpusStore;
