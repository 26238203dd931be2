//! Verse table access.

use crate::store::error::StoreError;
use reciflow_core::{Corpus, CorpusStore, Passage};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

type Result<T> = std::result::Result<T, StoreError>;

const SELECT_VERSES: &str = "SELECT Chapter, Verse, Text FROM verses ORDER BY Chapter, Verse";

/// Corpus store backed by a `verses (Chapter, Verse, Text)` table.
pub struct SqliteCorpusStore {
    conn: Connection,
}

impl SqliteCorpusStore {
    /// Open an existing database read-only.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self { conn })
    }

    /// Wrap an already open connection (for testing).
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Load and validate the whole corpus.
    pub fn load_corpus(&self) -> Result<Corpus> {
        let passages = self.load_all()?;
        if passages.is_empty() {
            return Err(StoreError::EmptyCorpus);
        }
        Ok(Corpus::new(passages)?)
    }

    fn row_to_passage(row: &rusqlite::Row) -> rusqlite::Result<Passage> {
        Ok(Passage::new(row.get(0)?, row.get(1)?, row.get::<_, String>(2)?))
    }
}

impl CorpusStore for SqliteCorpusStore {
    type Error = StoreError;

    fn load_all(&self) -> Result<Vec<Passage>> {
        let mut stmt = self.conn.prepare(SELECT_VERSES)?;
        let passages = stmt
            .query_map([], Self::row_to_passage)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        tracing::debug!(count = passages.len(), "loaded verses");
        Ok(passages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reciflow_core::CorpusError;

    fn store_with(rows: &[(u32, u32, &str)]) -> SqliteCorpusStore {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE verses (Chapter INTEGER NOT NULL, Verse INTEGER NOT NULL, Text TEXT NOT NULL);",
        )
        .unwrap();
        for (chapter, verse, text) in rows {
            conn.execute(
                "INSERT INTO verses (Chapter, Verse, Text) VALUES (?1, ?2, ?3)",
                rusqlite::params![chapter, verse, text],
            )
            .unwrap();
        }
        SqliteCorpusStore::from_connection(conn)
    }

    #[test]
    fn loads_in_reading_order() {
        let store = store_with(&[
            (103, 2, "إن الإنسان لفي خسر"),
            (1, 1, "بسم الله الرحمن الرحيم"),
            (103, 1, "والعصر"),
        ]);

        let passages = store.load_all().unwrap();
        let keys: Vec<_> = passages.iter().map(|p| (p.unit_id, p.sequence)).collect();
        assert_eq!(keys, vec![(1, 1), (103, 1), (103, 2)]);
        assert_eq!(passages[1].text, "والعصر");
    }

    #[test]
    fn builds_corpus() {
        let store = store_with(&[(103, 1, "والعصر"), (103, 2, "إن الإنسان لفي خسر")]);
        let corpus = store.load_corpus().unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.last_sequence(103), Some(2));
    }

    #[test]
    fn empty_table_is_an_error() {
        let store = store_with(&[]);
        assert!(matches!(store.load_corpus(), Err(StoreError::EmptyCorpus)));
    }

    #[test]
    fn duplicate_rows_are_rejected() {
        let store = store_with(&[(103, 1, "والعصر"), (103, 1, "والعصر")]);
        assert!(matches!(
            store.load_corpus(),
            Err(StoreError::Corpus(CorpusError::DuplicatePassage {
                unit_id: 103,
                sequence: 1
            }))
        ));
    }

    #[test]
    fn rows_with_gaps_are_rejected() {
        let store = store_with(&[(1, 1, "a"), (1, 2, "b"), (1, 4, "d")]);
        assert!(matches!(
            store.load_corpus(),
            Err(StoreError::Corpus(CorpusError::SequenceGap {
                unit_id: 1,
                expected: 3,
                found: 4
            }))
        ));
    }

    #[test]
    fn missing_table_surfaces_sqlite_error() {
        let store = SqliteCorpusStore::from_connection(Connection::open_in_memory().unwrap());
        assert!(matches!(store.load_all(), Err(StoreError::Sqlite(_))));
    }

    #[test]
    fn open_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SqliteCorpusStore::open(dir.path().join("absent.db")).is_err());
    }
}
