use crate::search::SearchEngine;
use domain::models::{CorpusEntry, Passage};
use domain::providers::PassageIndex;
use rusqlite::{params, Connection, Result as SqlResult};
use shared::types::Result;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// SQLite-backed corpus of pre-embedded passages.
///
/// The pipeline only reads from it; `insert_entries` is the seam a separate
/// ingestion step (or a test) uses to populate it. The connection sits
/// behind a mutex so the store can be shared across concurrent lookups.
pub struct CorpusStore {
    conn: Mutex<Connection>,
}

impl CorpusStore {
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        if let Some(parent) = db_path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(db_path)?;
        Self::setup_db(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory store, used by tests and throwaway corpora.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::setup_db(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn setup_db(conn: &Connection) -> SqlResult<()> {
        conn.execute_batch(
            "
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
            PRAGMA cache_size=-64000;
            PRAGMA temp_store=MEMORY;
            CREATE TABLE IF NOT EXISTS passages (
                id INTEGER PRIMARY KEY,
                text TEXT NOT NULL,
                embedding BLOB NOT NULL
            );
        ",
        )
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| anyhow::anyhow!("corpus store lock poisoned: {e}"))
    }

    /// Bulk-insert pre-embedded passages in one transaction.
    pub fn insert_entries(&self, entries: &[CorpusEntry]) -> Result<()> {
        let conn = self.lock()?;
        let tx = conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare("INSERT INTO passages (text, embedding) VALUES (?1, ?2)")?;
            for entry in entries {
                let embedding_bytes = serde_json::to_vec(&entry.embedding)?;
                stmt.execute(params![entry.text, embedding_bytes])?;
            }
        }
        tx.commit()?;
        debug!(inserted = entries.len(), "corpus entries stored");
        Ok(())
    }

    /// Number of passages currently stored.
    pub fn len(&self) -> Result<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM passages", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Rank the whole corpus by ascending distance to `query` and return
    /// the best `k` rows.
    pub fn nearest(&self, query: &[f32], k: usize) -> Result<Vec<Passage>> {
        let conn = self.lock()?;
        let entries = Self::load_entries(&conn)?;
        let ranked = SearchEngine::nearest(query, &entries, k);
        debug!(
            corpus = entries.len(),
            returned = ranked.len(),
            "nearest-neighbor lookup"
        );
        Ok(ranked)
    }

    fn load_entries(conn: &Connection) -> Result<Vec<CorpusEntry>> {
        let mut stmt = conn.prepare("SELECT text, embedding FROM passages")?;
        let mut rows = stmt.query([])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            let text: String = row.get(0)?;
            let embedding_bytes: Vec<u8> = row.get(1)?;
            let embedding: Vec<f32> = serde_json::from_slice(&embedding_bytes)?;
            entries.push(CorpusEntry { text, embedding });
        }
        Ok(entries)
    }
}

impl PassageIndex for CorpusStore {
    async fn nearest_neighbors(&self, query: &[f32], k: usize) -> Result<Vec<Passage>> {
        self.nearest(query, k)
    }
}
