use domain::errors::{StageError, StageResult};
use domain::models::Passage;
use domain::providers::{PassageIndex, TextEmbedder};
use shared::utils::truncate_chars;
use tracing::debug;

/// Anchor terms prepended to every search query so retrieval stays inside the
/// neuro-oncology vocabulary of the corpus even when the vision description
/// wanders.
pub const ANCHOR_TERMS: [&str; 3] = ["brain tumor", "glioblastoma", "mass lesion"];

/// Upper bound on how many characters of the vision description join the
/// search query.
pub const MAX_SIGNAL_CHARS: usize = 600;

/// Builds the retrieval query: the anchor terms followed by a bounded prefix
/// of the vision description, joined with single spaces. The cap counts
/// characters, not bytes, and never splits a character.
pub fn compose_query(signal: &str) -> String {
    let mut parts: Vec<&str> = ANCHOR_TERMS.to_vec();
    parts.push(truncate_chars(signal, MAX_SIGNAL_CHARS));
    parts.join(" ")
}

/// Retrieval stage: embeds the composed query and ranks corpus passages by
/// vector distance.
pub struct Retriever<E, I> {
    embedder: E,
    index: I,
    top_k: usize,
}

impl<E: TextEmbedder, I: PassageIndex> Retriever<E, I> {
    /// Callers supply `top_k >= 1`; a cap of zero fails every retrieval with
    /// `NoPassages`.
    pub fn new(embedder: E, index: I, top_k: usize) -> Self {
        Self {
            embedder,
            index,
            top_k,
        }
    }

    /// Returns up to `top_k` passages in ascending distance order. An empty
    /// result is a stage failure, never an empty success.
    pub async fn retrieve(&self, signal: &str) -> StageResult<Vec<Passage>> {
        let query = compose_query(signal);
        let embedding = self
            .embedder
            .embed(&query)
            .await
            .map_err(|err| StageError::Embedding {
                reason: err.to_string(),
            })?;
        let passages = self
            .index
            .nearest_neighbors(&embedding, self.top_k)
            .await
            .map_err(|err| StageError::Retrieval {
                reason: err.to_string(),
            })?;
        if passages.is_empty() {
            return Err(StageError::NoPassages);
        }
        debug!(
            query_chars = query.chars().count(),
            passages = passages.len(),
            "retrieval complete"
        );
        Ok(passages)
    }
}
