/// Stage-level failures of the analysis pipeline.
///
/// Every variant names the stage it belongs to; detail strings from a
/// failing collaborator are carried verbatim in `reason`. A failure at one
/// stage means no later stage was invoked.
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    #[error("image not found: {path}")]
    ImageNotFound { path: String },

    #[error("failed to read image {path}: {reason}")]
    ImageUnreadable { path: String, reason: String },

    #[error("vision error: {reason}")]
    Vision { reason: String },

    #[error("embedding error: {reason}")]
    Embedding { reason: String },

    #[error("retrieval error: {reason}")]
    Retrieval { reason: String },

    #[error("no results retrieved")]
    NoPassages,

    #[error("synthesis error: {reason}")]
    Synthesis { reason: String },
}

pub type StageResult<T> = Result<T, StageError>;
