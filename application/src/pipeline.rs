use crate::retriever::Retriever;
use domain::errors::{StageError, StageResult};
use domain::models::{AnalysisReport, Passage};
use domain::providers::{PassageIndex, SynthesisModel, TextEmbedder, VisionModel};
use infrastructure::config::Config;
use infrastructure::corpus_store::CorpusStore;
use infrastructure::groq_client::GroqClient;
use infrastructure::ollama_client::OllamaClient;
use shared::types::Result;
use shared::utils::truncate_chars;
use std::path::Path;
use tracing::info;

/// Separator placed between passages in the synthesis context.
pub const PASSAGE_SEPARATOR: &str = "\n\n═════════════════\n\n";

/// Hard cap on the synthesis context, counted in characters.
pub const MAX_CONTEXT_CHARS: usize = 6000;

/// Appended whenever the context was cut at the cap.
pub const TRUNCATION_MARKER: &str = "\n\n[Additional content truncated]";

/// Joins passage texts with the separator and enforces the context cap.
/// Truncation happens on a hard character boundary and is always marked;
/// it is data shaping, not a failure.
pub fn build_context(passages: &[Passage]) -> String {
    let joined = passages
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join(PASSAGE_SEPARATOR);
    if joined.chars().count() <= MAX_CONTEXT_CHARS {
        return joined;
    }
    let mut context = truncate_chars(&joined, MAX_CONTEXT_CHARS).to_string();
    context.push_str(TRUNCATION_MARKER);
    context
}

/// Staged analysis pipeline: vision description, passage retrieval, then
/// educational synthesis. The first stage failure ends the run; no stage is
/// retried and no state survives between runs.
pub struct AnalysisPipeline<V, E, I, S> {
    vision: V,
    retriever: Retriever<E, I>,
    synthesizer: S,
}

impl<V, E, I, S> AnalysisPipeline<V, E, I, S>
where
    V: VisionModel,
    E: TextEmbedder,
    I: PassageIndex,
    S: SynthesisModel,
{
    pub fn new(vision: V, retriever: Retriever<E, I>, synthesizer: S) -> Self {
        Self {
            vision,
            retriever,
            synthesizer,
        }
    }

    /// Reads the image from disk and analyzes it. A missing or unreadable
    /// path fails before any model is called.
    pub async fn analyze(&self, image_path: &Path) -> StageResult<AnalysisReport> {
        if !image_path.exists() {
            return Err(StageError::ImageNotFound {
                path: image_path.display().to_string(),
            });
        }
        let image = std::fs::read(image_path).map_err(|err| StageError::ImageUnreadable {
            path: image_path.display().to_string(),
            reason: err.to_string(),
        })?;
        self.analyze_bytes(&image).await
    }

    /// Runs the three stages over raw image bytes.
    pub async fn analyze_bytes(&self, image: &[u8]) -> StageResult<AnalysisReport> {
        info!(bytes = image.len(), "starting image analysis");

        let vision_analysis = self
            .vision
            .describe(image)
            .await
            .map_err(|err| StageError::Vision {
                reason: err.to_string(),
            })?;
        info!(
            chars = vision_analysis.chars().count(),
            "vision stage complete"
        );

        let passages = self.retriever.retrieve(&vision_analysis).await?;
        info!(passages = passages.len(), "retrieval stage complete");

        let context = build_context(&passages);
        let synthesis = self
            .synthesizer
            .synthesize(&vision_analysis, &context)
            .await
            .map_err(|err| StageError::Synthesis {
                reason: err.to_string(),
            })?;
        info!(chars = synthesis.chars().count(), "synthesis stage complete");

        let sources = passages.len();
        Ok(AnalysisReport {
            vision_analysis,
            passages,
            synthesis,
            sources,
        })
    }
}

/// Wires the pipeline against the live providers named in `Config`.
pub fn from_config(
    config: &Config,
) -> Result<AnalysisPipeline<OllamaClient, OllamaClient, CorpusStore, GroqClient>> {
    let ollama = OllamaClient::new(config)?;
    let store = CorpusStore::open(&config.corpus_db_path)?;
    let corpus_len = store.len()?;
    info!(
        corpus = corpus_len,
        db = %config.corpus_db_path,
        "corpus store ready"
    );
    let retriever = Retriever::new(ollama.clone(), store, config.top_k);
    let synthesizer = GroqClient::new(config)?;
    Ok(AnalysisPipeline::new(ollama, retriever, synthesizer))
}
