use crate::models::Passage;
use shared::types::Result;

/// Vision-capable model: turns raw image bytes into a textual description
/// of the visual features it observes.
pub trait VisionModel {
    fn describe(&self, image: &[u8]) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// Text embedding provider.
pub trait TextEmbedder {
    fn embed(&self, text: &str) -> impl std::future::Future<Output = Result<Vec<f32>>> + Send;
}

/// Nearest-neighbor lookup over the pre-embedded passage corpus.
/// Implementations return at most `k` rows ordered by ascending distance.
pub trait PassageIndex {
    fn nearest_neighbors(
        &self,
        query: &[f32],
        k: usize,
    ) -> impl std::future::Future<Output = Result<Vec<Passage>>> + Send;
}

/// Language model that synthesizes an explanation from a visual description
/// and retrieved reference passages.
pub trait SynthesisModel {
    fn synthesize(
        &self,
        description: &str,
        context: &str,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}
