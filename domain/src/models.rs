use serde::{Deserialize, Serialize};

/// One ranked corpus hit. `distance` is cosine-derived dissimilarity:
/// lower means more similar, and only the relative order matters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    pub text: String,
    pub distance: f32,
}

/// A pre-embedded corpus row. Read-only from the pipeline's perspective;
/// population happens in a separate ingestion step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusEntry {
    pub text: String,
    pub embedding: Vec<f32>,
}

/// Terminal artifact of a successful pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub vision_analysis: String,
    pub passages: Vec<Passage>,
    pub synthesis: String,
    pub sources: usize,
}
