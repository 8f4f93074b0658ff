use domain::models::{CorpusEntry, Passage};

pub struct SearchEngine;

impl SearchEngine {
    /// Cosine distance (`1 - cosine similarity`): 0 for identical direction,
    /// 1 for orthogonal, 2 for opposite. Zero-magnitude vectors rank as
    /// maximally distant, never NaN.
    pub fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
        let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm_a == 0.0 || norm_b == 0.0 {
            return 2.0;
        }
        1.0 - dot / (norm_a * norm_b)
    }

    /// Rank `entries` by ascending distance to `query` and keep the best `k`.
    pub fn nearest(query: &[f32], entries: &[CorpusEntry], k: usize) -> Vec<Passage> {
        let mut ranked: Vec<Passage> = entries
            .iter()
            .map(|entry| Passage {
                text: entry.text.clone(),
                distance: Self::cosine_distance(query, &entry.embedding),
            })
            .collect();
        ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        ranked.truncate(k);
        ranked
    }
}
