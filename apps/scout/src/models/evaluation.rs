use serde::{Deserialize, Serialize};

/// One scored oracle evaluation. `source_index` is the submission position of
/// the description in the scoring batch, kept for the stable tie-break.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    /// 0–100; 0 when no score line could be extracted.
    pub score: u32,
    /// Cleaned oracle output, ready for rendering.
    pub text: String,
    pub source_index: usize,
}

/// Evaluations in final rank order: score descending, ties broken by original
/// submission index. Reproducible given the same score vector regardless of
/// completion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedReport {
    pub records: Vec<Evaluation>,
}

impl RankedReport {
    pub fn rank(mut records: Vec<Evaluation>) -> Self {
        records.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(a.source_index.cmp(&b.source_index))
        });
        Self { records }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}
