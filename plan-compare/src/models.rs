use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One uploaded plan document. Lives for the duration of a single request.
#[derive(Debug, Clone)]
pub struct PlanDocument {
    pub id: Uuid,
    /// Human-readable label, usually the uploaded filename.
    pub label: String,
    pub bytes: Vec<u8>,
}

impl PlanDocument {
    pub fn new(label: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
            bytes,
        }
    }
}

/// Unparsed model output describing one document's policy fields.
/// Always tied to exactly one source document via its label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedFields {
    pub label: String,
    pub content: String,
}

/// Free-text comparison of two extracted field sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub left_label: String,
    pub right_label: String,
    pub summary: String,
}

/// Everything the presentation layer needs to render one comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub result: ComparisonResult,
    pub left: ExtractedFields,
    pub right: ExtractedFields,
}

/// Sentiment summary of recent customer reviews for one insurer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSentiment {
    pub insurer: String,
    pub summary: String,
}
