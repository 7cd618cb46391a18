use std::sync::Arc;

use tracing::info;

use crate::error::{CompareError, Result};
use crate::llm::CompletionModel;
use crate::models::{ComparisonResult, ExtractedFields};
use crate::prompts;

/// Asks the model for a point-wise comparison of two extracted field sets.
///
/// All comparison semantics live in the model; nothing is merged or
/// tie-broken locally.
pub struct Comparator {
    model: Arc<dyn CompletionModel>,
    temperature: f64,
}

impl Comparator {
    pub fn new(model: Arc<dyn CompletionModel>, temperature: f64) -> Self {
        Self { model, temperature }
    }

    pub async fn compare(
        &self,
        left: &ExtractedFields,
        right: &ExtractedFields,
    ) -> Result<ComparisonResult> {
        let prompt = prompts::comparison_prompt(left, right);
        let response = self.model.complete(&prompt, self.temperature).await?;

        let summary = response.trim().to_string();
        if summary.is_empty() {
            return Err(CompareError::EmptyResponse);
        }

        info!(
            left = %left.label,
            right = %right.label,
            chars = summary.len(),
            "comparison completed"
        );

        Ok(ComparisonResult {
            left_label: left.label.clone(),
            right_label: right.label.clone(),
            summary,
        })
    }
}
