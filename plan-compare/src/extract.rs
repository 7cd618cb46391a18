use std::sync::Arc;

use tracing::{info, warn};

use crate::error::{CompareError, Result};
use crate::llm::CompletionModel;
use crate::models::ExtractedFields;
use crate::prompts;
use crate::validate;

/// Pulls the named policy categories out of one document's OCR text.
///
/// The model's answer is returned as-is (trimmed). No schema is enforced
/// unless the optional field check is enabled, and even then a failed check
/// only logs a warning.
pub struct FieldExtractor {
    model: Arc<dyn CompletionModel>,
    temperature: f64,
    validate: bool,
}

impl FieldExtractor {
    pub fn new(model: Arc<dyn CompletionModel>, temperature: f64, validate: bool) -> Self {
        Self {
            model,
            temperature,
            validate,
        }
    }

    pub async fn extract(&self, label: &str, raw_text: &str) -> Result<ExtractedFields> {
        let prompt = prompts::extraction_prompt(raw_text);
        let response = self.model.complete(&prompt, self.temperature).await?;

        let content = response.trim().to_string();
        if content.is_empty() {
            return Err(CompareError::EmptyResponse);
        }

        if self.validate {
            let check = validate::check_extracted_fields(&content);
            if !check.valid {
                warn!(
                    label,
                    missing = ?check.missing,
                    "extraction response is missing expected fields"
                );
            }
        }

        info!(label, chars = content.len(), "field extraction completed");

        Ok(ExtractedFields {
            label: label.to_string(),
            content,
        })
    }
}
