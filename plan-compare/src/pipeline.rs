use std::sync::Arc;

use tracing::info;

use crate::compare::Comparator;
use crate::config::PipelineConfig;
use crate::error::{CompareError, Result};
use crate::extract::FieldExtractor;
use crate::llm::CompletionModel;
use crate::models::{ComparisonReport, PlanDocument};
use crate::ocr::OcrEngine;
use crate::preprocess;
use crate::relevance::RelevanceFilter;

/// End-to-end comparison of two uploaded plan documents.
///
/// Each run is independent and stateless: OCR both documents, screen them
/// for insurance content, extract the policy fields from each, then ask the
/// model for a comparison. If any step fails for either document, the
/// comparison is skipped entirely and the error surfaces to the caller.
pub struct ComparisonPipeline {
    ocr: Arc<dyn OcrEngine>,
    filter: RelevanceFilter,
    extractor: FieldExtractor,
    comparator: Comparator,
}

impl ComparisonPipeline {
    pub fn new(
        ocr: Arc<dyn OcrEngine>,
        model: Arc<dyn CompletionModel>,
        config: &PipelineConfig,
    ) -> Self {
        Self {
            ocr,
            filter: RelevanceFilter::from_config(config),
            extractor: FieldExtractor::new(
                model.clone(),
                config.extraction_temperature,
                config.validate_extraction,
            ),
            comparator: Comparator::new(model, config.comparison_temperature),
        }
    }

    pub async fn compare(
        &self,
        left: PlanDocument,
        right: PlanDocument,
    ) -> Result<ComparisonReport> {
        info!(
            left = %left.label,
            right = %right.label,
            left_id = %left.id,
            right_id = %right.id,
            "starting plan comparison"
        );

        let PlanDocument {
            label: left_label,
            bytes: left_bytes,
            ..
        } = left;
        let PlanDocument {
            label: right_label,
            bytes: right_bytes,
            ..
        } = right;

        // The two documents are unrelated, so OCR runs side by side.
        let (left_raw, right_raw) = tokio::try_join!(
            self.ocr.extract_text(left_bytes),
            self.ocr.extract_text(right_bytes),
        )?;

        let left_text = preprocess::clean_ocr_text(&left_raw);
        let right_text = preprocess::clean_ocr_text(&right_raw);

        self.screen(&left_label, &left_text)?;
        self.screen(&right_label, &right_text)?;

        let left_fields = self.extractor.extract(&left_label, &left_text).await?;
        let right_fields = self.extractor.extract(&right_label, &right_text).await?;

        let result = self.comparator.compare(&left_fields, &right_fields).await?;

        Ok(ComparisonReport {
            result,
            left: left_fields,
            right: right_fields,
        })
    }

    /// Rejects non-insurance documents before any model call is spent on
    /// them.
    fn screen(&self, label: &str, text: &str) -> Result<()> {
        let verdict = self.filter.evaluate(text);
        if verdict.accepted {
            return Ok(());
        }

        Err(CompareError::NotAnInsuranceDocument {
            label: label.to_string(),
            reason: verdict
                .reason
                .unwrap_or_else(|| "no insurance keywords found".to_string()),
        })
    }
}
