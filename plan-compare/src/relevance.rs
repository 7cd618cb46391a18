use std::collections::HashSet;

use tracing::debug;

use crate::config::PipelineConfig;

/// Outcome of the keyword screen for one document.
#[derive(Debug, Clone)]
pub struct RelevanceVerdict {
    pub accepted: bool,
    /// Keywords that were actually found in the text.
    pub matched: Vec<String>,
    /// Human-readable rejection reason, present only when rejected.
    pub reason: Option<String>,
}

/// Screens OCR text for insurance-domain keywords before any model call is
/// spent on it.
pub struct RelevanceFilter {
    keywords: Vec<String>,
    min_matches: usize,
}

impl RelevanceFilter {
    pub fn new(keywords: impl IntoIterator<Item = String>, min_matches: usize) -> Self {
        Self {
            keywords: keywords.into_iter().map(|k| k.to_lowercase()).collect(),
            min_matches,
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.keywords.iter().cloned(), config.min_matches)
    }

    pub fn evaluate(&self, text: &str) -> RelevanceVerdict {
        let lowered = text.to_lowercase();
        let tokens: HashSet<&str> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .collect();

        let matched: Vec<String> = self
            .keywords
            .iter()
            .filter(|k| tokens.contains(k.as_str()))
            .cloned()
            .collect();

        debug!(
            matched = matched.len(),
            required = self.min_matches,
            "relevance screen"
        );

        let accepted = matched.len() >= self.min_matches;
        let reason = (!accepted).then(|| {
            format!(
                "found {} of the {} required insurance keywords",
                matched.len(),
                self.min_matches
            )
        });

        RelevanceVerdict {
            accepted,
            matched,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_filter() -> RelevanceFilter {
        RelevanceFilter::from_config(&PipelineConfig::default())
    }

    #[test]
    fn accepts_policy_text() {
        let verdict = default_filter()
            .evaluate("The annual premium is $500 and coverage includes hospitalization.");
        assert!(verdict.accepted);
        assert!(verdict.matched.contains(&"premium".to_string()));
        assert!(verdict.reason.is_none());
    }

    #[test]
    fn rejects_a_resume() {
        let verdict = default_filter()
            .evaluate("Senior engineer with ten years of experience in distributed systems.");
        assert!(!verdict.accepted);
        assert!(verdict.matched.is_empty());
        assert!(verdict.reason.is_some());
    }

    #[test]
    fn matching_is_case_insensitive_and_word_bounded() {
        let filter = default_filter();
        assert!(filter.evaluate("PREMIUM waiver rider").accepted);
        // "reclaim" contains "claim" but is a different word
        assert!(!filter.evaluate("how to reclaim your deposit").accepted);
    }

    #[test]
    fn threshold_requires_enough_distinct_keywords() {
        let filter = RelevanceFilter::new(
            ["coverage", "premium", "claim"].map(String::from),
            2,
        );
        assert!(!filter.evaluate("your premium is due").accepted);
        assert!(filter.evaluate("your premium covers claim costs").accepted);
    }
}
