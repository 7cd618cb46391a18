use std::time::Duration;

use anyhow::{Context, Result};
use plan_compare::PipelineConfig;

/// Builds the pipeline configuration from environment variables.
///
/// `OPENROUTER_API_KEY` is required; everything else falls back to the
/// library defaults.
pub fn pipeline_config_from_env() -> Result<PipelineConfig> {
    let api_key = std::env::var("OPENROUTER_API_KEY")
        .context("OPENROUTER_API_KEY environment variable is required")?;

    let mut config = PipelineConfig::new(api_key);

    if let Ok(model) = std::env::var("COMPLETION_MODEL") {
        config.completion_model = model;
    }
    if let Ok(model) = std::env::var("OCR_MODEL") {
        config.ocr_model = model;
    }
    if let Ok(language) = std::env::var("OCR_LANGUAGE") {
        config.language = language;
    }
    if let Ok(keywords) = std::env::var("INSURANCE_KEYWORDS") {
        let parsed = parse_keyword_list(&keywords);
        if !parsed.is_empty() {
            config.keywords = parsed;
        }
    }
    if let Ok(min_matches) = std::env::var("MIN_KEYWORD_MATCHES") {
        config.min_matches = min_matches
            .parse()
            .context("MIN_KEYWORD_MATCHES must be an integer")?;
    }
    if let Ok(timeout) = std::env::var("REQUEST_TIMEOUT_SECS") {
        let secs: u64 = timeout
            .parse()
            .context("REQUEST_TIMEOUT_SECS must be an integer")?;
        config.request_timeout = Duration::from_secs(secs);
    }
    if let Ok(validate) = std::env::var("VALIDATE_EXTRACTION") {
        config.validate_extraction = matches!(validate.as_str(), "1" | "true" | "yes");
    }

    Ok(config)
}

fn parse_keyword_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_lists_are_parsed_from_csv() {
        assert_eq!(
            parse_keyword_list("coverage, premium ,policy,"),
            vec!["coverage", "premium", "policy"]
        );
        assert!(parse_keyword_list("").is_empty());
    }
}
