use std::time::Duration;

/// Keywords a document must mention to be treated as an insurance plan.
pub const DEFAULT_KEYWORDS: [&str; 4] = ["coverage", "premium", "claim", "exclusion"];

const DEFAULT_COMPLETION_MODEL: &str = "openai/gpt-4o-mini";
const DEFAULT_OCR_MODEL: &str = "openai/gpt-4.1-mini";

/// Process-wide configuration for the comparison pipeline.
///
/// Built once at startup and passed to each component at construction; no
/// component reads the environment on its own.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// OpenRouter API key used for both OCR and text completions.
    pub api_key: String,
    /// Model used for field extraction, comparison and review sentiment.
    pub completion_model: String,
    /// Vision-capable model used for OCR.
    pub ocr_model: String,
    /// Language the scanned documents are expected to be written in.
    pub language: String,
    /// Token cap for a single OCR transcription response.
    pub ocr_max_tokens: u32,
    /// Keyword set for the relevance screen, matched case-insensitively.
    pub keywords: Vec<String>,
    /// How many keywords must appear before a document is accepted.
    pub min_matches: usize,
    pub extraction_temperature: f64,
    pub comparison_temperature: f64,
    pub review_temperature: f64,
    /// Timeout applied to every outbound HTTP request.
    pub request_timeout: Duration,
    /// When set, extraction responses are checked for the expected JSON
    /// field names. Failures are logged, never surfaced.
    pub validate_extraction: bool,
}

impl PipelineConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            completion_model: DEFAULT_COMPLETION_MODEL.to_string(),
            ocr_model: DEFAULT_OCR_MODEL.to_string(),
            language: "English".to_string(),
            ocr_max_tokens: 4000,
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            min_matches: 1,
            extraction_temperature: 0.2,
            comparison_temperature: 0.3,
            review_temperature: 0.5,
            request_timeout: Duration::from_secs(60),
            validate_extraction: false,
        }
    }
}
