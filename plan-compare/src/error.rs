use thiserror::Error;

/// Errors surfaced by the comparison pipeline.
///
/// None of these are retried and none are fatal to the process; each request
/// fails independently and the message is rendered to the end user.
#[derive(Error, Debug)]
pub enum CompareError {
    /// The OCR engine could not produce text from an uploaded document.
    #[error("OCR failed: {0}")]
    OcrFailure(String),

    /// The document did not pass the insurance keyword screen.
    #[error("'{label}' does not look like an insurance document: {reason}")]
    NotAnInsuranceDocument { label: String, reason: String },

    /// The language model call failed (network, auth, rate limit).
    #[error("language model call failed: {0}")]
    ModelCallFailure(String),

    /// The language model returned nothing usable.
    #[error("language model returned an empty response")]
    EmptyResponse,

    /// Customer review lookup failed. Review sections are supplementary, so
    /// callers treat this as a warning rather than a request failure.
    #[error("review lookup failed: {0}")]
    ReviewScrapeFailure(String),
}

pub type Result<T> = std::result::Result<T, CompareError>;
