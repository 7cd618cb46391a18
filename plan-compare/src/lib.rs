pub mod compare;
pub mod config;
pub mod error;
pub mod extract;
pub mod llm;
pub mod models;
pub mod ocr;
pub mod pipeline;
pub mod preprocess;
pub mod prompts;
pub mod relevance;
pub mod reviews;
pub mod validate;

// Re-export commonly used types
pub use compare::Comparator;
pub use config::PipelineConfig;
pub use error::{CompareError, Result};
pub use extract::FieldExtractor;
pub use llm::{CompletionModel, OpenRouterCompletion};
pub use models::{
    ComparisonReport, ComparisonResult, ExtractedFields, PlanDocument, ReviewSentiment,
};
pub use ocr::{OcrEngine, VisionOcr};
pub use pipeline::ComparisonPipeline;
pub use relevance::{RelevanceFilter, RelevanceVerdict};
pub use reviews::ReviewAnalyzer;
