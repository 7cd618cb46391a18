use async_trait::async_trait;
use rig::{client::CompletionClient, completion::Prompt, providers::openrouter};

use crate::error::{CompareError, Result};

/// Chat-style completion capability used by every model-backed step.
///
/// A single user message at a given temperature, one text completion back.
/// The pipeline is orchestrated entirely through this trait so tests can
/// substitute a deterministic model.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    async fn complete(&self, prompt: &str, temperature: f64) -> Result<String>;
}

/// Production completion model backed by OpenRouter.
pub struct OpenRouterCompletion {
    api_key: String,
    model: String,
}

impl OpenRouterCompletion {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl CompletionModel for OpenRouterCompletion {
    async fn complete(&self, prompt: &str, temperature: f64) -> Result<String> {
        let client = openrouter::Client::new(&self.api_key);
        let agent = client
            .agent(&self.model)
            .temperature(temperature)
            .build();

        agent
            .prompt(prompt)
            .await
            .map_err(|e| CompareError::ModelCallFailure(e.to_string()))
    }
}
