use std::sync::Arc;

use reqwest::Client;
use reqwest::header::USER_AGENT;
use scraper::{Html, Selector};
use tracing::info;

use crate::config::PipelineConfig;
use crate::error::{CompareError, Result};
use crate::llm::CompletionModel;
use crate::models::ReviewSentiment;
use crate::prompts;

const SEARCH_URL: &str = "https://www.trustpilot.com/search";
// Trustpilot renders review bodies with this generated class name.
const REVIEW_SELECTOR: &str = "p.typography_body-l__KUYFJ";
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const MAX_REVIEWS: usize = 5;

/// Fetches recent customer reviews for an insurer and summarizes their
/// sentiment with the model.
///
/// This is a side feature of the comparison flow: callers log failures and
/// drop the section rather than failing the request.
pub struct ReviewAnalyzer {
    client: Client,
    model: Arc<dyn CompletionModel>,
    temperature: f64,
}

impl ReviewAnalyzer {
    pub fn new(model: Arc<dyn CompletionModel>, config: &PipelineConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| CompareError::ReviewScrapeFailure(e.to_string()))?;

        Ok(Self {
            client,
            model,
            temperature: config.review_temperature,
        })
    }

    pub async fn analyze(&self, insurer: &str) -> Result<ReviewSentiment> {
        let reviews = self.fetch_reviews(insurer).await?;
        if reviews.is_empty() {
            return Err(CompareError::ReviewScrapeFailure(format!(
                "no reviews found for {insurer}"
            )));
        }
        info!(insurer, count = reviews.len(), "fetched customer reviews");

        let prompt = prompts::review_prompt(insurer, &reviews);
        let summary = self.model.complete(&prompt, self.temperature).await?;

        let summary = summary.trim().to_string();
        if summary.is_empty() {
            return Err(CompareError::EmptyResponse);
        }

        Ok(ReviewSentiment {
            insurer: insurer.to_string(),
            summary,
        })
    }

    async fn fetch_reviews(&self, insurer: &str) -> Result<Vec<String>> {
        let url = format!("{SEARCH_URL}?query={}", urlencoding::encode(insurer));

        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await
            .map_err(|e| CompareError::ReviewScrapeFailure(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CompareError::ReviewScrapeFailure(format!(
                "review search returned {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CompareError::ReviewScrapeFailure(e.to_string()))?;

        Ok(extract_review_texts(&body))
    }
}

fn extract_review_texts(html: &str) -> Vec<String> {
    let selector = Selector::parse(REVIEW_SELECTOR).expect("valid review selector");
    let document = Html::parse_document(html);

    document
        .select(&selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .take(MAX_REVIEWS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulls_review_bodies_out_of_search_results() {
        let html = r#"
            <html><body>
              <p class="typography_body-l__KUYFJ"> Great service and responsive agents. </p>
              <p class="other">not a review</p>
              <p class="typography_body-l__KUYFJ">Claim process was a bit slow.</p>
            </body></html>
        "#;
        let reviews = extract_review_texts(html);
        assert_eq!(
            reviews,
            vec![
                "Great service and responsive agents.".to_string(),
                "Claim process was a bit slow.".to_string(),
            ]
        );
    }

    #[test]
    fn caps_the_number_of_reviews() {
        let repeated: String = (0..10)
            .map(|i| format!(r#"<p class="typography_body-l__KUYFJ">review {i}</p>"#))
            .collect();
        let reviews = extract_review_texts(&format!("<body>{repeated}</body>"));
        assert_eq!(reviews.len(), MAX_REVIEWS);
    }

    #[test]
    fn ignores_pages_without_reviews() {
        assert!(extract_review_texts("<html><body><h1>No results</h1></body></html>").is_empty());
    }
}
