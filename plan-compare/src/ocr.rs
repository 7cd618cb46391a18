use std::io::Cursor;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{DynamicImage, ImageFormat};
use pdf2image::{PDF, Pages};
use reqwest::Client;
use serde_json::{Value, json};
use tracing::info;

use crate::config::PipelineConfig;
use crate::error::{CompareError, Result};

const OPENROUTER_COMPLETIONS_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Boundary to the OCR engine: consumes a scanned PDF, returns plain text.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn extract_text(&self, pdf_bytes: Vec<u8>) -> Result<String>;
}

/// OCR through a vision-capable model.
///
/// Pages are rendered to PNG images and sent in one chat request asking for
/// a verbatim transcription in the configured language.
pub struct VisionOcr {
    client: Client,
    api_key: String,
    model: String,
    language: String,
    max_tokens: u32,
}

impl VisionOcr {
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| CompareError::OcrFailure(e.to_string()))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.ocr_model.clone(),
            language: config.language.clone(),
            max_tokens: config.ocr_max_tokens,
        })
    }

    async fn transcribe_pages(&self, pages: &[DynamicImage]) -> Result<String> {
        let mut content = vec![json!({
            "type": "text",
            "text": transcription_instruction(pages.len(), &self.language),
        })];
        for page in pages {
            let encoded = encode_page_png(page)?;
            content.push(json!({
                "type": "image_url",
                "image_url": {
                    "url": format!("data:image/png;base64,{encoded}")
                }
            }));
        }

        let payload = json!({
            "model": self.model,
            "messages": [
                {
                    "role": "user",
                    "content": content
                }
            ],
            "max_tokens": self.max_tokens,
        });

        let response = self
            .client
            .post(OPENROUTER_COMPLETIONS_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| CompareError::OcrFailure(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CompareError::OcrFailure(format!(
                "OCR request failed: {}",
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| CompareError::OcrFailure(e.to_string()))?;

        let text = body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| CompareError::OcrFailure("malformed OCR response".to_string()))?;

        Ok(text.to_string())
    }
}

#[async_trait]
impl OcrEngine for VisionOcr {
    async fn extract_text(&self, pdf_bytes: Vec<u8>) -> Result<String> {
        let pages = render_pdf_pages(pdf_bytes).await?;
        if pages.is_empty() {
            return Err(CompareError::OcrFailure(
                "no pages rendered from PDF".to_string(),
            ));
        }
        info!(pages = pages.len(), "rendered PDF pages for OCR");

        let text = self.transcribe_pages(&pages).await?;
        if text.trim().is_empty() {
            return Err(CompareError::OcrFailure(
                "no text recognized in document".to_string(),
            ));
        }

        info!(chars = text.len(), "OCR transcription completed");
        Ok(text)
    }
}

/// Renders every page of the PDF to an image. Rendering is CPU-bound, so it
/// runs on the blocking pool.
async fn render_pdf_pages(pdf_bytes: Vec<u8>) -> Result<Vec<DynamicImage>> {
    tokio::task::spawn_blocking(move || -> Result<Vec<DynamicImage>> {
        let pdf = PDF::from_bytes(pdf_bytes)
            .map_err(|e| CompareError::OcrFailure(format!("failed to load PDF: {e}")))?;

        pdf.render(Pages::All, None)
            .map_err(|e| CompareError::OcrFailure(format!("failed to render PDF pages: {e}")))
    })
    .await
    .map_err(|e| CompareError::OcrFailure(e.to_string()))?
}

fn encode_page_png(page: &DynamicImage) -> Result<String> {
    let mut buffer = Vec::new();
    page.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .map_err(|e| CompareError::OcrFailure(format!("failed to encode page: {e}")))?;

    Ok(STANDARD.encode(&buffer))
}

fn transcription_instruction(page_count: usize, language: &str) -> String {
    format!(
        "You are an OCR system for scanned insurance documents. I'm providing you with \
         {page_count} pages of a policy document written in {language}. \
         Extract ALL text from these pages with perfect accuracy, preserving the \
         document's structure, tables and policy terminology.\n\n\
         For each page, start with '=== Page X ===' as a header, then provide the \
         extracted text. Maintain the document's logical flow across pages.\n\n\
         Return ONLY the extracted text without any commentary or explanations."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instruction_names_page_count_and_language() {
        let instruction = transcription_instruction(3, "German");
        assert!(instruction.contains("3 pages"));
        assert!(instruction.contains("German"));
    }

    #[test]
    fn pages_encode_to_base64_png() {
        let page = DynamicImage::new_rgb8(40, 20);
        let encoded = encode_page_png(&page).unwrap();
        let decoded = STANDARD.decode(encoded).unwrap();
        // PNG signature
        assert_eq!(&decoded[..4], &[0x89, b'P', b'N', b'G']);
    }
}
