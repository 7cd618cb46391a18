use std::sync::Arc;

use axum::{
    Router,
    extract::{DefaultBodyLimit, Multipart, State},
    http::{HeaderValue, Request, StatusCode},
    middleware::{Next, from_fn},
    response::{Html, Json},
    routing::{get, post},
};
use plan_compare::{
    CompareError, CompletionModel, ComparisonPipeline, OpenRouterCompletion, PipelineConfig,
    PlanDocument, ReviewAnalyzer, ReviewSentiment, VisionOcr,
};
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{Instrument, error, info, warn};
use uuid::Uuid;

use crate::render;

/// Two scanned multi-page PDFs have to fit in one request body.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

type PageError = (StatusCode, Html<String>);

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ComparisonPipeline>,
    pub reviews: Arc<ReviewAnalyzer>,
}

pub fn create_app(config: PipelineConfig) -> plan_compare::Result<Router> {
    let model: Arc<dyn CompletionModel> = Arc::new(OpenRouterCompletion::new(
        &config.api_key,
        &config.completion_model,
    ));
    let ocr = Arc::new(VisionOcr::new(&config)?);
    let reviews = Arc::new(ReviewAnalyzer::new(model.clone(), &config)?);
    let pipeline = Arc::new(ComparisonPipeline::new(ocr, model, &config));

    Ok(build_router(AppState { pipeline, reviews }))
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/compare", post(compare_plans))
        .route("/health", get(health_check))
        .layer(
            ServiceBuilder::new()
                .layer(from_fn(correlation_id_middleware))
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

/// Tags every request with a correlation ID so one upload's OCR and model
/// calls can be traced together.
async fn correlation_id_middleware(
    mut request: Request<axum::body::Body>,
    next: Next,
) -> axum::response::Response {
    let correlation_id = Uuid::new_v4().to_string();

    request.headers_mut().insert(
        "x-correlation-id",
        HeaderValue::from_str(&correlation_id).unwrap(),
    );

    let span = tracing::info_span!("http_request", correlation_id = %correlation_id);
    next.run(request).instrument(span).await
}

async fn index() -> Html<String> {
    Html(render::index_page())
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

struct UploadForm {
    documents: Vec<PlanDocument>,
    insurers: Vec<String>,
}

async fn compare_plans(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Html<String>, PageError> {
    let UploadForm { documents, insurers } = read_upload_form(multipart)
        .await
        .map_err(|message| bad_request(&message))?;

    let [left, right] = <[PlanDocument; 2]>::try_from(documents)
        .map_err(|_| bad_request("Please upload exactly two scanned insurance PDFs."))?;

    info!(left = %left.label, right = %right.label, "received comparison request");

    match state.pipeline.compare(left, right).await {
        Ok(report) => {
            let sentiments = review_sentiments(&state, &insurers).await;
            Ok(Html(render::report_page(&report, &sentiments)))
        }
        Err(e) => {
            error!("comparison failed: {e}");
            Err(comparison_error(&e))
        }
    }
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, String> {
    let mut documents = Vec::new();
    let mut insurers = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| e.to_string())? {
        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some("pdfs") => {
                let label = field
                    .file_name()
                    .filter(|file_name| !file_name.is_empty())
                    .map(|file_name| file_name.to_string())
                    .unwrap_or_else(|| plan_label(documents.len()));
                let bytes = field.bytes().await.map_err(|e| e.to_string())?;
                if !bytes.is_empty() {
                    documents.push(PlanDocument::new(label, bytes.to_vec()));
                }
            }
            Some("insurer_a") | Some("insurer_b") => {
                let insurer = field.text().await.map_err(|e| e.to_string())?;
                let insurer = insurer.trim().to_string();
                if !insurer.is_empty() {
                    insurers.push(insurer);
                }
            }
            _ => {}
        }
    }

    Ok(UploadForm {
        documents,
        insurers,
    })
}

fn plan_label(position: usize) -> String {
    match position {
        0 => "Plan A".to_string(),
        1 => "Plan B".to_string(),
        n => format!("Plan {}", n + 1),
    }
}

/// Review sentiment is supplementary: failures are logged and the section
/// is dropped, never the whole comparison.
async fn review_sentiments(state: &AppState, insurers: &[String]) -> Vec<ReviewSentiment> {
    let mut sentiments = Vec::new();
    for insurer in insurers {
        match state.reviews.analyze(insurer).await {
            Ok(sentiment) => sentiments.push(sentiment),
            Err(e) => warn!(insurer = %insurer, error = %e, "skipping review sentiment"),
        }
    }
    sentiments
}

fn bad_request(message: &str) -> PageError {
    (StatusCode::BAD_REQUEST, Html(render::error_page(message)))
}

fn comparison_error(error: &CompareError) -> PageError {
    let status = match error {
        CompareError::OcrFailure(_) | CompareError::NotAnInsuranceDocument { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        CompareError::ModelCallFailure(_)
        | CompareError::EmptyResponse
        | CompareError::ReviewScrapeFailure(_) => StatusCode::BAD_GATEWAY,
    };

    (status, Html(render::error_page(&error.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_labels_follow_upload_order() {
        assert_eq!(plan_label(0), "Plan A");
        assert_eq!(plan_label(1), "Plan B");
        assert_eq!(plan_label(2), "Plan 3");
    }

    #[test]
    fn rejection_and_upstream_failures_map_to_distinct_statuses() {
        let rejected = comparison_error(&CompareError::NotAnInsuranceDocument {
            label: "resume.pdf".to_string(),
            reason: "no keywords".to_string(),
        });
        assert_eq!(rejected.0, StatusCode::UNPROCESSABLE_ENTITY);

        let upstream = comparison_error(&CompareError::EmptyResponse);
        assert_eq!(upstream.0, StatusCode::BAD_GATEWAY);
    }
}
