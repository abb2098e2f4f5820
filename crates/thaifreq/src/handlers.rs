use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thai_segment::{SegmentError, Segmenter};
use thiserror::Error;
use tracing::error;

use crate::pipeline::{FrequencyReport, Pipeline, PipelineOptions};

#[derive(Clone)]
pub struct AppState {
    pub segmenter: Arc<dyn Segmenter>,
    pub defaults: PipelineOptions,
    pub max_text_bytes: usize,
}

#[derive(Deserialize)]
pub struct TextRequest {
    pub text: String,
    pub keep_numerals: Option<bool>,
    pub engine: Option<String>,
    pub min_freq: Option<u64>,
}

#[derive(Serialize)]
pub struct CleanResponse {
    text: String,
}

#[derive(Serialize)]
pub struct TokenizeResponse {
    engine: String,
    tokens: Vec<String>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/v1/clean", post(clean))
        .route("/v1/tokenize", post(tokenize))
        .route("/v1/frequencies", post(frequencies))
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    "ok"
}

async fn clean(
    State(state): State<AppState>,
    Json(request): Json<TextRequest>,
) -> Result<Json<CleanResponse>, ApiError> {
    let options = request_options(&state, &request)?;
    let pipeline = Pipeline::new(state.segmenter.as_ref(), options);
    Ok(Json(CleanResponse {
        text: pipeline.clean(&request.text),
    }))
}

async fn tokenize(
    State(state): State<AppState>,
    Json(request): Json<TextRequest>,
) -> Result<Json<TokenizeResponse>, ApiError> {
    let options = request_options(&state, &request)?;
    let pipeline = Pipeline::new(state.segmenter.as_ref(), options);
    let tokens = pipeline.tokenize(&request.text)?;
    Ok(Json(TokenizeResponse {
        engine: pipeline.options().engine.clone(),
        tokens,
    }))
}

async fn frequencies(
    State(state): State<AppState>,
    Json(request): Json<TextRequest>,
) -> Result<Json<FrequencyReport>, ApiError> {
    let options = request_options(&state, &request)?;
    let pipeline = Pipeline::new(state.segmenter.as_ref(), options);
    let report = pipeline.run([request.text.as_str()])?;
    Ok(Json(report))
}

fn request_options(state: &AppState, request: &TextRequest) -> Result<PipelineOptions, ApiError> {
    if request.text.trim().is_empty() {
        return Err(ApiError::bad_request("text is required"));
    }
    if request.text.len() > state.max_text_bytes {
        return Err(ApiError::bad_request(format!(
            "text must be at most {} bytes",
            state.max_text_bytes
        )));
    }
    let defaults = &state.defaults;
    Ok(PipelineOptions {
        keep_numerals: request.keep_numerals.unwrap_or(defaults.keep_numerals),
        engine: request
            .engine
            .clone()
            .unwrap_or_else(|| defaults.engine.clone()),
        min_freq: request.min_freq.unwrap_or(defaults.min_freq),
    })
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    fn bad_request<T: Into<String>>(msg: T) -> Self {
        ApiError::BadRequest(msg.into())
    }
}

impl From<SegmentError> for ApiError {
    fn from(err: SegmentError) -> Self {
        match err {
            SegmentError::UnknownEngine(_) => ApiError::bad_request(err.to_string()),
            SegmentError::Backend(_) => {
                error!("segmentation failed: {err}");
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                let body = Json(ErrorResponse { error: msg });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            ApiError::Internal => {
                let body = Json(json!({ "error": "internal server error" }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
