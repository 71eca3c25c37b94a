use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::presentation::state::AppState;

use super::error_response::bad_request;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub kind: &'static str,
    pub text: String,
}

#[tracing::instrument(skip(state, request), fields(chars = request.text.len()))]
pub async fn analyze_handler(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Response {
    if request.text.trim().is_empty() {
        tracing::warn!("Analyze request with empty text");
        return bad_request("Text must not be empty");
    }

    match state
        .pipeline_service
        .analyze(&request.text, request.model.as_deref())
        .await
    {
        Ok(text) => (
            StatusCode::OK,
            Json(AnalyzeResponse {
                kind: "analysis",
                text,
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}
