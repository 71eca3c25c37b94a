use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use serde::Serialize;

use crate::domain::{PipelineOutcome, UploadedDocument};
use crate::presentation::state::AppState;

use super::error_response::bad_request;

pub const DOCUMENT_FIELD: &str = "document";
pub const MODEL_FIELD: &str = "model_selection";

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SummarizeResponse {
    Summary {
        text: String,
        model: String,
        narration_url: String,
    },
    Transcript {
        text: String,
    },
}

pub fn narration_url(id: impl std::fmt::Display) -> String {
    format!("/api/v1/narrations/{id}")
}

#[tracing::instrument(skip(state, multipart))]
pub async fn summarize_handler(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let mut upload: Option<(String, Bytes)> = None;
    let mut model: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart");
                return bad_request(format!("Failed to read multipart: {}", e));
            }
        };

        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(DOCUMENT_FIELD) => {
                let filename = field.file_name().unwrap_or_default().to_string();
                match field.bytes().await {
                    Ok(data) => upload = Some((filename, data)),
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to read uploaded file");
                        return bad_request(format!("Failed to read file: {}", e));
                    }
                }
            }
            Some(MODEL_FIELD) => match field.text().await {
                Ok(value) => model = Some(value),
                Err(e) => return bad_request(format!("Failed to read {}: {}", MODEL_FIELD, e)),
            },
            other => {
                tracing::debug!(field = ?other, "Ignoring multipart field");
            }
        }
    }

    let Some((filename, data)) = upload else {
        tracing::warn!("Summarize request with no file");
        return bad_request("No file uploaded");
    };

    tracing::debug!(filename = %filename, bytes = data.len(), "Processing upload");
    let document = UploadedDocument::new(filename, data);

    let outcome = match state
        .pipeline_service
        .run(document, model.as_deref())
        .await
    {
        Ok(outcome) => outcome,
        Err(e) => return e.into_response(),
    };

    let body = match outcome {
        PipelineOutcome::Summary {
            text,
            model,
            narration,
        } => {
            let id = state.narration_store.insert(narration).await;
            SummarizeResponse::Summary {
                text,
                model,
                narration_url: narration_url(id),
            }
        }
        PipelineOutcome::Transcript { text } => SummarizeResponse::Transcript { text },
    };

    (StatusCode::OK, Json(body)).into_response()
}
