use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::PipelineError;
use crate::domain::PipelineStage;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub stage: PipelineStage,
}

impl ErrorResponse {
    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

pub fn status_for(error: &PipelineError) -> StatusCode {
    match error {
        PipelineError::UnsupportedFormat => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        PipelineError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PipelineError::UnsupportedModel { .. } => StatusCode::BAD_REQUEST,
        PipelineError::Summarization(_)
        | PipelineError::Analysis(_)
        | PipelineError::Transcription(_)
        | PipelineError::Narration(_) => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        if status.is_server_error() {
            tracing::error!(error = %self, stage = %self.stage(), "Pipeline failed");
        } else {
            tracing::warn!(error = %self, stage = %self.stage(), "Pipeline rejected request");
        }
        ErrorResponse {
            error: self.to_string(),
            stage: self.stage(),
        }
        .into_response_with(status)
    }
}

pub fn bad_request(message: impl Into<String>) -> Response {
    ErrorResponse {
        error: message.into(),
        stage: PipelineStage::Idle,
    }
    .into_response_with(StatusCode::BAD_REQUEST)
}
