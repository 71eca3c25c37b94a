use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct ModelsResponse {
    pub default_model: String,
    pub models: Vec<String>,
}

pub async fn models_handler(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.pipeline_service.summarization().catalog();
    (
        StatusCode::OK,
        Json(ModelsResponse {
            default_model: catalog.default_model().to_string(),
            models: catalog.supported().to_vec(),
        }),
    )
}
