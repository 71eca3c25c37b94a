use std::pin::Pin;
use std::task::{Context, Poll};

use axum::Json;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use futures::Stream;
use serde::Serialize;
use tokio::fs::File;
use tokio_util::io::ReaderStream;

use crate::domain::{NarrationArtifact, NarrationId};
use crate::presentation::state::AppState;

#[derive(Serialize)]
struct NotFoundResponse {
    error: String,
}

fn not_found(id: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(NotFoundResponse {
            error: format!("Narration {} not found", id),
        }),
    )
        .into_response()
}

/// Body stream that owns the artifact, so the file outlives every read
/// and is deleted when the response body is dropped.
struct NarrationStream {
    reader: ReaderStream<File>,
    _artifact: NarrationArtifact,
}

impl Stream for NarrationStream {
    type Item = std::io::Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.reader).poll_next(cx)
    }
}

/// Streams a narration once. The artifact leaves the store on the first
/// request and its file is deleted when the body stream is dropped.
#[tracing::instrument(skip(state))]
pub async fn narration_handler(
    State(state): State<AppState>,
    Path(narration_id): Path<String>,
) -> Response {
    let Ok(id) = narration_id.parse::<NarrationId>() else {
        return not_found(&narration_id);
    };

    let Some(artifact) = state.narration_store.take(&id).await else {
        tracing::debug!(narration_id = %id, "Narration not available");
        return not_found(&narration_id);
    };

    let file = match File::open(artifact.path()).await {
        Ok(file) => file,
        Err(e) => {
            tracing::error!(narration_id = %id, error = %e, "Failed to open narration file");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to read narration").into_response();
        }
    };

    let size = artifact.size_bytes();
    let stream = NarrationStream {
        reader: ReaderStream::new(file),
        _artifact: artifact,
    };

    tracing::info!(narration_id = %id, bytes = size, "Serving narration");

    (
        [
            (header::CONTENT_TYPE, "audio/mpeg".to_string()),
            (header::CONTENT_LENGTH, size.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"narration-{}.mp3\"", id),
            ),
        ],
        Body::from_stream(stream),
    )
        .into_response()
}
