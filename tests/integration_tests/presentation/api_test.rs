use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use synopsis::infrastructure::storage::NarrationStore;
use synopsis::presentation::{AppState, Settings, create_router};

use crate::helpers::{
    RecordingLlmClient, RecordingSynthesizer, StaticTranscriptionEngine, TestPipeline, build_docx,
    build_pipeline, count_files,
};

const BOUNDARY: &str = "synopsis-test-boundary";

struct TestApp {
    router: Router,
    pipeline: TestPipeline,
}

fn test_app(llm: RecordingLlmClient, artifact_dir: &Path) -> TestApp {
    let pipeline = build_pipeline(
        llm,
        RecordingSynthesizer::new(),
        Some(StaticTranscriptionEngine::replying("test audio")),
        Some(artifact_dir),
    );
    let state = AppState::new(
        Arc::clone(&pipeline.service),
        Arc::new(NarrationStore::new()),
        Settings::default(),
    );
    TestApp {
        router: create_router(state),
        pipeline,
    }
}

enum Part<'a> {
    File(&'a str, &'a str, &'a [u8]),
    Text(&'a str, &'a str),
}

fn multipart_request(parts: &[Part<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::File(name, filename, data) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                        name, filename
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n{}", name, value)
                        .as_bytes(),
                );
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/v1/summarize")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn given_health_endpoint_when_called_then_returns_healthy() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(RecordingLlmClient::replying("x"), dir.path());

    let response = app
        .router
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["audio_transcription"], true);
}

#[tokio::test]
async fn given_models_endpoint_when_called_then_lists_default_model() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(RecordingLlmClient::replying("x"), dir.path());

    let response = app
        .router
        .oneshot(
            Request::builder()
                .uri("/api/v1/models")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["default_model"], "llama3-8b-8192");
    assert_eq!(body["models"], json!(["llama3-8b-8192"]));
}

#[tokio::test]
async fn given_docx_upload_when_summarizing_then_returns_summary_and_downloadable_narration() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(RecordingLlmClient::replying("Greeting."), dir.path());
    let docx = build_docx(&["Hello world."]);

    let response = app
        .router
        .clone()
        .oneshot(multipart_request(&[Part::File("document", "hello.docx", &docx)]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["kind"], "summary");
    assert_eq!(body["text"], "Greeting.");
    assert_eq!(body["model"], "llama3-8b-8192");
    let narration_url = body["narration_url"].as_str().unwrap().to_string();
    assert!(narration_url.starts_with("/api/v1/narrations/"));
    assert_eq!(count_files(dir.path()), 1);

    let download = app
        .router
        .clone()
        .oneshot(Request::builder().uri(&narration_url).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(download.status(), StatusCode::OK);
    assert_eq!(download.headers()[header::CONTENT_TYPE], "audio/mpeg");
    assert_eq!(count_files(dir.path()), 1);
    let audio = axum::body::to_bytes(download.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&audio[..], b"ID3Greeting.");
    assert_eq!(count_files(dir.path()), 0);

    let second = app
        .router
        .oneshot(Request::builder().uri(&narration_url).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_model_selection_field_when_unknown_then_returns_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(RecordingLlmClient::replying("x"), dir.path());
    let docx = build_docx(&["text"]);

    let response = app
        .router
        .oneshot(multipart_request(&[
            Part::File("document", "a.docx", &docx),
            Part::Text("model_selection", "gpt-unknown"),
        ]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(
        body["error"],
        "This model is not implemented yet. Please select 'llama3-8b-8192'."
    );
    assert_eq!(body["stage"], "idle");
    assert_eq!(app.pipeline.llm.calls(), 0);
}

#[tokio::test]
async fn given_txt_upload_when_summarizing_then_returns_unsupported_media_type() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(RecordingLlmClient::replying("x"), dir.path());

    let response = app
        .router
        .oneshot(multipart_request(&[Part::File("document", "notes.txt", b"plain")]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body = json_body(response).await;
    assert_eq!(
        body["error"],
        "Unsupported file format. Please upload a PDF or DOCX file."
    );
    assert_eq!(app.pipeline.llm.calls(), 0);
    assert_eq!(count_files(dir.path()), 0);
}

#[tokio::test]
async fn given_wav_upload_when_summarizing_then_returns_transcript() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(RecordingLlmClient::replying("x"), dir.path());

    let response = app
        .router
        .oneshot(multipart_request(&[Part::File("document", "clip.wav", b"RIFF")]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body, json!({"kind": "transcript", "text": "test audio"}));
    assert_eq!(app.pipeline.llm.calls(), 0);
    assert_eq!(app.pipeline.synthesizer.calls(), 0);
}

#[tokio::test]
async fn given_llm_outage_when_summarizing_then_returns_bad_gateway_without_narration() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(RecordingLlmClient::failing("connection reset"), dir.path());
    let docx = build_docx(&["text"]);

    let response = app
        .router
        .oneshot(multipart_request(&[Part::File("document", "a.docx", &docx)]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(response).await;
    assert_eq!(
        body["error"],
        "Error generating summary: api request failed: connection reset"
    );
    assert_eq!(body["stage"], "ingested");
    assert_eq!(app.pipeline.synthesizer.calls(), 0);
    assert_eq!(count_files(dir.path()), 0);
}

#[tokio::test]
async fn given_corrupt_docx_when_summarizing_then_returns_unprocessable_entity() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(RecordingLlmClient::replying("x"), dir.path());

    let response = app
        .router
        .oneshot(multipart_request(&[Part::File("document", "a.docx", b"not a zip")]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("Error extracting text: ")
    );
}

#[tokio::test]
async fn given_no_document_field_when_summarizing_then_returns_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(RecordingLlmClient::replying("x"), dir.path());

    let response = app
        .router
        .oneshot(multipart_request(&[Part::Text("model_selection", "llama3-8b-8192")]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "No file uploaded");
}

#[tokio::test]
async fn given_text_when_analyzing_then_returns_analysis() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(RecordingLlmClient::replying("Mostly positive."), dir.path());

    let response = app
        .router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/analyze")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({"text": "Great product."}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body, json!({"kind": "analysis", "text": "Mostly positive."}));
    assert_eq!(
        app.pipeline.llm.last_prompt().as_deref(),
        Some("Please analyze the following text: Great product.")
    );
}

#[tokio::test]
async fn given_blank_text_when_analyzing_then_returns_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(RecordingLlmClient::replying("x"), dir.path());

    let response = app
        .router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/analyze")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"text": "   "}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.pipeline.llm.calls(), 0);
}

#[tokio::test]
async fn given_unknown_narration_id_when_downloading_then_returns_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(RecordingLlmClient::replying("x"), dir.path());

    for id in [uuid::Uuid::new_v4().to_string(), "not-a-uuid".to_string()] {
        let response = app
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/narrations/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn given_response_when_served_then_carries_request_id_header() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(RecordingLlmClient::replying("x"), dir.path());

    let response = app
        .router
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}
