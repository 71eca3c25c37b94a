use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::Serialize;

use crate::application::ports::{SpeechSynthesisError, SpeechSynthesizer};

/// OpenAI-compatible `/audio/speech` endpoint. The voice decides the
/// accent; the language code is not sent.
pub struct OpenAiSpeechEngine {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    voice: String,
}

#[derive(Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'static str,
}

impl OpenAiSpeechEngine {
    pub fn new(api_key: String, base_url: String, model: String, voice: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            voice,
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAiSpeechEngine {
    async fn synthesize(&self, text: &str, _language: &str) -> Result<Bytes, SpeechSynthesisError> {
        let request_body = SpeechRequest {
            model: &self.model,
            input: text,
            voice: &self.voice,
            response_format: "mp3",
        };

        tracing::debug!(model = %self.model, voice = %self.voice, chars = text.len(), "Sending text to speech API");

        let response = self
            .client
            .post(format!("{}/audio/speech", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| SpeechSynthesisError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechSynthesisError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| SpeechSynthesisError::ApiRequestFailed(format!("body: {}", e)))?;

        if audio.is_empty() {
            return Err(SpeechSynthesisError::InvalidResponse(
                "empty audio body".to_string(),
            ));
        }

        tracing::info!(bytes = audio.len(), "Speech API synthesis completed");
        Ok(audio)
    }
}
