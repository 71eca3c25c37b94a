use std::sync::LazyLock;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use bytes::{Bytes, BytesMut};
use regex::Regex;
use reqwest::Client;

use crate::application::ports::{SpeechSynthesisError, SpeechSynthesizer};

use super::speech_text_splitter::split_for_speech;

const RPC_ID: &str = "jQ1olc";
const MAX_CHARS_PER_REQUEST: usize = 100;
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

static AUDIO_PAYLOAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"jQ1olc","\[\\"(.*?)\\"]"#).unwrap());

/// Speech from the Google Translate web endpoint, the same service gTTS
/// uses. Text is spoken in chunks of at most 100 characters; the MP3
/// segments are concatenated in order.
pub struct GoogleTranslateTts {
    client: Client,
    base_url: String,
}

impl GoogleTranslateTts {
    /// `tld` picks the regional host, e.g. `com` or `co.uk`.
    pub fn new(tld: &str) -> Self {
        Self::with_base_url(format!("https://translate.google.{tld}"))
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn rpc_payload(text: &str, language: &str) -> String {
        let parameter = serde_json::json!([text, language, null, "null"]).to_string();
        serde_json::json!([[[RPC_ID, parameter, null, "generic"]]]).to_string()
    }

    async fn synthesize_chunk(
        &self,
        chunk: &str,
        language: &str,
        index: usize,
    ) -> Result<Vec<u8>, SpeechSynthesisError> {
        let url = format!("{}/_/TranslateWebserverUi/data/batchexecute", self.base_url);

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::REFERER, "http://translate.google.com/")
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .form(&[("f.req", Self::rpc_payload(chunk, language))])
            .send()
            .await
            .map_err(|e| {
                SpeechSynthesisError::ApiRequestFailed(format!("chunk {index}: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechSynthesisError::ApiRequestFailed(format!(
                "chunk {index}: status {status}: {body}"
            )));
        }

        let body = response.text().await.map_err(|e| {
            SpeechSynthesisError::ApiRequestFailed(format!("chunk {index}: body: {e}"))
        })?;

        decode_audio_payload(&body).ok_or_else(|| {
            SpeechSynthesisError::InvalidResponse(format!("chunk {index}: no audio stream in response"))
        })
    }
}

/// Pulls the base64 MP3 out of a `batchexecute` response.
fn decode_audio_payload(body: &str) -> Option<Vec<u8>> {
    body.lines()
        .filter(|line| line.contains(RPC_ID))
        .filter_map(|line| AUDIO_PAYLOAD.captures(line))
        .find_map(|captures| general_purpose::STANDARD.decode(&captures[1]).ok())
}

#[async_trait]
impl SpeechSynthesizer for GoogleTranslateTts {
    #[tracing::instrument(skip(self, text), fields(chars = text.len()))]
    async fn synthesize(&self, text: &str, language: &str) -> Result<Bytes, SpeechSynthesisError> {
        let chunks = split_for_speech(text, MAX_CHARS_PER_REQUEST);
        if chunks.is_empty() {
            return Err(SpeechSynthesisError::EmptyText);
        }

        let mut audio = BytesMut::new();
        for (index, chunk) in chunks.iter().enumerate() {
            let segment = self.synthesize_chunk(chunk, language, index).await?;
            audio.extend_from_slice(&segment);
        }

        tracing::info!(
            chunks = chunks.len(),
            bytes = audio.len(),
            "Google TTS synthesis completed"
        );

        Ok(audio.freeze())
    }
}
