use async_trait::async_trait;
use bytes::Bytes;

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Renders `text` as MP3 audio spoken in `language`.
    async fn synthesize(&self, text: &str, language: &str) -> Result<Bytes, SpeechSynthesisError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SpeechSynthesisError {
    #[error("no text to speak")]
    EmptyText,
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
