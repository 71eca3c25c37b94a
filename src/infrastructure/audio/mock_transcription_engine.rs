use async_trait::async_trait;

use crate::application::ports::{AudioFormat, TranscriptionEngine, TranscriptionError};

/// Scaffold-mode engine that never looks at the audio.
pub struct MockTranscriptionEngine;

#[async_trait]
impl TranscriptionEngine for MockTranscriptionEngine {
    async fn transcribe(
        &self,
        audio_data: &[u8],
        format: AudioFormat,
    ) -> Result<String, TranscriptionError> {
        Ok(format!(
            "Mock transcript of {} bytes of {} audio.",
            audio_data.len(),
            format.extension()
        ))
    }
}
