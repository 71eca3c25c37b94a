use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{SpeechSynthesisError, SpeechSynthesizer};
use crate::domain::NarrationArtifact;

pub struct NarrationService {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    language: String,
    artifact_dir: Option<PathBuf>,
}

impl NarrationService {
    pub fn new(
        synthesizer: Arc<dyn SpeechSynthesizer>,
        language: impl Into<String>,
        artifact_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            synthesizer,
            language: language.into(),
            artifact_dir,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Speaks `text` and stores the audio as a new MP3 artifact owned by the
    /// caller.
    #[tracing::instrument(skip(self, text), fields(language = %self.language, chars = text.len()))]
    pub async fn narrate(&self, text: &str) -> Result<NarrationArtifact, NarrationError> {
        let audio = self.synthesizer.synthesize(text, &self.language).await?;

        let dir = self.artifact_dir.clone();
        let artifact = tokio::task::spawn_blocking(move || {
            NarrationArtifact::create(dir.as_deref(), &audio)
        })
        .await
        .map_err(|e| NarrationError::Artifact(io::Error::other(e)))??;

        tracing::info!(
            narration_id = %artifact.id(),
            bytes = artifact.size_bytes(),
            path = %artifact.path().display(),
            "Narration written"
        );

        Ok(artifact)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NarrationError {
    #[error(transparent)]
    Synthesis(#[from] SpeechSynthesisError),
    #[error("failed to write audio file: {0}")]
    Artifact(#[from] io::Error),
}
