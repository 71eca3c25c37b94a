use std::sync::Arc;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::infrastructure::llm::{GROQ_BASE_URL, OPENAI_BASE_URL};
use crate::presentation::config::{TranscriptionProvider, TranscriptionSettings};

use super::candle_whisper_engine::CandleWhisperEngine;
use super::openai_whisper_engine::OpenAiWhisperEngine;

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionEngineFactoryError {
    #[error("an API key is required for the hosted Whisper provider")]
    MissingApiKey,
    #[error(transparent)]
    ModelLoadFailed(#[from] TranscriptionError),
}

pub struct TranscriptionEngineFactory;

impl TranscriptionEngineFactory {
    /// Builds the engine once for the lifetime of the process. The local
    /// provider downloads and loads weights, so this blocks.
    pub fn create(
        settings: &TranscriptionSettings,
        fallback_api_key: Option<&str>,
    ) -> Result<Arc<dyn TranscriptionEngine>, TranscriptionEngineFactoryError> {
        let language = settings.language.clone().filter(|l| !l.is_empty());
        let model = settings.model();

        match settings.provider {
            TranscriptionProvider::Local => {
                let engine = CandleWhisperEngine::load(model, language.as_deref())?;
                Ok(Arc::new(engine))
            }
            TranscriptionProvider::Groq | TranscriptionProvider::OpenAi => {
                let api_key = settings
                    .api_key
                    .as_deref()
                    .or(fallback_api_key)
                    .ok_or(TranscriptionEngineFactoryError::MissingApiKey)?;
                let base_url = settings.base_url.clone().unwrap_or_else(|| {
                    match settings.provider {
                        TranscriptionProvider::OpenAi => OPENAI_BASE_URL,
                        _ => GROQ_BASE_URL,
                    }
                    .to_string()
                });
                tracing::info!(model, base_url = %base_url, "Using hosted Whisper");
                Ok(Arc::new(OpenAiWhisperEngine::new(
                    api_key.to_string(),
                    base_url,
                    model.to_string(),
                    language,
                )))
            }
        }
    }
}
