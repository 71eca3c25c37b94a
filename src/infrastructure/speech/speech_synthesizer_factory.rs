use std::sync::Arc;

use crate::application::ports::SpeechSynthesizer;
use crate::infrastructure::llm::OPENAI_BASE_URL;
use crate::presentation::config::{NarrationProvider, NarrationSettings};

use super::google_translate_tts::GoogleTranslateTts;
use super::openai_speech_engine::OpenAiSpeechEngine;

#[derive(Debug, thiserror::Error)]
pub enum SpeechSynthesizerFactoryError {
    #[error("narration.api_key is required for the openai provider")]
    MissingApiKey,
}

pub struct SpeechSynthesizerFactory;

impl SpeechSynthesizerFactory {
    pub fn create(
        settings: &NarrationSettings,
    ) -> Result<Arc<dyn SpeechSynthesizer>, SpeechSynthesizerFactoryError> {
        match settings.provider {
            NarrationProvider::Google => {
                tracing::info!(tld = %settings.tld, "Using Google Translate TTS");
                Ok(Arc::new(match &settings.base_url {
                    Some(base_url) => GoogleTranslateTts::with_base_url(base_url.clone()),
                    None => GoogleTranslateTts::new(&settings.tld),
                }))
            }
            NarrationProvider::OpenAi => {
                let api_key = settings
                    .api_key
                    .clone()
                    .ok_or(SpeechSynthesizerFactoryError::MissingApiKey)?;
                let base_url = settings
                    .base_url
                    .clone()
                    .unwrap_or_else(|| OPENAI_BASE_URL.to_string());
                tracing::info!(model = %settings.model, voice = %settings.voice, "Using OpenAI speech");
                Ok(Arc::new(OpenAiSpeechEngine::new(
                    api_key,
                    base_url,
                    settings.model.clone(),
                    settings.voice.clone(),
                )))
            }
        }
    }
}
