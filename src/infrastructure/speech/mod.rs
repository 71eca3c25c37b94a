mod google_translate_tts;
mod mock_speech_synthesizer;
mod openai_speech_engine;
mod speech_synthesizer_factory;
mod speech_text_splitter;

pub use google_translate_tts::GoogleTranslateTts;
pub use mock_speech_synthesizer::MockSpeechSynthesizer;
pub use openai_speech_engine::OpenAiSpeechEngine;
pub use speech_synthesizer_factory::{SpeechSynthesizerFactory, SpeechSynthesizerFactoryError};
pub use speech_text_splitter::split_for_speech;
