mod file_loader;
mod llm_client;
mod speech_synthesizer;
mod transcription_engine;

pub use file_loader::{FileLoader, FileLoaderError, UNSUPPORTED_FORMAT_MESSAGE};
pub use llm_client::{LlmClient, LlmClientError};
pub use speech_synthesizer::{SpeechSynthesisError, SpeechSynthesizer};
pub use transcription_engine::{AudioFormat, TranscriptionEngine, TranscriptionError};
