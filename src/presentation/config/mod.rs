mod environment;
mod scaffold_config;
mod settings;

pub use environment::Environment;
pub use scaffold_config::ScaffoldConfig;
pub use settings::{
    GROQ_API_KEY_VAR, IngestionSettings, LlmProvider, LlmSettings, LoggingSettings,
    NarrationProvider, NarrationSettings, ServerSettings, Settings, TranscriptionProvider,
    TranscriptionSettings,
};
