use std::path::PathBuf;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::Environment;

/// Environment variable consulted for the LLM credential when
/// `llm.api_key` is not configured.
pub const GROQ_API_KEY_VAR: &str = "GROQ_API_KEY";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub ingestion: IngestionSettings,
    pub transcription: TranscriptionSettings,
    pub narration: NarrationSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Defaults, then `appsettings.{environment}` if present, then `APP_*`
    /// variables with `__` between sections (`APP_LLM__DEFAULT_MODEL`).
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str()))
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("llm.supported_models")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// The configured LLM credential, falling back to `GROQ_API_KEY`.
    pub fn llm_api_key(&self) -> Option<String> {
        self.llm
            .api_key
            .clone()
            .or_else(|| std::env::var(GROQ_API_KEY_VAR).ok())
            .filter(|key| !key.trim().is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_size_mb: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            max_upload_size_mb: 50,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[default]
    Groq,
    #[serde(rename = "openai")]
    OpenAi,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub default_model: String,
    pub supported_models: Vec<String>,
    /// Upper bound on characters sent per request; 0 disables it.
    pub max_input_chars: usize,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: LlmProvider::Groq,
            base_url: None,
            api_key: None,
            default_model: "llama3-8b-8192".to_string(),
            supported_models: vec!["llama3-8b-8192".to_string()],
            max_input_chars: 24_000,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IngestionSettings {
    pub join_separator: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptionProvider {
    #[default]
    Local,
    Groq,
    #[serde(rename = "openai")]
    OpenAi,
}

impl TranscriptionProvider {
    /// Model used when `transcription.model` is not set. Local ids name a
    /// Hugging Face repo; hosted ids are the provider's own model names.
    pub fn default_model(self) -> &'static str {
        match self {
            Self::Local => "openai/whisper-base",
            Self::Groq => "whisper-large-v3",
            Self::OpenAi => "whisper-1",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranscriptionSettings {
    pub enabled: bool,
    pub provider: TranscriptionProvider,
    pub model: Option<String>,
    pub language: Option<String>,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            provider: TranscriptionProvider::Local,
            model: None,
            language: None,
            base_url: None,
            api_key: None,
        }
    }
}

impl TranscriptionSettings {
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .filter(|model| !model.is_empty())
            .unwrap_or_else(|| self.provider.default_model())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrationProvider {
    #[default]
    Google,
    #[serde(rename = "openai")]
    OpenAi,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NarrationSettings {
    pub provider: NarrationProvider,
    pub language: String,
    pub tld: String,
    pub model: String,
    pub voice: String,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub artifact_dir: Option<PathBuf>,
    pub artifact_ttl_secs: u64,
}

impl Default for NarrationSettings {
    fn default() -> Self {
        Self {
            provider: NarrationProvider::Google,
            language: "en".to_string(),
            tld: "com".to_string(),
            model: "tts-1".to_string(),
            voice: "alloy".to_string(),
            base_url: None,
            api_key: None,
            artifact_dir: None,
            artifact_ttl_secs: 600,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            enable_json: false,
        }
    }
}
