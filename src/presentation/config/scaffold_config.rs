use std::time::Duration;

/// Scaffold mode swaps every external service (LLM, speech, transcription)
/// for an in-process mock so the HTTP surface runs without credentials.
#[derive(Debug, Clone, Default)]
pub struct ScaffoldConfig {
    pub enabled: bool,
    pub mock_response_delay_ms: u64,
}

impl ScaffoldConfig {
    pub fn from_env() -> Self {
        Self {
            enabled: std::env::var("SCAFFOLD_MODE")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(false),
            mock_response_delay_ms: std::env::var("MOCK_RESPONSE_DELAY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
        }
    }

    pub fn mock_response_delay(&self) -> Duration {
        Duration::from_millis(self.mock_response_delay_ms)
    }
}
