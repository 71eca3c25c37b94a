use std::time::Duration;

use crate::application::ports::{LlmClient, LlmClientError};

/// Canned completions for scaffold mode.
#[derive(Default)]
pub struct MockLlmClient {
    delay: Duration,
}

impl MockLlmClient {
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, prompt: &str, model: &str) -> Result<String, LlmClientError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(format!(
            "Mock completion from {} for a {}-character prompt.",
            model,
            prompt.chars().count()
        ))
    }
}
