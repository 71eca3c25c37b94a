use std::sync::Arc;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::PromptKind;

/// Completion models a caller may pick from.
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    default_model: String,
    supported: Vec<String>,
}

impl ModelCatalog {
    /// The default model is always part of the catalogue.
    pub fn new(default_model: impl Into<String>, supported: Vec<String>) -> Self {
        let default_model = default_model.into();
        let mut supported = supported;
        if !supported.contains(&default_model) {
            supported.insert(0, default_model.clone());
        }
        Self {
            default_model,
            supported,
        }
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    pub fn supported(&self) -> &[String] {
        &self.supported
    }

    /// Blank or missing selections fall back to the default model.
    pub fn resolve(&self, requested: Option<&str>) -> Result<String, SummarizationError> {
        let requested = requested.map(str::trim).filter(|m| !m.is_empty());
        match requested {
            None => Ok(self.default_model.clone()),
            Some(model) if self.supported.iter().any(|m| m == model) => Ok(model.to_string()),
            Some(model) => Err(SummarizationError::UnsupportedModel {
                requested: model.to_string(),
                default: self.default_model.clone(),
            }),
        }
    }
}

pub struct SummarizationService {
    llm_client: Arc<dyn LlmClient>,
    catalog: ModelCatalog,
    max_input_chars: usize,
}

impl SummarizationService {
    /// `max_input_chars == 0` sends the text untruncated.
    pub fn new(llm_client: Arc<dyn LlmClient>, catalog: ModelCatalog, max_input_chars: usize) -> Self {
        Self {
            llm_client,
            catalog,
            max_input_chars,
        }
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    pub async fn summarize(&self, text: &str, model: &str) -> Result<String, SummarizationError> {
        self.complete(PromptKind::Summarize, text, model).await
    }

    pub async fn analyze(&self, text: &str, model: &str) -> Result<String, SummarizationError> {
        self.complete(PromptKind::Analyze, text, model).await
    }

    #[tracing::instrument(skip(self, text), fields(kind = kind.as_str(), chars = text.len()))]
    async fn complete(
        &self,
        kind: PromptKind,
        text: &str,
        model: &str,
    ) -> Result<String, SummarizationError> {
        let model = self.catalog.resolve(Some(model))?;
        let text = self.bounded(text);
        let prompt = kind.render(text);

        let completion = self.llm_client.complete(&prompt, &model).await?;

        tracing::info!(
            model = %model,
            response_chars = completion.len(),
            "Completion received"
        );

        Ok(completion)
    }

    fn bounded<'a>(&self, text: &'a str) -> &'a str {
        if self.max_input_chars == 0 {
            return text;
        }
        match text.char_indices().nth(self.max_input_chars) {
            Some((cut, _)) => {
                tracing::warn!(
                    limit = self.max_input_chars,
                    dropped_bytes = text.len() - cut,
                    "Input exceeds max_input_chars, truncating"
                );
                &text[..cut]
            }
            None => text,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SummarizationError {
    #[error("This model is not implemented yet. Please select '{default}'.")]
    UnsupportedModel { requested: String, default: String },
    #[error(transparent)]
    Completion(#[from] LlmClientError),
}
