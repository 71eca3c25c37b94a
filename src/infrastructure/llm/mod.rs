mod chat_completion_client;
mod mock_llm_client;

pub use chat_completion_client::{ChatCompletionClient, GROQ_BASE_URL, OPENAI_BASE_URL};
pub use mock_llm_client::MockLlmClient;
