mod analyze;
mod error_response;
mod health;
mod models;
mod narration;
mod summarize;

pub use analyze::{AnalyzeRequest, AnalyzeResponse, analyze_handler};
pub use error_response::{ErrorResponse, status_for};
pub use health::health_handler;
pub use models::models_handler;
pub use narration::narration_handler;
pub use summarize::{DOCUMENT_FIELD, MODEL_FIELD, SummarizeResponse, summarize_handler};
