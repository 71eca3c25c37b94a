mod narration_service;
mod pipeline_service;
mod summarization_service;

pub use narration_service::{NarrationError, NarrationService};
pub use pipeline_service::{PipelineError, PipelineService};
pub use summarization_service::{ModelCatalog, SummarizationError, SummarizationService};
