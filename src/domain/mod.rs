mod document;
mod extracted_text;
mod narration;
mod pipeline;
mod prompt;

pub use document::{DocumentId, FileKind, UploadedDocument};
pub use extracted_text::ExtractedText;
pub use narration::{NarrationArtifact, NarrationId};
pub use pipeline::{PipelineOutcome, PipelineStage};
pub use prompt::PromptKind;
