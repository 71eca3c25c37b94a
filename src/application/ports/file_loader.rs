use async_trait::async_trait;

use crate::domain::{ExtractedText, UploadedDocument};

pub const UNSUPPORTED_FORMAT_MESSAGE: &str =
    "Unsupported file format. Please upload a PDF or DOCX file.";

#[async_trait]
pub trait FileLoader: Send + Sync {
    async fn extract_text(
        &self,
        document: &UploadedDocument,
    ) -> Result<ExtractedText, FileLoaderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FileLoaderError {
    #[error("Unsupported file format. Please upload a PDF or DOCX file.")]
    UnsupportedFormat(String),
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
}
