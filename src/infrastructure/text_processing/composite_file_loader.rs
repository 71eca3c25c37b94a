use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ExtractedText, FileKind, UploadedDocument};

use super::docx_adapter::DocxAdapter;
use super::pdf_adapter::PdfAdapter;

/// Routes a document to the adapter registered for its file kind.
pub struct CompositeFileLoader {
    adapters: HashMap<FileKind, Arc<dyn FileLoader>>,
}

impl CompositeFileLoader {
    pub fn new(adapters: Vec<(FileKind, Arc<dyn FileLoader>)>) -> Self {
        Self {
            adapters: adapters.into_iter().collect(),
        }
    }

    /// PDF and DOCX adapters sharing one fragment separator.
    pub fn for_documents(separator: &str) -> Self {
        Self::new(vec![
            (
                FileKind::Pdf,
                Arc::new(PdfAdapter::with_separator(separator)) as Arc<dyn FileLoader>,
            ),
            (
                FileKind::Docx,
                Arc::new(DocxAdapter::with_separator(separator)) as Arc<dyn FileLoader>,
            ),
        ])
    }
}

#[async_trait]
impl FileLoader for CompositeFileLoader {
    async fn extract_text(
        &self,
        document: &UploadedDocument,
    ) -> Result<ExtractedText, FileLoaderError> {
        let adapter = document
            .kind()
            .and_then(|kind| self.adapters.get(&kind))
            .ok_or_else(|| {
                tracing::warn!(filename = %document.filename, "No extractor for file");
                FileLoaderError::UnsupportedFormat(document.filename.clone())
            })?;

        adapter.extract_text(document).await
    }
}
