use std::fmt::Display;
use std::io::Write;
use std::path::Path;

use async_trait::async_trait;
use pdf_oxide::PdfDocument;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ExtractedText, FileKind, UploadedDocument};

/// Extracts the text layer of every page, in page order.
#[derive(Default)]
pub struct PdfAdapter {
    separator: String,
}

impl PdfAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    fn extract_pages(path: &Path) -> Result<Vec<String>, FileLoaderError> {
        let mut doc = PdfDocument::open(path)
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to parse PDF: {e}")))?;

        let page_count = doc.page_count().map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to read page count: {e}"))
        })?;

        collect_page_text(page_count, |page_index| doc.extract_text(page_index))
    }
}

/// One entry per page, in order. A page without a text layer yields an
/// empty string; a page that fails to parse fails the whole document.
pub fn collect_page_text<E: Display>(
    page_count: usize,
    mut extract_page: impl FnMut(usize) -> Result<String, E>,
) -> Result<Vec<String>, FileLoaderError> {
    (0..page_count)
        .map(|page_index| {
            extract_page(page_index).map_err(|e| {
                tracing::warn!(page_index, error = %e, "Failed to extract page text");
                FileLoaderError::ExtractionFailed(format!("page {page_index}: {e}"))
            })
        })
        .collect()
}

#[async_trait]
impl FileLoader for PdfAdapter {
    #[tracing::instrument(
        skip(self, document),
        fields(
            document_id = %document.id.as_uuid(),
            filename = %document.filename,
        )
    )]
    async fn extract_text(
        &self,
        document: &UploadedDocument,
    ) -> Result<ExtractedText, FileLoaderError> {
        if document.kind() != Some(FileKind::Pdf) {
            return Err(FileLoaderError::UnsupportedFormat(document.filename.clone()));
        }

        let mut temp_file = tempfile::NamedTempFile::new().map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to create temp file: {e}"))
        })?;
        temp_file.write_all(&document.bytes).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to write temp file: {e}"))
        })?;

        let temp_path = temp_file.into_temp_path();
        let pages = tokio::task::spawn_blocking(move || {
            let pages = Self::extract_pages(&temp_path);
            drop(temp_path);
            pages
        })
        .await
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("task join error: {e}")))??;

        let empty_pages = pages.iter().filter(|p| p.is_empty()).count();
        tracing::info!(
            page_count = pages.len(),
            empty_pages,
            "PDF text extraction complete"
        );

        Ok(ExtractedText::from_fragments(&pages, &self.separator))
    }
}
