use async_trait::async_trait;
use docx_rs::{DocumentChild, Paragraph, ParagraphChild, RunChild};

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ExtractedText, FileKind, UploadedDocument};

/// Extracts body paragraphs of a Word document, in document order.
/// Tables, headers and footers are not read.
#[derive(Default)]
pub struct DocxAdapter {
    separator: String,
}

impl DocxAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    fn extract_paragraphs(data: &[u8]) -> Result<Vec<String>, FileLoaderError> {
        let docx = docx_rs::read_docx(data).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to parse DOCX: {e:?}"))
        })?;

        Ok(docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
                _ => None,
            })
            .collect())
    }
}

/// Runs are parts of the same sentence, so they are joined as-is.
fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                match run_child {
                    RunChild::Text(t) => text.push_str(&t.text),
                    RunChild::Tab(_) => text.push('\t'),
                    RunChild::Break(_) => text.push('\n'),
                    _ => {}
                }
            }
        }
    }
    text
}

#[async_trait]
impl FileLoader for DocxAdapter {
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
        if document.kind() != Some(FileKind::Docx) {
            return Err(FileLoaderError::UnsupportedFormat(document.filename.clone()));
        }

        let data = document.bytes.clone();
        let paragraphs = tokio::task::spawn_blocking(move || Self::extract_paragraphs(&data))
            .await
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("task join error: {e}")))??;

        tracing::info!(
            paragraph_count = paragraphs.len(),
            "DOCX text extraction complete"
        );

        Ok(ExtractedText::from_fragments(&paragraphs, &self.separator))
    }
}
