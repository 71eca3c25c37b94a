use std::sync::Arc;

use crate::application::ports::{
    AudioFormat, FileLoader, FileLoaderError, LlmClientError, TranscriptionEngine,
    TranscriptionError,
};
use crate::domain::{FileKind, PipelineOutcome, PipelineStage, UploadedDocument};

use super::narration_service::{NarrationError, NarrationService};
use super::summarization_service::{SummarizationError, SummarizationService};

/// Runs one upload through ingestion, summarization or transcription, and
/// narration. Any stage failure ends the run; later stages are never
/// started.
pub struct PipelineService {
    file_loader: Arc<dyn FileLoader>,
    summarization: Arc<SummarizationService>,
    narration: Arc<NarrationService>,
    transcription: Option<Arc<dyn TranscriptionEngine>>,
}

impl PipelineService {
    pub fn new(
        file_loader: Arc<dyn FileLoader>,
        summarization: Arc<SummarizationService>,
        narration: Arc<NarrationService>,
        transcription: Option<Arc<dyn TranscriptionEngine>>,
    ) -> Self {
        Self {
            file_loader,
            summarization,
            narration,
            transcription,
        }
    }

    pub fn summarization(&self) -> &SummarizationService {
        &self.summarization
    }

    pub fn supports_audio(&self) -> bool {
        self.transcription.is_some()
    }

    #[tracing::instrument(
        skip(self, document),
        fields(
            document_id = %document.id.as_uuid(),
            filename = %document.filename,
            bytes = document.size_bytes(),
        )
    )]
    pub async fn run(
        &self,
        document: UploadedDocument,
        model: Option<&str>,
    ) -> Result<PipelineOutcome, PipelineError> {
        let kind = document
            .kind()
            .ok_or(PipelineError::UnsupportedFormat)?;

        if kind.is_audio() {
            return self.transcribe(document, kind).await;
        }

        let model = self
            .summarization
            .catalog()
            .resolve(model)
            .map_err(PipelineError::from_summarization)?;

        let text = self
            .file_loader
            .extract_text(&document)
            .await
            .map_err(PipelineError::from_ingestion)?;
        drop(document);
        advance(PipelineStage::Ingested);

        let summary = self
            .summarization
            .summarize(text.as_str(), &model)
            .await
            .map_err(PipelineError::from_summarization)?;
        advance(PipelineStage::Summarized);

        let narration = self
            .narration
            .narrate(&summary)
            .await
            .map_err(PipelineError::Narration)?;
        advance(PipelineStage::Narrated);

        advance(PipelineStage::Done);
        Ok(PipelineOutcome::Summary {
            text: summary,
            model,
            narration,
        })
    }

    /// Free-text analysis. Not part of the upload flow and never narrated.
    #[tracing::instrument(skip(self, text), fields(chars = text.len()))]
    pub async fn analyze(&self, text: &str, model: Option<&str>) -> Result<String, PipelineError> {
        let model = self
            .summarization
            .catalog()
            .resolve(model)
            .map_err(PipelineError::from_analysis)?;

        self.summarization
            .analyze(text, &model)
            .await
            .map_err(PipelineError::from_analysis)
    }

    async fn transcribe(
        &self,
        document: UploadedDocument,
        kind: FileKind,
    ) -> Result<PipelineOutcome, PipelineError> {
        let Some(engine) = &self.transcription else {
            tracing::warn!("Audio upload rejected: transcription is disabled");
            return Err(PipelineError::UnsupportedFormat);
        };

        let format = AudioFormat::from_file_kind(kind).ok_or(PipelineError::UnsupportedFormat)?;
        advance(PipelineStage::Ingested);

        let text = engine
            .transcribe(&document.bytes, format)
            .await
            .map_err(PipelineError::Transcription)?;
        advance(PipelineStage::Transcribed);

        advance(PipelineStage::Done);
        Ok(PipelineOutcome::Transcript { text })
    }
}

fn advance(stage: PipelineStage) {
    tracing::debug!(stage = %stage, "Pipeline advanced");
}

/// Terminal failure of a pipeline run. The `Display` text is the message
/// shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Unsupported file format. Please upload a PDF or DOCX file.")]
    UnsupportedFormat,
    #[error("Error extracting text: {0}")]
    Extraction(String),
    #[error("This model is not implemented yet. Please select '{default}'.")]
    UnsupportedModel { requested: String, default: String },
    #[error("Error generating summary: {0}")]
    Summarization(LlmClientError),
    #[error("Error analyzing text: {0}")]
    Analysis(LlmClientError),
    #[error("Error transcribing audio: {0}")]
    Transcription(TranscriptionError),
    #[error("Error generating audio: {0}")]
    Narration(NarrationError),
}

impl PipelineError {
    /// Last stage reached before the failure.
    pub fn stage(&self) -> PipelineStage {
        match self {
            Self::UnsupportedFormat | Self::Extraction(_) | Self::UnsupportedModel { .. } => {
                PipelineStage::Idle
            }
            Self::Summarization(_) | Self::Analysis(_) | Self::Transcription(_) => {
                PipelineStage::Ingested
            }
            Self::Narration(_) => PipelineStage::Summarized,
        }
    }

    fn from_ingestion(error: FileLoaderError) -> Self {
        match error {
            FileLoaderError::UnsupportedFormat(_) => Self::UnsupportedFormat,
            FileLoaderError::ExtractionFailed(detail) => Self::Extraction(detail),
        }
    }

    fn from_summarization(error: SummarizationError) -> Self {
        match error {
            SummarizationError::UnsupportedModel { requested, default } => {
                Self::UnsupportedModel { requested, default }
            }
            SummarizationError::Completion(e) => Self::Summarization(e),
        }
    }

    fn from_analysis(error: SummarizationError) -> Self {
        match error {
            SummarizationError::UnsupportedModel { requested, default } => {
                Self::UnsupportedModel { requested, default }
            }
            SummarizationError::Completion(e) => Self::Analysis(e),
        }
    }
}
