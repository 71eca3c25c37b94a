use std::fmt;

use serde::Serialize;

use super::narration::NarrationArtifact;

/// Where a request is in the ingest → summarize/transcribe → narrate flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStage {
    Idle,
    Ingested,
    Summarized,
    Transcribed,
    Narrated,
    Done,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Ingested => "ingested",
            Self::Summarized => "summarized",
            Self::Transcribed => "transcribed",
            Self::Narrated => "narrated",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Successful end state of one pipeline run.
#[derive(Debug)]
pub enum PipelineOutcome {
    Summary {
        text: String,
        model: String,
        narration: NarrationArtifact,
    },
    Transcript {
        text: String,
    },
}

impl PipelineOutcome {
    pub fn text(&self) -> &str {
        match self {
            Self::Summary { text, .. } | Self::Transcript { text } => text,
        }
    }

    pub fn narration(&self) -> Option<&NarrationArtifact> {
        match self {
            Self::Summary { narration, .. } => Some(narration),
            Self::Transcript { .. } => None,
        }
    }
}
