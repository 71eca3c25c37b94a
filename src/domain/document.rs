use bytes::Bytes;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

/// File formats the pipeline knows how to ingest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Pdf,
    Docx,
    Mp3,
    Wav,
}

impl FileKind {
    /// Resolves the kind from the declared filename. The suffix match is
    /// case-sensitive: `report.PDF` is not a PDF.
    pub fn from_filename(filename: &str) -> Option<Self> {
        if filename.ends_with(".pdf") {
            Some(Self::Pdf)
        } else if filename.ends_with(".docx") {
            Some(Self::Docx)
        } else if filename.ends_with(".mp3") {
            Some(Self::Mp3)
        } else if filename.ends_with(".wav") {
            Some(Self::Wav)
        } else {
            None
        }
    }

    pub fn is_audio(&self) -> bool {
        matches!(self, Self::Mp3 | Self::Wav)
    }
}

/// A single upload, as received. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub id: DocumentId,
    pub filename: String,
    pub bytes: Bytes,
}

impl UploadedDocument {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            id: DocumentId::new(),
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    pub fn kind(&self) -> Option<FileKind> {
        FileKind::from_filename(&self.filename)
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}
