use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

use tempfile::TempPath;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NarrationId(Uuid);

impl NarrationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for NarrationId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for NarrationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for NarrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A synthesized MP3 on local disk.
///
/// The artifact owns its file: dropping it removes the file. Whoever holds
/// the artifact decides how long the audio stays available.
#[derive(Debug)]
pub struct NarrationArtifact {
    id: NarrationId,
    path: TempPath,
    size_bytes: u64,
}

impl NarrationArtifact {
    /// Writes `audio` to a fresh `narration-*.mp3` file, in `dir` when given
    /// or in the system temp directory otherwise.
    pub fn create(dir: Option<&Path>, audio: &[u8]) -> io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("narration-").suffix(".mp3");

        let mut file = match dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(audio)?;
        file.flush()?;

        Ok(Self {
            id: NarrationId::new(),
            path: file.into_temp_path(),
            size_bytes: audio.len() as u64,
        })
    }

    pub fn id(&self) -> NarrationId {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }
}
