use async_trait::async_trait;
use bytes::{BufMut, Bytes, BytesMut};

use crate::application::ports::{SpeechSynthesisError, SpeechSynthesizer};

/// ID3v2.4 header with an empty tag; enough for players to sniff MP3.
const ID3_HEADER: &[u8] = b"ID3\x04\x00\x00\x00\x00\x00\x00";

/// Scaffold-mode synthesizer. Returns an ID3 header followed by the text,
/// refusing blank input the way the Google engine does.
pub struct MockSpeechSynthesizer;

#[async_trait]
impl SpeechSynthesizer for MockSpeechSynthesizer {
    async fn synthesize(&self, text: &str, _language: &str) -> Result<Bytes, SpeechSynthesisError> {
        if text.trim().is_empty() {
            return Err(SpeechSynthesisError::EmptyText);
        }
        let mut audio = BytesMut::with_capacity(ID3_HEADER.len() + text.len());
        audio.put_slice(ID3_HEADER);
        audio.put_slice(text.as_bytes());
        Ok(audio.freeze())
    }
}
