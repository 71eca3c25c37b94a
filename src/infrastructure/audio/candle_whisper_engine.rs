use std::fmt::Display;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use candle_core::{Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::whisper::{self as m, Config};
use hf_hub::api::sync::{Api, ApiRepo};
use hf_hub::{Repo, RepoType};
use tokenizers::Tokenizer;

use crate::application::ports::{AudioFormat, TranscriptionEngine, TranscriptionError};

use super::audio_decoder::decode_audio_to_pcm;

const MEL_FILTERS_REPO: &str = "FL33TW00D-HF/whisper-base";
const MAX_DECODE_TOKENS: usize = 224;

/// Whisper running in-process on the CPU.
///
/// Weights are fetched from the Hugging Face hub and loaded once; build the
/// engine at startup and share it. Loading blocks, so call [`Self::load`]
/// off the async runtime. Decoding and inference run on the blocking pool.
pub struct CandleWhisperEngine {
    inner: Arc<WhisperModel>,
}

struct WhisperModel {
    model: Mutex<m::model::Whisper>,
    tokenizer: Tokenizer,
    prompt: PromptTokens,
    config: Config,
    device: Device,
    mel_filters: Vec<f32>,
}

/// Special tokens that open every decoding pass.
struct PromptTokens {
    sot: u32,
    language: Option<u32>,
    transcribe: u32,
    no_timestamps: u32,
    eot: u32,
}

impl PromptTokens {
    fn resolve(tokenizer: &Tokenizer, language: Option<&str>) -> Result<Self, TranscriptionError> {
        // English-only checkpoints have no language tokens at all
        let language = language.and_then(|code| {
            let id = tokenizer.token_to_id(&format!("<|{code}|>"));
            if id.is_none() {
                tracing::debug!(language = code, "Model has no language token, skipping");
            }
            id
        });

        Ok(Self {
            sot: token_id(tokenizer, m::SOT_TOKEN)?,
            language,
            transcribe: token_id(tokenizer, m::TRANSCRIBE_TOKEN)?,
            no_timestamps: token_id(tokenizer, m::NO_TIMESTAMPS_TOKEN)?,
            eot: token_id(tokenizer, m::EOT_TOKEN)?,
        })
    }

    fn prefix(&self) -> Vec<u32> {
        let mut tokens = vec![self.sot];
        tokens.extend(self.language);
        tokens.push(self.transcribe);
        tokens.push(self.no_timestamps);
        tokens
    }
}

struct ModelFiles {
    config: PathBuf,
    tokenizer: PathBuf,
    weights: PathBuf,
    mel_filters: PathBuf,
}

impl ModelFiles {
    fn fetch(api: &Api, model_id: &str) -> Result<Self, TranscriptionError> {
        let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));
        let config = fetch(&repo, "config.json")?;
        let tokenizer = fetch(&repo, "tokenizer.json")?;
        let weights = fetch(&repo, "model.safetensors")?;

        let mel_repo = api.repo(Repo::new(MEL_FILTERS_REPO.to_string(), RepoType::Model));
        let mel_filters = fetch(&mel_repo, "melfilters.bytes")?;

        Ok(Self {
            config,
            tokenizer,
            weights,
            mel_filters,
        })
    }
}

impl CandleWhisperEngine {
    pub fn load(model_id: &str, language: Option<&str>) -> Result<Self, TranscriptionError> {
        let device = Device::Cpu;
        tracing::info!(
            device = ?device,
            model = model_id,
            language = language.unwrap_or("auto"),
            "Loading Whisper model"
        );

        let api = Api::new().map_err(load_error)?;
        let files = ModelFiles::fetch(&api, model_id)?;

        let config: Config = serde_json::from_str(
            &std::fs::read_to_string(&files.config).map_err(load_error)?,
        )
        .map_err(|e| TranscriptionError::ModelLoadFailed(format!("parse config: {}", e)))?;

        let tokenizer = Tokenizer::from_file(&files.tokenizer)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("tokenizer: {}", e)))?;
        let prompt = PromptTokens::resolve(&tokenizer, language)?;

        let mel_bytes = std::fs::read(&files.mel_filters).map_err(load_error)?;
        let mel_filters = read_mel_filters(&mel_bytes, &config)?;

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[files.weights], m::DTYPE, &device)
                .map_err(|e| TranscriptionError::ModelLoadFailed(format!("weights: {}", e)))?
        };
        let model = m::model::Whisper::load(&vb, config.clone())
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("model: {}", e)))?;

        tracing::info!(mel_bins = config.num_mel_bins, "Whisper model loaded");

        Ok(Self {
            inner: Arc::new(WhisperModel {
                model: Mutex::new(model),
                tokenizer,
                prompt,
                config,
                device,
                mel_filters,
            }),
        })
    }
}

impl WhisperModel {
    fn transcribe(&self, audio_data: &[u8], format: AudioFormat) -> Result<String, TranscriptionError> {
        let pcm = decode_audio_to_pcm(audio_data, format)?;

        let windows = pcm
            .chunks(m::N_SAMPLES)
            .map(|window| self.mel_window(window))
            .collect::<Result<Vec<_>, _>>()?;

        let mut model = self.model.lock().map_err(|_| {
            TranscriptionError::TranscriptionFailed("whisper model lock poisoned".to_string())
        })?;
        let mut segments = Vec::with_capacity(windows.len());
        for (index, mel) in windows.iter().enumerate() {
            tracing::debug!(window = index, "Transcribing audio window");
            let text = self.decode_window(&mut model, mel)?;
            if !text.is_empty() {
                segments.push(text);
            }
        }

        let transcript = segments.join(" ");
        tracing::info!(
            windows = windows.len(),
            chars = transcript.len(),
            "Audio transcription completed"
        );

        Ok(transcript)
    }

    /// Log-mel spectrogram of one 30 second window, zero padded.
    fn mel_window(&self, window: &[f32]) -> Result<Tensor, TranscriptionError> {
        let mut samples = window.to_vec();
        samples.resize(m::N_SAMPLES, 0.0);

        let mel = m::audio::pcm_to_mel(&self.config, &samples, &self.mel_filters);
        let n_mel = self.config.num_mel_bins;
        let n_frames = mel.len() / n_mel;

        Tensor::from_vec(mel, (1, n_mel, n_frames), &self.device).map_err(inference_error)
    }

    /// Greedy decoding of one window.
    fn decode_window(
        &self,
        model: &mut m::model::Whisper,
        mel: &Tensor,
    ) -> Result<String, TranscriptionError> {
        let audio_features = model.encoder.forward(mel, true).map_err(inference_error)?;

        let mut tokens = self.prompt.prefix();
        let prefix_len = tokens.len();

        for _ in 0..MAX_DECODE_TOKENS {
            let input = Tensor::new(tokens.as_slice(), &self.device)
                .and_then(|t| t.unsqueeze(0))
                .map_err(inference_error)?;

            let hidden = model
                .decoder
                .forward(&input, &audio_features, tokens.len() == prefix_len)
                .map_err(inference_error)?;
            let logits = hidden
                .squeeze(0)
                .and_then(|h| model.decoder.final_linear(&h))
                .map_err(inference_error)?;

            let last = logits.dim(0).map_err(inference_error)? - 1;
            let next = logits
                .get(last)
                .and_then(|l| l.argmax(0))
                .and_then(|t| t.to_scalar::<u32>())
                .map_err(inference_error)?;

            if next == self.prompt.eot {
                break;
            }
            tokens.push(next);
        }

        model.reset_kv_cache();

        let text = self
            .tokenizer
            .decode(&tokens[prefix_len..], true)
            .map_err(|e| TranscriptionError::TranscriptionFailed(format!("detokenize: {}", e)))?;
        Ok(text.trim().to_string())
    }
}

#[async_trait]
impl TranscriptionEngine for CandleWhisperEngine {
    async fn transcribe(
        &self,
        audio_data: &[u8],
        format: AudioFormat,
    ) -> Result<String, TranscriptionError> {
        let inner = Arc::clone(&self.inner);
        let audio = audio_data.to_vec();
        let span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            let _entered = span.enter();
            inner.transcribe(&audio, format)
        })
        .await
        .map_err(|e| TranscriptionError::TranscriptionFailed(format!("task join error: {e}")))?
    }
}

fn fetch(repo: &ApiRepo, file: &str) -> Result<PathBuf, TranscriptionError> {
    repo.get(file)
        .map_err(|e| TranscriptionError::ModelLoadFailed(format!("{}: {}", file, e)))
}

fn token_id(tokenizer: &Tokenizer, token: &str) -> Result<u32, TranscriptionError> {
    tokenizer
        .token_to_id(token)
        .ok_or_else(|| TranscriptionError::ModelLoadFailed(format!("token not found: {}", token)))
}

fn load_error(e: impl Display) -> TranscriptionError {
    TranscriptionError::ModelLoadFailed(e.to_string())
}

fn inference_error(e: candle_core::Error) -> TranscriptionError {
    TranscriptionError::TranscriptionFailed(e.to_string())
}

fn read_mel_filters(bytes: &[u8], config: &Config) -> Result<Vec<f32>, TranscriptionError> {
    let expected_len = config.num_mel_bins * (m::N_FFT / 2 + 1);
    if bytes.len() < expected_len * 4 {
        return Err(TranscriptionError::ModelLoadFailed(format!(
            "mel filters file too small: {} bytes, expected at least {}",
            bytes.len(),
            expected_len * 4
        )));
    }

    Ok(bytes
        .chunks_exact(4)
        .take(expected_len)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}
