//! services/api/src/adapters/sst.rs
//!
//! Whisper transcription for recorded voice messages. Implements the
//! `SpeechToTextService` port.

use async_openai::{
    config::OpenAIConfig,
    types::audio::{AudioInput, CreateTranscriptionRequest},
    Client,
};
use async_trait::async_trait;
use legal_assistant_core::ports::{PortError, PortResult, SpeechToTextService};
use tracing::{debug, info};

/// Guesses the upload name from the container's magic bytes. Whisper picks the
/// decoder from the extension, and browsers record webm or ogg rather than wav.
fn upload_name(audio: &[u8]) -> &'static str {
    match audio {
        [0x1A, 0x45, 0xDF, 0xA3, ..] => "voice.webm",
        [b'O', b'g', b'g', b'S', ..] => "voice.ogg",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'A', b'V', b'E', ..] => "voice.wav",
        [b'I', b'D', b'3', ..] | [0xFF, 0xFB, ..] | [0xFF, 0xF3, ..] => "voice.mp3",
        [_, _, _, _, b'f', b't', b'y', b'p', ..] => "voice.m4a",
        _ => "voice.webm",
    }
}

#[derive(Clone)]
pub struct OpenAiSstAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiSstAdapter {
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl SpeechToTextService for OpenAiSstAdapter {
    /// Sends the whole recording in one request; no chunking and no retry.
    async fn transcribe_audio(&self, audio_data: &[u8]) -> PortResult<String> {
        let name = upload_name(audio_data);
        info!(bytes = audio_data.len(), "Transcribing '{}' with {}", name, self.model);

        let request = CreateTranscriptionRequest {
            file: AudioInput::from_vec_u8(name.into(), audio_data.to_vec()),
            model: self.model.clone(),
            ..Default::default()
        };

        let transcription = self
            .client
            .audio()
            .transcription()
            .create(request)
            .await
            .map_err(|e| PortError::Unexpected(format!("Whisper request failed: {}", e)))?;

        debug!(chars = transcription.text.len(), "Transcription received");
        Ok(transcription.text)
    }
}
