//! services/api/src/web/chat_task.rs
//!
//! This module contains the pipeline behind the three chat endpoints: each
//! function takes one user turn, produces one assistant turn, and persists the
//! pair as a single chat message.

use crate::{
    error::ApiError,
    web::{protocol::ChatTurnResponse, state::AppState},
};
use legal_assistant_core::{
    constants::MAX_MESSAGE_LENGTH,
    domain::{ChatMessage, ChatRequest, MessageKind, NewChatMessage, ResponseKind},
};
use std::time::Instant;
use tracing::{info, warn};

/// The reply persisted when the response generator fails.
pub const DEGRADED_REPLY: &str = "I apologize, but I'm experiencing technical difficulties. Please try again later or contact our support team for assistance.";

/// A text (or voice-transcribed) turn, already past the transport layer.
#[derive(Debug, Clone)]
pub struct TextTurn {
    pub message: String,
    pub language: String,
    pub user_id: Option<i64>,
    pub message_kind: MessageKind,
    pub document_text: Option<String>,
}

/// An uploaded file plus whatever accompanied it in the form.
#[derive(Debug, Clone)]
pub struct FileTurn {
    pub file_name: String,
    pub data: Vec<u8>,
    pub message: Option<String>,
    pub language: String,
    pub user_id: Option<i64>,
}

pub fn validate_message(message: &str) -> Result<(), ApiError> {
    if message.trim().is_empty() {
        return Err(ApiError::Validation("Message is required".to_string()));
    }
    if message.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(ApiError::Validation(format!(
            "Message must be at most {} characters",
            MAX_MESSAGE_LENGTH
        )));
    }
    Ok(())
}

fn project(
    stored: ChatMessage,
    response_kind: ResponseKind,
    transcribed_text: Option<String>,
    file_name: Option<String>,
) -> ChatTurnResponse {
    ChatTurnResponse {
        id: stored.id,
        transcribed_text,
        message: stored.message,
        response: stored.response,
        language: stored.language,
        message_type: stored.message_kind.as_str().to_string(),
        response_type: response_kind.as_str().to_string(),
        file_name,
        created_at: stored.created_at,
    }
}

//=========================================================================================
// Text
//=========================================================================================

/// Generates a reply for a text turn and stores it.
///
/// A generator failure does not fail the request: the turn is stored with
/// `DEGRADED_REPLY` and reported back with `responseType: "error"`.
pub async fn text_process(
    app_state: &AppState,
    turn: TextTurn,
) -> Result<(ChatMessage, ResponseKind), ApiError> {
    validate_message(&turn.message)?;

    let request = ChatRequest {
        message: turn.message.clone(),
        language: turn.language.clone(),
        message_kind: turn.message_kind,
        document_text: turn.document_text.filter(|d| !d.trim().is_empty()),
    };

    let llm_start = Instant::now();
    let (response, response_kind) = match app_state.legal_adapter.generate_response(&request).await
    {
        Ok(text) => (text, ResponseKind::Text),
        Err(e) => {
            warn!("Response generation failed, storing fallback reply: {}", e);
            (DEGRADED_REPLY.to_string(), ResponseKind::Error)
        }
    };
    info!("⏱️ LLM took: {:?}", llm_start.elapsed());

    let stored = app_state
        .db
        .create_chat_message(NewChatMessage {
            user_id: turn.user_id,
            message: turn.message,
            response: Some(response),
            language: turn.language,
            message_kind: turn.message_kind,
        })
        .await
        .map_err(|e| ApiError::external("Failed to process message", e))?;

    info!(
        id = stored.id,
        kind = %stored.message_kind,
        "Stored chat turn for user {:?}",
        stored.user_id
    );
    Ok((stored, response_kind))
}

pub async fn text_turn(app_state: &AppState, turn: TextTurn) -> Result<ChatTurnResponse, ApiError> {
    let (stored, response_kind) = text_process(app_state, turn).await?;
    Ok(project(stored, response_kind, None, None))
}

//=========================================================================================
// Voice
//=========================================================================================

/// Transcribes the audio and then runs the transcript through the text path.
/// Nothing is stored if transcription fails or yields no text.
pub async fn voice_turn(
    app_state: &AppState,
    audio: &[u8],
    language: String,
    user_id: Option<i64>,
) -> Result<ChatTurnResponse, ApiError> {
    let stt_start = Instant::now();
    let transcript = app_state
        .sst_adapter
        .transcribe_audio(audio)
        .await
        .map_err(ApiError::Transcription)?;
    info!("⏱️ STT took: {:?}", stt_start.elapsed());

    let transcript = transcript.trim().to_string();
    if transcript.is_empty() {
        return Err(ApiError::Validation("Could not transcribe audio".to_string()));
    }
    info!("Transcribed voice message: '{}'", transcript);

    let (stored, response_kind) = text_process(
        app_state,
        TextTurn {
            message: transcript.clone(),
            language,
            user_id,
            message_kind: MessageKind::Voice,
            document_text: None,
        },
    )
    .await?;
    Ok(project(stored, response_kind, Some(transcript), None))
}

//=========================================================================================
// File
//=========================================================================================

/// Combines the user's note with the analysis, or returns the analysis alone.
pub fn compose_file_response(message: Option<&str>, analysis: &str) -> String {
    match message {
        Some(message) => format!("{}\n\nDocument Analysis:\n{}", message, analysis),
        None => analysis.to_string(),
    }
}

/// Extracts the upload's text, analyzes it, and stores the result.
/// Extraction and analysis failures are hard errors; nothing is stored.
pub async fn file_turn(app_state: &AppState, turn: FileTurn) -> Result<ChatTurnResponse, ApiError> {
    let note = turn
        .message
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string);
    if let Some(note) = &note {
        validate_message(note)?;
    }

    let document_text = app_state
        .extractor
        .extract_text(&turn.file_name, &turn.data)
        .await
        .map_err(|e| ApiError::external("Failed to process file", e))?;

    let llm_start = Instant::now();
    let analysis = app_state
        .document_adapter
        .analyze_document(&document_text, &turn.file_name)
        .await
        .map_err(|e| ApiError::external("Failed to process file", e))?;
    info!("⏱️ Document analysis took: {:?}", llm_start.elapsed());

    let response = compose_file_response(note.as_deref(), &analysis);
    let message = note.unwrap_or_else(|| format!("Uploaded file: {}", turn.file_name));

    let stored = app_state
        .db
        .create_chat_message(NewChatMessage {
            user_id: turn.user_id,
            message,
            response: Some(response),
            language: turn.language,
            message_kind: MessageKind::File,
        })
        .await
        .map_err(|e| ApiError::external("Failed to process file", e))?;

    info!(id = stored.id, "Stored analysis of '{}'", turn.file_name);
    Ok(project(stored, ResponseKind::Text, None, Some(turn.file_name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_oversized_messages_are_rejected() {
        assert!(validate_message("   \n\t").is_err());
        assert!(validate_message(&"a".repeat(MAX_MESSAGE_LENGTH + 1)).is_err());
        assert!(validate_message(&"अ".repeat(MAX_MESSAGE_LENGTH)).is_ok());
    }

    #[test]
    fn file_response_prefixes_the_user_note() {
        assert_eq!(
            compose_file_response(Some("Is this valid?"), "Looks valid."),
            "Is this valid?\n\nDocument Analysis:\nLooks valid."
        );
        assert_eq!(compose_file_response(None, "Looks valid."), "Looks valid.");
    }
}
