//! services/api/src/web/chat.rs
//!
//! Axum handlers for the chat endpoints: typed, spoken and uploaded turns, and
//! the per-user history.

use crate::{
    error::ApiError,
    web::{
        chat_task::{self, FileTurn, TextTurn},
        multipart_error, parse_json,
        protocol::{parse_user_id, ChatMessageRequest, ChatMessageView, ChatTurnResponse},
        state::AppState,
    },
};
use axum::{
    extract::{
        multipart::{Field, MultipartRejection},
        rejection::{JsonRejection, PathRejection},
        Multipart, Path, State,
    },
    Json,
};
use bytes::Bytes;
use legal_assistant_core::{constants::normalize_language, domain::MessageKind};
use std::sync::Arc;
use tracing::{error, info};

/// Reads a text field, mapping transport failures the same way as file parts.
async fn field_text(field: Field<'_>, limit: usize) -> Result<String, ApiError> {
    field.text().await.map_err(|e| multipart_error(e, limit))
}

async fn field_bytes(field: Field<'_>, limit: usize) -> Result<Bytes, ApiError> {
    field.bytes().await.map_err(|e| multipart_error(e, limit))
}

/// Send a typed message and receive the assistant's reply.
#[utoipa::path(
    post,
    path = "/api/chat/message",
    request_body = ChatMessageRequest,
    responses(
        (status = 200, description = "Reply generated and stored", body = ChatTurnResponse),
        (status = 400, description = "Empty or oversized message"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Chat"
)]
pub async fn send_message_handler(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<ChatMessageRequest>, JsonRejection>,
) -> Result<Json<ChatTurnResponse>, ApiError> {
    let request = parse_json(payload, app_state.config.max_upload_bytes)?;

    // The endpoint always records typed turns; an unknown messageType is ignored.
    let message_kind = request
        .message_type
        .as_deref()
        .and_then(|t| t.parse::<MessageKind>().ok())
        .filter(|kind| *kind != MessageKind::File)
        .unwrap_or(MessageKind::Text);

    let turn = TextTurn {
        message: request.message.unwrap_or_default(),
        language: normalize_language(request.language.as_deref()),
        user_id: request.user_id,
        message_kind,
        document_text: request.file_content,
    };

    chat_task::text_turn(&app_state, turn)
        .await
        .map(Json)
        .inspect_err(|e| error!("Chat message failed: {}", e))
}

/// Send a recorded voice message. The audio is transcribed, then answered.
#[utoipa::path(
    post,
    path = "/api/chat/voice",
    request_body(content_type = "multipart/form-data", description = "Fields: `audio` (file), `language`, `userId`."),
    responses(
        (status = 200, description = "Transcribed, answered and stored", body = ChatTurnResponse),
        (status = 400, description = "No audio, or nothing could be transcribed"),
        (status = 413, description = "Upload exceeds the size limit"),
        (status = 500, description = "Failed to process voice message")
    ),
    tag = "Chat"
)]
pub async fn send_voice_handler(
    State(app_state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ChatTurnResponse>, ApiError> {
    let limit = app_state.config.max_upload_bytes;
    let mut multipart = multipart.map_err(|e| ApiError::Validation(e.body_text()))?;

    let mut audio: Option<Bytes> = None;
    let mut language: Option<String> = None;
    let mut user_id: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "audio" => audio = Some(field_bytes(field, limit).await?),
            "language" => language = Some(field_text(field, limit).await?),
            "userId" => user_id = Some(field_text(field, limit).await?),
            _ => {}
        }
    }

    let audio = audio
        .filter(|a| !a.is_empty())
        .ok_or_else(|| ApiError::Validation("Audio file is required".to_string()))?;
    info!(bytes = audio.len(), "Received voice message");

    chat_task::voice_turn(
        &app_state,
        &audio,
        normalize_language(language.as_deref()),
        parse_user_id(user_id.as_deref()),
    )
    .await
    .map(Json)
    .inspect_err(|e| error!("Voice message failed: {}", e))
}

/// Upload a document for legal analysis, optionally with a question.
#[utoipa::path(
    post,
    path = "/api/chat/file",
    request_body(content_type = "multipart/form-data", description = "Fields: `file`, `message`, `language`, `userId`."),
    responses(
        (status = 200, description = "Document analyzed and stored", body = ChatTurnResponse),
        (status = 400, description = "No file uploaded"),
        (status = 413, description = "Upload exceeds the size limit"),
        (status = 500, description = "Failed to process file")
    ),
    tag = "Chat"
)]
pub async fn send_file_handler(
    State(app_state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ChatTurnResponse>, ApiError> {
    let limit = app_state.config.max_upload_bytes;
    let mut multipart = multipart.map_err(|e| ApiError::Validation(e.body_text()))?;

    let mut file: Option<(String, Bytes)> = None;
    let mut message: Option<String> = None;
    let mut language: Option<String> = None;
    let mut user_id: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("untitled.txt").to_string();
                file = Some((file_name, field_bytes(field, limit).await?));
            }
            "message" => message = Some(field_text(field, limit).await?),
            "language" => language = Some(field_text(field, limit).await?),
            "userId" => user_id = Some(field_text(field, limit).await?),
            _ => {}
        }
    }

    let (file_name, data) =
        file.ok_or_else(|| ApiError::Validation("File is required".to_string()))?;
    info!(bytes = data.len(), "Received file '{}'", file_name);

    let turn = FileTurn {
        file_name,
        data: data.to_vec(),
        message,
        language: normalize_language(language.as_deref()),
        user_id: parse_user_id(user_id.as_deref()),
    };

    chat_task::file_turn(&app_state, turn)
        .await
        .map(Json)
        .inspect_err(|e| error!("File message failed: {}", e))
}

/// List a user's chat turns, oldest first.
#[utoipa::path(
    get,
    path = "/api/chat/history/{user_id}",
    params(("user_id" = i64, Path, description = "The user whose history to fetch.")),
    responses(
        (status = 200, description = "Chat history", body = [ChatMessageView]),
        (status = 400, description = "Malformed user id"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Chat"
)]
pub async fn chat_history_handler(
    State(app_state): State<Arc<AppState>>,
    user_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<ChatMessageView>>, ApiError> {
    let Path(user_id) =
        user_id.map_err(|_| ApiError::Validation("Invalid user id".to_string()))?;

    let history = app_state
        .db
        .get_chat_history(user_id)
        .await
        .map_err(|e| ApiError::external("Failed to fetch chat history", e))?;

    Ok(Json(history.into_iter().map(ChatMessageView::from).collect()))
}
