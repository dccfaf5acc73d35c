//! crates/chat_client/src/transport.rs
//!
//! The client's view of the chat endpoints: a `ChatTransport` trait so the
//! interface can be driven by a fake in tests, and a reqwest-backed
//! implementation for the real server.

use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{multipart, Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Body of `POST /api/chat/message`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingMessage {
    pub message: String,
    pub language: String,
    pub message_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

/// A document sent to `POST /api/chat/file`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub data: Vec<u8>,
    pub message: String,
    pub language: String,
    pub user_id: Option<i64>,
}

/// The stored chat turn returned by every chat endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub id: i64,
    pub message: String,
    pub response: Option<String>,
    pub language: String,
    pub message_type: String,
    #[serde(default)]
    pub response_type: Option<String>,
    #[serde(default)]
    pub transcribed_text: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ChatReply {
    /// True when the server stored its fallback apology instead of a model reply.
    pub fn is_degraded(&self) -> bool {
        self.response_type.as_deref() == Some("error")
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_message(&self, message: &OutgoingMessage) -> ClientResult<ChatReply>;

    async fn upload_file(&self, upload: &FileUpload) -> ClientResult<ChatReply>;

    /// Server-side transcription, for hosts without on-device speech recognition.
    async fn send_voice(
        &self,
        audio: Vec<u8>,
        language: &str,
        user_id: Option<i64>,
    ) -> ClientResult<ChatReply>;
}

pub struct HttpChatTransport {
    client: Client,
    base_url: String,
}

impl HttpChatTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decodes a reply, turning non-success statuses into `ClientError::Api`.
    async fn decode(response: Response) -> ClientResult<ChatReply> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }
        let body = response.bytes().await?;
        let rejection = Self::rejection(status, &body);
        if let ClientError::Api { status, message } = &rejection {
            warn!(status = *status, "Chat request rejected: {}", message);
        }
        Err(rejection)
    }

    /// The server reports failures as `{"message": ...}`. Any other body falls
    /// back to the status text.
    fn rejection(status: StatusCode, body: &[u8]) -> ClientError {
        let message = match serde_json::from_slice::<ErrorBody>(body) {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string(),
        };
        ClientError::Api {
            status: status.as_u16(),
            message,
        }
    }

    fn with_user(form: multipart::Form, user_id: Option<i64>) -> multipart::Form {
        match user_id {
            Some(id) => form.text("userId", id.to_string()),
            None => form,
        }
    }
}

#[async_trait]
impl ChatTransport for HttpChatTransport {
    async fn send_message(&self, message: &OutgoingMessage) -> ClientResult<ChatReply> {
        debug!(kind = %message.message_type, "POST /api/chat/message");
        let response = self
            .client
            .post(self.url("/api/chat/message"))
            .json(message)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn upload_file(&self, upload: &FileUpload) -> ClientResult<ChatReply> {
        debug!(bytes = upload.data.len(), "POST /api/chat/file");
        let part = multipart::Part::bytes(upload.data.clone()).file_name(upload.file_name.clone());
        let form = multipart::Form::new()
            .part("file", part)
            .text("message", upload.message.clone())
            .text("language", upload.language.clone());
        let response = self
            .client
            .post(self.url("/api/chat/file"))
            .multipart(Self::with_user(form, upload.user_id))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn send_voice(
        &self,
        audio: Vec<u8>,
        language: &str,
        user_id: Option<i64>,
    ) -> ClientResult<ChatReply> {
        debug!(bytes = audio.len(), "POST /api/chat/voice");
        let part = multipart::Part::bytes(audio).file_name("recording.wav");
        let form = multipart::Form::new()
            .part("audio", part)
            .text("language", language.to_string());
        let response = self
            .client
            .post(self.url("/api/chat/voice"))
            .multipart(Self::with_user(form, user_id))
            .send()
            .await?;
        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_bodies_become_api_errors_with_the_server_message() {
        let error = HttpChatTransport::rejection(
            StatusCode::INTERNAL_SERVER_ERROR,
            br#"{"message":"Failed to process file"}"#,
        );
        match error {
            ClientError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Failed to process file");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn unreadable_error_bodies_fall_back_to_the_status_text() {
        let error =
            HttpChatTransport::rejection(StatusCode::PAYLOAD_TOO_LARGE, b"<html>nope</html>");
        match error {
            ClientError::Api { status, message } => {
                assert_eq!(status, 413);
                assert_eq!(message, "Payload Too Large");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn outgoing_message_omits_anonymous_user() {
        let message = OutgoingMessage {
            message: "What is RERA?".to_string(),
            language: "english".to_string(),
            message_type: "text".to_string(),
            user_id: None,
        };
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({ "message": "What is RERA?", "language": "english", "messageType": "text" })
        );
    }

    #[test]
    fn degraded_replies_are_detected() {
        let reply: ChatReply = serde_json::from_value(json!({
            "id": 1,
            "message": "hi",
            "response": "I apologize",
            "language": "english",
            "messageType": "text",
            "responseType": "error",
            "createdAt": "2024-11-15T10:00:00Z"
        }))
        .unwrap();
        assert!(reply.is_degraded());
    }

    #[test]
    fn base_url_trailing_slash_is_ignored() {
        let transport = HttpChatTransport::new("http://localhost:5000/");
        assert_eq!(
            transport.url("/api/chat/message"),
            "http://localhost:5000/api/chat/message"
        );
    }
}
