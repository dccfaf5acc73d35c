//! crates/chat_client/src/error.rs

/// Everything that can go wrong on the client side of a chat turn.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status and a `{"message"}` body.
    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    /// Input rejected before any network call.
    #[error("{0}")]
    Validation(String),

    #[error("Speech recognition error: {0}")]
    Speech(String),
}

pub type ClientResult<T> = Result<T, ClientError>;
