//! crates/chat_client/src/lib.rs
//!
//! A headless chat client for the legal assistant API. It owns the transcript,
//! the draft, the submission state machine and voice capture, and talks to the
//! server through a `ChatTransport`.

pub mod error;
pub mod interface;
pub mod speech;
pub mod transport;
pub mod upload;

pub use error::ClientError;
pub use interface::{ChatInterface, Notification, NotificationKind, Phase, Speaker, TranscriptEntry};
pub use speech::{SpeechRecognizer, VoiceCapture, VoiceState};
pub use transport::{ChatReply, ChatTransport, FileUpload, HttpChatTransport, OutgoingMessage};
pub use upload::validate_file;
