//! crates/chat_client/src/interface.rs
//!
//! The chat interface state machine.
//!
//! A submission moves `Idle -> Sending -> AwaitingResponse -> Idle`. The user's
//! bubble is appended optimistically when sending starts and stays in the
//! transcript even if the request fails; a failure only adds an error
//! notification. Voice capture runs its own `Idle -> Listening -> Idle` machine
//! and feeds a finished transcript into the same submission path. Hosts without
//! on-device recognition upload the recording and let the server transcribe it.

use crate::{
    error::ClientError,
    speech::{SpeechRecognizer, VoiceCapture, VoiceState},
    transport::{ChatReply, ChatTransport, FileUpload, OutgoingMessage},
    upload::validate_file,
};
use legal_assistant_core::{
    constants::{normalize_language, speech_locale, MAX_HISTORY_ITEMS, MAX_MESSAGE_LENGTH},
    domain::MessageKind,
};
use std::collections::VecDeque;
use tracing::{info, warn};

const SEND_FAILED: &str = "Failed to send message. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Sending,
    AwaitingResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
}

/// One bubble in the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    /// Server id for assistant bubbles; a negative local id for optimistic user bubbles.
    pub id: i64,
    pub speaker: Speaker,
    pub text: String,
    pub language: String,
    pub message_kind: MessageKind,
    /// The server stored its fallback apology instead of a model reply.
    pub degraded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Error,
}

/// A toast shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    fn error(title: &str, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.to_string(),
            description: description.into(),
        }
    }

    fn info(title: &str, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            title: title.to_string(),
            description: description.into(),
        }
    }
}

pub struct ChatInterface<T, R> {
    transport: T,
    recognizer: R,
    voice: VoiceCapture,
    transcript: VecDeque<TranscriptEntry>,
    draft: String,
    language: String,
    phase: Phase,
    notifications: Vec<Notification>,
    user_id: Option<i64>,
    selected_file: Option<String>,
    next_local_id: i64,
}

impl<T: ChatTransport, R: SpeechRecognizer> ChatInterface<T, R> {
    pub fn new(transport: T, recognizer: R) -> Self {
        Self {
            transport,
            recognizer,
            voice: VoiceCapture::new(),
            transcript: VecDeque::new(),
            draft: String::new(),
            language: normalize_language(None),
            phase: Phase::Idle,
            notifications: Vec::new(),
            user_id: None,
            selected_file: None,
            next_local_id: -1,
        }
    }

    //=====================================================================================
    // State Accessors
    //=====================================================================================

    pub fn transcript(&self) -> &VecDeque<TranscriptEntry> {
        &self.transcript
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The typing indicator is shown while a reply is outstanding.
    pub fn is_typing(&self) -> bool {
        self.phase == Phase::AwaitingResponse
    }

    pub fn voice_state(&self) -> VoiceState {
        self.voice.state()
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user_id
    }

    pub fn selected_file(&self) -> Option<&str> {
        self.selected_file.as_deref()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    //=====================================================================================
    // Inputs
    //=====================================================================================

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    pub fn set_language(&mut self, language: &str) {
        self.language = normalize_language(Some(language));
    }

    /// Attaches the id from a login or registration response to later requests.
    pub fn sign_in(&mut self, user_id: i64) {
        self.user_id = Some(user_id);
    }

    pub fn sign_out(&mut self) {
        self.user_id = None;
    }

    fn push(&mut self, entry: TranscriptEntry) {
        self.transcript.push_back(entry);
        while self.transcript.len() > MAX_HISTORY_ITEMS {
            self.transcript.pop_front();
        }
    }

    //=====================================================================================
    // Submission State Machine
    //=====================================================================================

    /// Leaves `Idle`: appends the user's bubble, clears the draft and returns the
    /// request to send. Returns `None` (and changes nothing) for blank text or
    /// while another submission is in flight.
    pub fn begin_submission(&mut self, text: &str, kind: MessageKind) -> Option<OutgoingMessage> {
        let text = text.trim();
        if text.is_empty() || self.phase != Phase::Idle {
            return None;
        }
        if text.chars().count() > MAX_MESSAGE_LENGTH {
            self.notifications.push(Notification::error(
                "Message Too Long",
                format!("Messages are limited to {} characters.", MAX_MESSAGE_LENGTH),
            ));
            return None;
        }

        let id = self.next_local_id;
        self.next_local_id -= 1;
        self.push(TranscriptEntry {
            id,
            speaker: Speaker::User,
            text: text.to_string(),
            language: self.language.clone(),
            message_kind: kind,
            degraded: false,
        });
        self.draft.clear();
        self.phase = Phase::Sending;

        Some(OutgoingMessage {
            message: text.to_string(),
            language: self.language.clone(),
            message_type: kind.as_str().to_string(),
            user_id: self.user_id,
        })
    }

    /// Returns to `Idle`, appending the reply or an error notification.
    pub fn finish_submission(&mut self, result: Result<ChatReply, ClientError>) {
        match result {
            Ok(reply) => {
                let kind = reply.message_type.parse().unwrap_or(MessageKind::Text);
                self.push(TranscriptEntry {
                    id: reply.id,
                    speaker: Speaker::Assistant,
                    degraded: reply.is_degraded(),
                    text: reply.response.unwrap_or_default(),
                    language: reply.language,
                    message_kind: kind,
                });
            }
            Err(e) => {
                warn!("Chat submission failed: {}", e);
                self.notifications.push(Notification::error("Error", SEND_FAILED));
            }
        }
        self.phase = Phase::Idle;
    }

    /// Runs one full submission. Returns whether a request was sent.
    pub async fn submit(&mut self, text: &str, kind: MessageKind) -> bool {
        let Some(request) = self.begin_submission(text, kind) else {
            return false;
        };
        self.phase = Phase::AwaitingResponse;
        let result = self.transport.send_message(&request).await;
        self.finish_submission(result);
        true
    }

    /// Sends the current draft as a typed message.
    pub async fn send(&mut self) -> bool {
        let draft = self.draft.clone();
        self.submit(&draft, MessageKind::Text).await
    }

    /// Starts listening, or stops and submits whatever was heard.
    pub async fn toggle_voice(&mut self) {
        if !self.recognizer.is_supported() {
            self.notifications.push(Notification::error(
                "Speech Recognition Error",
                "Speech recognition is not supported in this browser",
            ));
            return;
        }

        let locale = speech_locale(&self.language);
        match self.voice.toggle(&mut self.recognizer, locale) {
            Ok(Some(transcript)) => {
                info!("Submitting voice transcript");
                self.submit(&transcript, MessageKind::Voice).await;
            }
            Ok(None) => {}
            Err(e) => {
                self.notifications
                    .push(Notification::error("Speech Recognition Error", e.to_string()));
            }
        }
    }

    /// Whether voice can be captured on-device. When it cannot, the host records
    /// audio itself and hands it to [`ChatInterface::submit_recording`].
    pub fn has_on_device_speech(&self) -> bool {
        self.recognizer.is_supported()
    }

    /// Sends recorded audio for server-side transcription. The user's bubble
    /// carries the text the server heard, so it is appended only once the reply
    /// arrives.
    pub async fn submit_recording(&mut self, audio: Vec<u8>) -> bool {
        if audio.is_empty() || self.phase != Phase::Idle {
            return false;
        }
        self.phase = Phase::AwaitingResponse;
        let language = self.language.clone();

        match self.transport.send_voice(audio, &language, self.user_id).await {
            Ok(reply) => {
                let heard = reply
                    .transcribed_text
                    .clone()
                    .unwrap_or_else(|| reply.message.clone());
                let id = self.next_local_id;
                self.next_local_id -= 1;
                self.push(TranscriptEntry {
                    id,
                    speaker: Speaker::User,
                    text: heard,
                    language: language.clone(),
                    message_kind: MessageKind::Voice,
                    degraded: false,
                });
                self.push(TranscriptEntry {
                    id: reply.id,
                    speaker: Speaker::Assistant,
                    degraded: reply.is_degraded(),
                    text: reply.response.unwrap_or_default(),
                    language: reply.language,
                    message_kind: MessageKind::Voice,
                });
            }
            Err(e) => {
                warn!("Voice recording failed: {}", e);
                let description = match e {
                    ClientError::Api { message, .. } => message,
                    other => other.to_string(),
                };
                self.notifications
                    .push(Notification::error("Voice Message Failed", description));
            }
        }

        self.phase = Phase::Idle;
        true
    }

    /// Validates and uploads a document. A rejected file leaves the transcript
    /// untouched and only raises a notification.
    pub async fn attach_file(&mut self, file_name: &str, data: Vec<u8>) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        if let Err(reason) = validate_file(file_name, data.len()) {
            self.notifications.push(Notification::error("File Error", reason));
            return false;
        }

        let message = match self.draft.trim() {
            "" => format!("Analyzing uploaded file: {}", file_name),
            note => note.to_string(),
        };
        let upload = FileUpload {
            file_name: file_name.to_string(),
            data,
            message,
            language: self.language.clone(),
            user_id: self.user_id,
        };
        self.selected_file = Some(file_name.to_string());
        self.draft.clear();
        self.phase = Phase::AwaitingResponse;

        match self.transport.upload_file(&upload).await {
            Ok(reply) => {
                if let Some(response) = reply.response {
                    self.push(TranscriptEntry {
                        id: reply.id,
                        speaker: Speaker::Assistant,
                        text: response,
                        language: reply.language,
                        message_kind: MessageKind::File,
                        degraded: false,
                    });
                }
                self.notifications.push(Notification::info(
                    "Upload Successful",
                    "Your file has been uploaded and processed.",
                ));
            }
            Err(e) => {
                let description = match e {
                    ClientError::Api { message, .. } => message,
                    other => other.to_string(),
                };
                self.notifications
                    .push(Notification::error("Upload Failed", description));
            }
        }

        self.selected_file = None;
        self.phase = Phase::Idle;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientResult;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct FakeTransport {
        failing: bool,
        sent: Arc<Mutex<Vec<OutgoingMessage>>>,
        uploads: Arc<Mutex<Vec<FileUpload>>>,
        recordings: Arc<Mutex<Vec<(Vec<u8>, String, Option<i64>)>>>,
    }

    impl FakeTransport {
        fn failing() -> Self {
            Self {
                failing: true,
                ..Self::default()
            }
        }

        fn reply(id: i64, message: &str, kind: &str, language: &str) -> ChatReply {
            ChatReply {
                id,
                message: message.to_string(),
                response: Some(format!("Answer: {}", message)),
                language: language.to_string(),
                message_type: kind.to_string(),
                response_type: Some("text".to_string()),
                transcribed_text: None,
                file_name: None,
                created_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl ChatTransport for FakeTransport {
        async fn send_message(&self, message: &OutgoingMessage) -> ClientResult<ChatReply> {
            let mut sent = self.sent.lock().unwrap();
            sent.push(message.clone());
            if self.failing {
                return Err(ClientError::Api {
                    status: 500,
                    message: "Internal server error".to_string(),
                });
            }
            Ok(Self::reply(
                sent.len() as i64,
                &message.message,
                &message.message_type,
                &message.language,
            ))
        }

        async fn upload_file(&self, upload: &FileUpload) -> ClientResult<ChatReply> {
            self.uploads.lock().unwrap().push(upload.clone());
            if self.failing {
                return Err(ClientError::Api {
                    status: 500,
                    message: "Failed to process file".to_string(),
                });
            }
            Ok(Self::reply(9, &upload.message, "file", &upload.language))
        }

        async fn send_voice(
            &self,
            audio: Vec<u8>,
            language: &str,
            user_id: Option<i64>,
        ) -> ClientResult<ChatReply> {
            self.recordings
                .lock()
                .unwrap()
                .push((audio, language.to_string(), user_id));
            if self.failing {
                return Err(ClientError::Api {
                    status: 400,
                    message: "Could not transcribe audio".to_string(),
                });
            }
            let mut reply = Self::reply(11, "Can my landlord evict me?", "voice", language);
            reply.transcribed_text = Some("Can my landlord evict me?".to_string());
            Ok(reply)
        }
    }

    /// Hears `phrase` as soon as it starts listening.
    #[derive(Default)]
    struct FakeRecognizer {
        unsupported: bool,
        phrase: String,
        transcript: String,
        locales: Vec<String>,
    }

    impl FakeRecognizer {
        fn hearing(phrase: &str) -> Self {
            Self {
                phrase: phrase.to_string(),
                ..Self::default()
            }
        }
    }

    impl SpeechRecognizer for FakeRecognizer {
        fn is_supported(&self) -> bool {
            !self.unsupported
        }

        fn start(&mut self, locale: &str) -> ClientResult<()> {
            self.locales.push(locale.to_string());
            self.transcript = self.phrase.clone();
            Ok(())
        }

        fn stop(&mut self) {}

        fn transcript(&self) -> String {
            self.transcript.clone()
        }

        fn reset(&mut self) {
            self.transcript.clear();
        }
    }

    fn interface(transport: FakeTransport) -> ChatInterface<FakeTransport, FakeRecognizer> {
        ChatInterface::new(transport, FakeRecognizer::default())
    }

    #[tokio::test]
    async fn successful_send_appends_both_bubbles_and_returns_to_idle() {
        let transport = FakeTransport::default();
        let mut chat = interface(transport.clone());
        chat.sign_in(42);
        chat.set_draft("What is a caveat petition?");

        assert!(chat.send().await);

        assert_eq!(chat.phase(), Phase::Idle);
        assert_eq!(chat.draft(), "");
        let speakers: Vec<Speaker> = chat.transcript().iter().map(|e| e.speaker).collect();
        assert_eq!(speakers, vec![Speaker::User, Speaker::Assistant]);
        assert_eq!(chat.transcript()[1].text, "Answer: What is a caveat petition?");
        assert!(chat.notifications().is_empty());

        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent[0].user_id, Some(42));
        assert_eq!(sent[0].message_type, "text");
    }

    #[tokio::test]
    async fn failed_send_keeps_user_bubble_and_notifies() {
        let mut chat = interface(FakeTransport::failing());
        chat.set_draft("Is my FIR valid?");

        assert!(chat.send().await);

        assert_eq!(chat.phase(), Phase::Idle);
        assert_eq!(chat.transcript().len(), 1);
        assert_eq!(chat.transcript()[0].speaker, Speaker::User);
        let notes = chat.take_notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].kind, NotificationKind::Error);
        assert_eq!(notes[0].description, SEND_FAILED);
    }

    #[tokio::test]
    async fn blank_drafts_are_not_sent() {
        let transport = FakeTransport::default();
        let mut chat = interface(transport.clone());
        chat.set_draft("   ");

        assert!(!chat.send().await);
        assert!(chat.transcript().is_empty());
        assert!(transport.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn submissions_are_exclusive_while_one_is_in_flight() {
        let mut chat = interface(FakeTransport::default());
        assert!(chat.begin_submission("first", MessageKind::Text).is_some());
        assert_eq!(chat.phase(), Phase::Sending);
        assert!(chat.begin_submission("second", MessageKind::Text).is_none());
        assert_eq!(chat.transcript().len(), 1);

        chat.finish_submission(Err(ClientError::Validation("offline".to_string())));
        assert_eq!(chat.phase(), Phase::Idle);
        assert!(chat.begin_submission("second", MessageKind::Text).is_some());
    }

    #[test]
    fn oversized_messages_are_refused_locally() {
        let mut chat = interface(FakeTransport::default());
        let long = "a".repeat(MAX_MESSAGE_LENGTH + 1);
        assert!(chat.begin_submission(&long, MessageKind::Text).is_none());
        assert!(chat.transcript().is_empty());
        assert_eq!(chat.notifications().len(), 1);
    }

    #[test]
    fn transcript_is_capped() {
        let mut chat = interface(FakeTransport::default());
        for i in 0..(MAX_HISTORY_ITEMS + 10) {
            chat.begin_submission(&format!("message {}", i), MessageKind::Text);
            chat.finish_submission(Err(ClientError::Validation("offline".to_string())));
        }
        assert_eq!(chat.transcript().len(), MAX_HISTORY_ITEMS);
        assert_eq!(chat.transcript()[0].text, "message 10");
    }

    #[tokio::test]
    async fn voice_toggle_listens_then_submits_the_transcript() {
        let transport = FakeTransport::default();
        let mut chat = ChatInterface::new(
            transport.clone(),
            FakeRecognizer::hearing("दहेज कानून क्या है"),
        );
        chat.set_language("hindi");

        chat.toggle_voice().await;
        assert_eq!(chat.voice_state(), VoiceState::Listening);
        assert!(transport.sent.lock().unwrap().is_empty());

        chat.toggle_voice().await;
        assert_eq!(chat.voice_state(), VoiceState::Idle);

        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].message, "दहेज कानून क्या है");
        assert_eq!(sent[0].message_type, "voice");
        assert_eq!(sent[0].language, "hindi");
        assert_eq!(chat.recognizer.locales, vec!["hi-IN".to_string()]);
    }

    #[tokio::test]
    async fn silent_voice_capture_sends_nothing() {
        let transport = FakeTransport::default();
        let mut chat = ChatInterface::new(transport.clone(), FakeRecognizer::hearing("  "));

        chat.toggle_voice().await;
        chat.toggle_voice().await;

        assert_eq!(chat.voice_state(), VoiceState::Idle);
        assert!(transport.sent.lock().unwrap().is_empty());
        assert!(chat.transcript().is_empty());
    }

    #[tokio::test]
    async fn unsupported_recognizer_only_notifies() {
        let recognizer = FakeRecognizer {
            unsupported: true,
            ..FakeRecognizer::default()
        };
        let mut chat = ChatInterface::new(FakeTransport::default(), recognizer);

        chat.toggle_voice().await;

        assert_eq!(chat.voice_state(), VoiceState::Idle);
        assert_eq!(chat.notifications()[0].title, "Speech Recognition Error");
    }

    #[tokio::test]
    async fn recording_is_transcribed_by_the_server_when_speech_is_unavailable() {
        let transport = FakeTransport::default();
        let recognizer = FakeRecognizer {
            unsupported: true,
            ..FakeRecognizer::default()
        };
        let mut chat = ChatInterface::new(transport.clone(), recognizer);
        chat.sign_in(5);
        chat.set_language("tamil");
        assert!(!chat.has_on_device_speech());

        assert!(chat.submit_recording(b"OggS\0\x02".to_vec()).await);

        assert_eq!(chat.phase(), Phase::Idle);
        let entries: Vec<(Speaker, &str, MessageKind)> = chat
            .transcript()
            .iter()
            .map(|e| (e.speaker, e.text.as_str(), e.message_kind))
            .collect();
        assert_eq!(
            entries,
            vec![
                (Speaker::User, "Can my landlord evict me?", MessageKind::Voice),
                (Speaker::Assistant, "Answer: Can my landlord evict me?", MessageKind::Voice),
            ]
        );
        let recordings = transport.recordings.lock().unwrap();
        assert_eq!(recordings[0].1, "tamil");
        assert_eq!(recordings[0].2, Some(5));
    }

    #[tokio::test]
    async fn failed_recording_reports_the_server_message() {
        let transport = FakeTransport::failing();
        let mut chat = interface(transport.clone());

        assert!(!chat.submit_recording(Vec::new()).await);
        assert!(transport.recordings.lock().unwrap().is_empty());

        assert!(chat.submit_recording(vec![0x1A, 0x45, 0xDF, 0xA3]).await);
        assert!(chat.transcript().is_empty());
        assert_eq!(chat.phase(), Phase::Idle);
        let notes = chat.notifications();
        assert_eq!(notes[0].title, "Voice Message Failed");
        assert_eq!(notes[0].description, "Could not transcribe audio");
    }

    #[tokio::test]
    async fn rejected_file_never_reaches_the_transport() {
        let transport = FakeTransport::default();
        let mut chat = interface(transport.clone());

        assert!(!chat.attach_file("scan.jpg", vec![1, 2, 3]).await);

        assert!(transport.uploads.lock().unwrap().is_empty());
        assert!(chat.transcript().is_empty());
        assert_eq!(chat.notifications()[0].title, "File Error");
    }

    #[tokio::test]
    async fn accepted_file_is_uploaded_with_the_draft_as_question() {
        let transport = FakeTransport::default();
        let mut chat = interface(transport.clone());
        chat.sign_in(7);
        chat.set_draft("Is clause 4 enforceable?");

        assert!(chat.attach_file("lease.pdf", b"%PDF-1.4".to_vec()).await);

        let uploads = transport.uploads.lock().unwrap();
        assert_eq!(uploads[0].message, "Is clause 4 enforceable?");
        assert_eq!(uploads[0].user_id, Some(7));
        assert_eq!(chat.draft(), "");
        assert_eq!(chat.selected_file(), None);
        assert_eq!(chat.transcript().len(), 1);
        assert_eq!(chat.transcript()[0].message_kind, MessageKind::File);
        assert_eq!(chat.notifications()[0].kind, NotificationKind::Info);
    }

    #[tokio::test]
    async fn file_without_draft_gets_a_placeholder_and_failures_are_reported() {
        let transport = FakeTransport::failing();
        let mut chat = interface(transport.clone());

        chat.attach_file("deed.txt", b"Sale deed".to_vec()).await;

        assert_eq!(
            transport.uploads.lock().unwrap()[0].message,
            "Analyzing uploaded file: deed.txt"
        );
        assert!(chat.transcript().is_empty());
        assert_eq!(chat.phase(), Phase::Idle);
        let notes = chat.notifications();
        assert_eq!(notes[0].title, "Upload Failed");
        assert_eq!(notes[0].description, "Failed to process file");
    }
}
