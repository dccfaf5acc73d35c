//! crates/chat_client/src/speech.rs
//!
//! Voice capture over a host-provided speech recognizer.

use crate::error::ClientResult;

/// The on-device recognition capability. The transcript updates while
/// listening and holds the final text once stopped.
pub trait SpeechRecognizer: Send {
    fn is_supported(&self) -> bool;

    fn start(&mut self, locale: &str) -> ClientResult<()>;

    fn stop(&mut self);

    fn transcript(&self) -> String;

    fn reset(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VoiceState {
    #[default]
    Idle,
    Listening,
}

/// `Idle -> Listening -> Idle`. Stopping with a non-empty transcript yields the
/// text to submit as a voice turn.
#[derive(Debug, Default)]
pub struct VoiceCapture {
    state: VoiceState,
}

impl VoiceCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    pub fn toggle(
        &mut self,
        recognizer: &mut dyn SpeechRecognizer,
        locale: &str,
    ) -> ClientResult<Option<String>> {
        match self.state {
            VoiceState::Idle => {
                recognizer.reset();
                recognizer.start(locale)?;
                self.state = VoiceState::Listening;
                Ok(None)
            }
            VoiceState::Listening => {
                recognizer.stop();
                self.state = VoiceState::Idle;
                let transcript = recognizer.transcript().trim().to_string();
                recognizer.reset();
                Ok(Some(transcript).filter(|t| !t.is_empty()))
            }
        }
    }
}
