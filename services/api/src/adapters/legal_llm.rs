//! services/api/src/adapters/legal_llm.rs
//!
//! This module contains the adapter for the legal-assistance chat LLM.
//! It implements the `LegalResponseService` port from the `core` crate.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use legal_assistant_core::{
    constants::language_display_name,
    domain::ChatRequest,
    ports::{LegalResponseService, PortError, PortResult},
};
use tracing::info;

/// Returned as a successful reply when the model sends back no text.
pub const EMPTY_COMPLETION_REPLY: &str =
    "I apologize, but I couldn't generate a response. Please try rephrasing your question.";

const SYSTEM_PROMPT_TEMPLATE: &str = r#"You are an AI legal assistant specialized in Indian law. You provide accurate, helpful legal guidance while always emphasizing that this is general information and not a substitute for professional legal advice.

Key guidelines:
- Focus on Indian legal system, constitution, and statutes
- Provide practical, actionable advice when possible
- Always include appropriate disclaimers about seeking professional legal counsel
- Be empathetic and understanding of legal concerns
- If asked about specific cases, refer to relevant Indian legal precedents
- Respond in {language} language
- Keep responses clear, professional, and accessible to non-lawyers
- If handling file content, analyze it in the legal context and provide relevant insights"#;

const DOCUMENT_QUESTION_TEMPLATE: &str = r#"I have uploaded a document for legal review. Please analyze this document and provide legal insights:

Document content: {document}

User question: {question}"#;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `LegalResponseService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiLegalAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiLegalAdapter {
    pub const MAX_TOKENS: u32 = 1000;
    pub const TEMPERATURE: f32 = 0.7;

    /// Creates a new `OpenAiLegalAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }

    /// The fixed instruction: Indian-law framing, target language, disclaimer.
    pub fn system_prompt(language: &str) -> String {
        SYSTEM_PROMPT_TEMPLATE.replace("{language}", &language_display_name(language))
    }

    /// The single user turn. Document text, when present, wraps the question.
    pub fn user_content(request: &ChatRequest) -> String {
        match &request.document_text {
            Some(document) if !document.trim().is_empty() => DOCUMENT_QUESTION_TEMPLATE
                .replace("{document}", document)
                .replace("{question}", &request.message),
            _ => request.message.clone(),
        }
    }
}

//=========================================================================================
// `LegalResponseService` Trait Implementation
//=========================================================================================

#[async_trait]
impl LegalResponseService for OpenAiLegalAdapter {
    /// Sends one history-free completion request and returns its text.
    async fn generate_response(&self, request: &ChatRequest) -> PortResult<String> {
        info!(
            kind = %request.message_kind,
            language = %request.language,
            "Requesting legal response from model {}", self.model
        );

        let messages = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(Self::system_prompt(&request.language))
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(Self::user_content(request))
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
        ];

        let completion_request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .max_tokens(Self::MAX_TOKENS)
            .temperature(Self::TEMPERATURE)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        // Call the API and manually map the error, which respects the orphan rule.
        let response = self
            .client
            .chat()
            .create(completion_request)
            .await
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        let choice = response.choices.into_iter().next().ok_or_else(|| {
            PortError::Unexpected("Legal LLM returned no choices in its response.".to_string())
        })?;

        Ok(choice
            .message
            .content
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| EMPTY_COMPLETION_REPLY.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use legal_assistant_core::domain::MessageKind;

    fn request(message: &str, document_text: Option<&str>) -> ChatRequest {
        ChatRequest {
            message: message.to_string(),
            language: "english".to_string(),
            message_kind: MessageKind::Text,
            document_text: document_text.map(str::to_string),
        }
    }

    #[test]
    fn system_prompt_names_the_language() {
        let prompt = OpenAiLegalAdapter::system_prompt("hindi");
        assert!(prompt.contains("Respond in Hindi language"));
        assert!(prompt.contains("Indian legal system"));
        assert!(prompt.contains("disclaimers"));
    }

    #[test]
    fn plain_message_is_sent_verbatim() {
        let content = OpenAiLegalAdapter::user_content(&request("What is GST?", None));
        assert_eq!(content, "What is GST?");
    }

    #[test]
    fn document_text_wraps_the_question() {
        let content = OpenAiLegalAdapter::user_content(&request(
            "Is this lease fair?",
            Some("The tenant shall pay..."),
        ));
        assert!(content.starts_with("I have uploaded a document for legal review."));
        assert!(content.contains("Document content: The tenant shall pay..."));
        assert!(content.ends_with("User question: Is this lease fair?"));
    }
}
