//! services/api/src/adapters/document_llm.rs
//!
//! This module contains the adapter for the document-analysis LLM.
//! It implements the `DocumentAnalysisService` port from the `core` crate.

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
use legal_assistant_core::ports::{DocumentAnalysisService, PortError, PortResult};
use tracing::info;

pub const EMPTY_ANALYSIS_REPLY: &str =
    "Unable to analyze the document. Please ensure the content is clear and try again.";

const ANALYSIS_INSTRUCTIONS: &str = r#"You are a legal document analysis expert specializing in Indian law. Analyze the provided document and provide insights on:
- Legal validity and compliance
- Key terms and conditions
- Potential risks or issues
- Recommendations for improvement
- Relevant Indian legal provisions that apply"#;

/// An adapter that implements `DocumentAnalysisService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiDocumentAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiDocumentAdapter {
    pub const MAX_TOKENS: u32 = 1500;
    pub const TEMPERATURE: f32 = 0.3;

    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }

    pub fn analysis_request(document_text: &str, document_type: &str) -> String {
        format!(
            "Please analyze this {} document:\n\n{}",
            document_type, document_text
        )
    }
}

#[async_trait]
impl DocumentAnalysisService for OpenAiDocumentAdapter {
    async fn analyze_document(
        &self,
        document_text: &str,
        document_type: &str,
    ) -> PortResult<String> {
        info!(
            chars = document_text.len(),
            "Requesting analysis of '{}' from model {}", document_type, self.model
        );

        let messages = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(ANALYSIS_INSTRUCTIONS)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(Self::analysis_request(document_text, document_type))
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .max_tokens(Self::MAX_TOKENS)
            .temperature(Self::TEMPERATURE)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        if let Some(choice) = response.choices.into_iter().next() {
            match choice.message.content {
                Some(content) if !content.trim().is_empty() => Ok(content),
                _ => Ok(EMPTY_ANALYSIS_REPLY.to_string()),
            }
        } else {
            Err(PortError::Unexpected(
                "Document analysis LLM returned no choices in its response.".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_names_the_document_type_before_the_text() {
        let request =
            OpenAiDocumentAdapter::analysis_request("Clause 4: rent is due monthly.", "pdf");
        assert_eq!(
            request,
            "Please analyze this pdf document:\n\nClause 4: rent is due monthly."
        );
    }

    #[test]
    fn instructions_cover_indian_provisions() {
        assert!(ANALYSIS_INSTRUCTIONS.contains("Indian law"));
        assert!(ANALYSIS_INSTRUCTIONS.contains("Relevant Indian legal provisions"));
    }
}
