//! crates/legal_assistant_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific implementations like the in-memory store or the
//! model provider.

use async_trait::async_trait;

use crate::domain::{
    BlogPost, ChatMessage, ChatRequest, ContactMessage, Lawyer, LawyerSearch, NewBlogPost,
    NewChatMessage, NewContactMessage, NewLawyer, NewUser, User, UserCredentials,
};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., storage, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    /// A unique key (email, username, slug) is already taken.
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
    #[error("Unauthorized")]
    Unauthorized,
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Owns every entity record. Writes assign the next sequential id per entity kind;
/// nothing is ever updated or deleted.
#[async_trait]
pub trait DatabaseService: Send + Sync {
    // --- Users ---
    async fn get_user(&self, id: i64) -> PortResult<User>;

    async fn get_user_by_email(&self, email: &str) -> PortResult<User>;

    async fn get_user_by_username(&self, username: &str) -> PortResult<User>;

    /// Fails with `Conflict` if the email or username is already registered.
    async fn create_user(&self, user: NewUser) -> PortResult<User>;

    async fn get_user_credentials(&self, email: &str) -> PortResult<UserCredentials>;

    // --- Lawyers ---
    async fn list_lawyers(&self) -> PortResult<Vec<Lawyer>>;

    async fn get_lawyer(&self, id: i64) -> PortResult<Lawyer>;

    async fn search_lawyers(&self, search: &LawyerSearch) -> PortResult<Vec<Lawyer>>;

    /// Fails with `Conflict` if the email is already listed.
    async fn create_lawyer(&self, lawyer: NewLawyer) -> PortResult<Lawyer>;

    // --- Chat ---
    /// All turns for a user, oldest first.
    async fn get_chat_history(&self, user_id: i64) -> PortResult<Vec<ChatMessage>>;

    async fn create_chat_message(&self, message: NewChatMessage) -> PortResult<ChatMessage>;

    // --- Blog ---
    /// All posts, newest first.
    async fn list_blog_posts(&self) -> PortResult<Vec<BlogPost>>;

    /// Featured posts only, newest first.
    async fn list_featured_blog_posts(&self) -> PortResult<Vec<BlogPost>>;

    async fn get_blog_post(&self, slug: &str) -> PortResult<BlogPost>;

    async fn create_blog_post(&self, post: NewBlogPost) -> PortResult<BlogPost>;

    // --- Contact ---
    async fn create_contact_message(
        &self,
        message: NewContactMessage,
    ) -> PortResult<ContactMessage>;
}

#[async_trait]
pub trait LegalResponseService: Send + Sync {
    /// Produces assistant text for a single, history-free user turn.
    async fn generate_response(&self, request: &ChatRequest) -> PortResult<String>;
}

#[async_trait]
pub trait SpeechToTextService: Send + Sync {
    /// Transcribes a complete audio buffer into text.
    async fn transcribe_audio(&self, audio_data: &[u8]) -> PortResult<String>;
}

#[async_trait]
pub trait DocumentAnalysisService: Send + Sync {
    /// Analyzes document text; `document_type` is a label such as the file name.
    async fn analyze_document(&self, document_text: &str, document_type: &str)
        -> PortResult<String>;
}

#[async_trait]
pub trait TextExtractionService: Send + Sync {
    /// Turns an uploaded file into plain text.
    async fn extract_text(&self, file_name: &str, data: &[u8]) -> PortResult<String>;
}
