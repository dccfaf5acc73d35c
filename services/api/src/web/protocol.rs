//! services/api/src/web/protocol.rs
//!
//! Defines the JSON payloads exchanged between the browser client and the API
//! server, plus the input checks each request must pass before it reaches a port.

use crate::error::ApiError;
use chrono::{DateTime, Utc};
use legal_assistant_core::domain::{BlogPost, ChatMessage, Lawyer, User};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::sync::OnceLock;
use utoipa::ToSchema;

//=========================================================================================
// Field Checks
//=========================================================================================

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

pub fn require_text(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

pub fn require_email(value: &str) -> Result<(), ApiError> {
    if !email_pattern().is_match(value.trim()) {
        return Err(ApiError::Validation(format!(
            "'{}' is not a valid email address",
            value
        )));
    }
    Ok(())
}

/// Accepts a JSON number or a numeric string; anything else is "no user".
pub fn parse_user_id(raw: Option<&str>) -> Option<i64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<i64>().ok())
}

fn lenient_user_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => parse_user_id(Some(&s)),
        _ => None,
    })
}

/// A `languages` value that is not a list of strings becomes an empty list.
fn lenient_languages<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

//=========================================================================================
// Requests
//=========================================================================================

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub preferred_language: Option<String>,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_text("username", &self.username)?;
        require_email(&self.email)?;
        require_text("firstName", &self.first_name)?;
        require_text("lastName", &self.last_name)?;
        require_text("password", &self.password)
    }
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /api/chat/message`. Every field is optional at the wire level
/// so a missing message becomes a 400 instead of a deserialization failure.
#[derive(Deserialize, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "lenient_user_id")]
    #[schema(value_type = Option<i64>)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub message_type: Option<String>,
    /// Pre-extracted document text to discuss alongside the message.
    #[serde(default)]
    pub file_content: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLawyerRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub specialization: String,
    pub location: String,
    pub experience: u32,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub review_count: Option<u32>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "lenient_languages")]
    pub languages: Vec<String>,
    #[serde(default)]
    pub verified: Option<bool>,
}

impl CreateLawyerRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_text("name", &self.name)?;
        require_email(&self.email)?;
        require_text("phone", &self.phone)?;
        require_text("specialization", &self.specialization)?;
        require_text("location", &self.location)?;
        if let Some(rating) = self.rating {
            if rating > 50 {
                return Err(ApiError::Validation(
                    "rating must be between 0 and 50".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Deserialize, Default)]
pub struct LawyerQuery {
    pub location: Option<String>,
    pub specialization: Option<String>,
    pub experience: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct BlogQuery {
    pub featured: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_text("name", &self.name)?;
        require_email(&self.email)?;
        require_text("subject", &self.subject)?;
        require_text("message", &self.message)
    }
}

//=========================================================================================
// Responses
//=========================================================================================

/// A user as the API exposes it. There is no password field to leak.
#[derive(Serialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub preferred_language: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            phone: user.phone,
            preferred_language: user.preferred_language,
            created_at: user.created_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct AuthResponse {
    pub user: UserView,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LawyerView {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub specialization: String,
    pub location: String,
    pub experience: u32,
    pub rating: u8,
    pub review_count: u32,
    pub bio: Option<String>,
    pub languages: Vec<String>,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Lawyer> for LawyerView {
    fn from(lawyer: Lawyer) -> Self {
        Self {
            id: lawyer.id,
            name: lawyer.name,
            email: lawyer.email,
            phone: lawyer.phone,
            specialization: lawyer.specialization,
            location: lawyer.location,
            experience: lawyer.experience,
            rating: lawyer.rating,
            review_count: lawyer.review_count,
            bio: lawyer.bio,
            languages: lawyer.languages,
            verified: lawyer.verified,
            created_at: lawyer.created_at,
        }
    }
}

/// A stored chat turn, as returned by the history endpoint.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageView {
    pub id: i64,
    pub user_id: Option<i64>,
    pub message: String,
    pub response: Option<String>,
    pub language: String,
    pub message_type: String,
    pub created_at: DateTime<Utc>,
}

impl From<ChatMessage> for ChatMessageView {
    fn from(message: ChatMessage) -> Self {
        Self {
            id: message.id,
            user_id: message.user_id,
            message: message.message,
            response: message.response,
            language: message.language,
            message_type: message.message_kind.as_str().to_string(),
            created_at: message.created_at,
        }
    }
}

/// The projection returned by the three chat submission endpoints.
#[derive(Serialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurnResponse {
    pub id: i64,
    /// Only present for voice submissions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcribed_text: Option<String>,
    pub message: String,
    pub response: Option<String>,
    pub language: String,
    pub message_type: String,
    /// `"text"` for a model reply, `"error"` for the degraded fallback reply.
    pub response_type: String,
    /// Only present for file submissions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostView {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    pub author_role: String,
    pub category: String,
    pub featured: bool,
    pub published_at: DateTime<Utc>,
}

impl From<BlogPost> for BlogPostView {
    fn from(post: BlogPost) -> Self {
        Self {
            id: post.id,
            title: post.title,
            slug: post.slug,
            excerpt: post.excerpt,
            content: post.content,
            author: post.author,
            author_role: post.author_role,
            category: post.category,
            featured: post.featured,
            published_at: post.published_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ContactResponse {
    pub message: String,
    pub id: i64,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
