//! crates/legal_assistant_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any storage backend or serialization format.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

use crate::constants::{ALL_AREAS, EXPERIENCE_RANGES};

/// A registered account. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub preferred_language: String,
    pub created_at: DateTime<Utc>,
}

// Only used internally for login/signup - contains sensitive data
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Insert shape for a user. `password_hash` is an Argon2 PHC string, never plaintext.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub preferred_language: String,
    pub password_hash: String,
}

/// A directory entry. `rating` is stored in tenths of a star (48 = 4.8).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lawyer {
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

#[derive(Debug, Clone)]
pub struct NewLawyer {
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
}

/// The modality of a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MessageKind {
    #[default]
    Text,
    Voice,
    File,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Text => "text",
            MessageKind::Voice => "voice",
            MessageKind::File => "file",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(MessageKind::Text),
            "voice" => Ok(MessageKind::Voice),
            "file" => Ok(MessageKind::File),
            other => Err(format!("unknown message type '{}'", other)),
        }
    }
}

/// Whether an assistant reply came from the model or is the degraded fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseKind {
    #[default]
    Text,
    Error,
}

impl ResponseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseKind::Text => "text",
            ResponseKind::Error => "error",
        }
    }
}

/// One persisted chat turn: the user's message and at most one assistant response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: i64,
    pub user_id: Option<i64>,
    pub message: String,
    pub response: Option<String>,
    pub language: String,
    pub message_kind: MessageKind,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewChatMessage {
    pub user_id: Option<i64>,
    pub message: String,
    pub response: Option<String>,
    pub language: String,
    pub message_kind: MessageKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogPost {
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

/// Insert shape for a blog post. Seed data supplies its own publish date;
/// `None` means "now".
#[derive(Debug, Clone)]
pub struct NewBlogPost {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    pub author_role: String,
    pub category: String,
    pub featured: bool,
    pub published_at: Option<DateTime<Utc>>,
}

/// Write-only record from the contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

//=========================================================================================
// Lawyer Directory Search
//=========================================================================================

/// The three experience buckets offered by the directory search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceRange {
    /// `experience <= 5`
    UpToFive,
    /// `5 < experience <= 10`
    FiveToTen,
    /// `experience > 10`
    OverTen,
}

impl ExperienceRange {
    pub const ALL: [ExperienceRange; 3] = [
        ExperienceRange::UpToFive,
        ExperienceRange::FiveToTen,
        ExperienceRange::OverTen,
    ];

    /// The filter label shown in the directory search. `EXPERIENCE_RANGES`
    /// lists the sentinel first, then the buckets in `ALL` order.
    pub fn label(&self) -> &'static str {
        match self {
            ExperienceRange::UpToFive => EXPERIENCE_RANGES[1],
            ExperienceRange::FiveToTen => EXPERIENCE_RANGES[2],
            ExperienceRange::OverTen => EXPERIENCE_RANGES[3],
        }
    }

    /// Parses a filter label. The "Any Experience" sentinel and unknown labels
    /// both mean "no filter".
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|range| range.label() == label)
    }

    pub fn contains(&self, years: u32) -> bool {
        match self {
            ExperienceRange::UpToFive => years <= 5,
            ExperienceRange::FiveToTen => years > 5 && years <= 10,
            ExperienceRange::OverTen => years > 10,
        }
    }
}

/// Normalized directory filters. Every `None` field is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LawyerSearch {
    pub location: Option<String>,
    pub specialization: Option<String>,
    pub experience: Option<ExperienceRange>,
}

impl LawyerSearch {
    /// Builds a search from raw query values, dropping empty strings and sentinels.
    pub fn from_filters(
        location: Option<&str>,
        specialization: Option<&str>,
        experience: Option<&str>,
    ) -> Self {
        let non_empty = |v: Option<&str>| {
            v.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        Self {
            location: non_empty(location),
            specialization: non_empty(specialization).filter(|s| s != ALL_AREAS),
            experience: experience.and_then(ExperienceRange::parse),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.location.is_none() && self.specialization.is_none() && self.experience.is_none()
    }

    /// Case-insensitive substring match on location and specialization plus the
    /// experience bucket.
    pub fn matches(&self, lawyer: &Lawyer) -> bool {
        if let Some(location) = &self.location {
            if !lawyer
                .location
                .to_lowercase()
                .contains(&location.to_lowercase())
            {
                return false;
            }
        }
        if let Some(specialization) = &self.specialization {
            if !lawyer
                .specialization
                .to_lowercase()
                .contains(&specialization.to_lowercase())
            {
                return false;
            }
        }
        match self.experience {
            Some(range) => range.contains(lawyer.experience),
            None => true,
        }
    }
}

//=========================================================================================
// AI Generation Input
//=========================================================================================

/// A normalized request for the AI Response Generator.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub message: String,
    pub language: String,
    pub message_kind: MessageKind,
    /// Pre-extracted document text, folded into the user turn by the generator.
    pub document_text: Option<String>,
}
