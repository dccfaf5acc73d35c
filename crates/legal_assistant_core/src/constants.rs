//! crates/legal_assistant_core/src/constants.rs
//!
//! Limits, filter sentinels and the language table shared by the API service
//! and the chat client.

/// Language code used when a request omits one.
pub const DEFAULT_LANGUAGE: &str = "english";

/// Specialization filter value meaning "no filter".
pub const ALL_AREAS: &str = "All Areas";

/// Experience filter value meaning "no filter".
pub const ANY_EXPERIENCE: &str = "Any Experience";

pub const EXPERIENCE_RANGES: [&str; 4] = [ANY_EXPERIENCE, "0-5 years", "5-10 years", "10+ years"];

/// Upload limit enforced by the server body limit and by client-side validation.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Extensions the chat client accepts for document upload.
pub const SUPPORTED_FILE_EXTENSIONS: [&str; 5] = [".pdf", ".doc", ".docx", ".txt", ".rtf"];

pub const MAX_MESSAGE_LENGTH: usize = 5000;

/// Transcript entries kept by the chat client.
pub const MAX_HISTORY_ITEMS: usize = 100;

/// A supported response language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
    pub native_name: &'static str,
}

pub const LANGUAGES: [Language; 22] = [
    Language { code: "english", name: "English", native_name: "English" },
    Language { code: "hindi", name: "Hindi", native_name: "हिंदी" },
    Language { code: "bengali", name: "Bengali", native_name: "বাংলা" },
    Language { code: "tamil", name: "Tamil", native_name: "தமிழ்" },
    Language { code: "telugu", name: "Telugu", native_name: "తెలుగు" },
    Language { code: "gujarati", name: "Gujarati", native_name: "ગુજરાતી" },
    Language { code: "kannada", name: "Kannada", native_name: "ಕನ್ನಡ" },
    Language { code: "malayalam", name: "Malayalam", native_name: "മലയാളം" },
    Language { code: "punjabi", name: "Punjabi", native_name: "ਪੰਜਾਬੀ" },
    Language { code: "marathi", name: "Marathi", native_name: "मराठी" },
    Language { code: "odia", name: "Odia", native_name: "ଓଡ଼ିଆ" },
    Language { code: "assamese", name: "Assamese", native_name: "অসমীয়া" },
    Language { code: "urdu", name: "Urdu", native_name: "اردو" },
    Language { code: "sanskrit", name: "Sanskrit", native_name: "संस्कृत" },
    Language { code: "nepali", name: "Nepali", native_name: "नेपाली" },
    Language { code: "manipuri", name: "Manipuri", native_name: "মৈতৈলোন্" },
    Language { code: "bodo", name: "Bodo", native_name: "बोडो" },
    Language { code: "santhali", name: "Santhali", native_name: "संथाली" },
    Language { code: "maithili", name: "Maithili", native_name: "मैथिली" },
    Language { code: "dogri", name: "Dogri", native_name: "डोगरी" },
    Language { code: "kashmiri", name: "Kashmiri", native_name: "کٲشُر" },
    Language { code: "konkani", name: "Konkani", native_name: "कोंकणी" },
];

/// Looks up a language by code, ignoring case.
pub fn find_language(code: &str) -> Option<&'static Language> {
    LANGUAGES.iter().find(|l| l.code.eq_ignore_ascii_case(code.trim()))
}

/// The English name used in model instructions. Unknown codes pass through as-is.
pub fn language_display_name(code: &str) -> String {
    find_language(code)
        .map(|l| l.name.to_string())
        .unwrap_or_else(|| code.to_string())
}

/// Locale handed to on-device speech recognition.
pub fn speech_locale(code: &str) -> &'static str {
    if code.trim().eq_ignore_ascii_case(DEFAULT_LANGUAGE) {
        "en-IN"
    } else {
        "hi-IN"
    }
}

/// Normalizes an optional language field: absent or blank means English.
pub fn normalize_language(code: Option<&str>) -> String {
    match code.map(str::trim) {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => DEFAULT_LANGUAGE.to_string(),
    }
}
