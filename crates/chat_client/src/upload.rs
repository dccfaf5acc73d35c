//! crates/chat_client/src/upload.rs
//!
//! Client-side checks run on a selected file before any upload starts.

use legal_assistant_core::constants::{MAX_UPLOAD_BYTES, SUPPORTED_FILE_EXTENSIONS};
use std::path::Path;

/// Returns the notification text for a file the server should never see.
pub fn validate_file(file_name: &str, size: usize) -> Result<(), String> {
    if size > MAX_UPLOAD_BYTES {
        return Err(format!(
            "File size must be less than {}MB",
            MAX_UPLOAD_BYTES / (1024 * 1024)
        ));
    }

    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_ascii_lowercase()));
    match extension {
        Some(ext) if SUPPORTED_FILE_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(format!(
            "File type not supported. Accepted types: {}",
            SUPPORTED_FILE_EXTENSIONS.join(", ")
        )),
    }
}
