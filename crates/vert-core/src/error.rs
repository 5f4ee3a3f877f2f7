//! Error types for the core crate.

use thiserror::Error;

/// Maximum length for key display in error messages.
const MAX_KEY_DISPLAY_LEN: usize = 64;

/// Errors that can occur in the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An encoding or decoding error occurred.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// A storage key did not have the expected shape.
    #[error("invalid key {key}: {reason}")]
    InvalidKey {
        /// The offending key, lossily rendered and truncated for display.
        key: String,
        /// Why the key was rejected.
        reason: String,
    },
}

impl CoreError {
    /// Creates an invalid key error for a raw storage key.
    ///
    /// The key is rendered lossily as UTF-8 and truncated to 64 characters.
    #[must_use]
    pub fn invalid_key(key: &[u8], reason: impl Into<String>) -> Self {
        let rendered = String::from_utf8_lossy(key);
        let key = if rendered.chars().count() > MAX_KEY_DISPLAY_LEN {
            let truncated: String = rendered.chars().take(MAX_KEY_DISPLAY_LEN).collect();
            format!("{truncated}...")
        } else {
            rendered.into_owned()
        };
        Self::InvalidKey { key, reason: reason.into() }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encoding(err.to_string())
    }
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
