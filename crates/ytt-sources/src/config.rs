//! API credential handling.
//!
//! The key is an explicit value injected into [`crate::DataApiClient`] at
//! construction rather than read ad hoc from process-wide state, so the
//! pipeline stays testable with fake credentials.

use crate::error::SourceError;

/// YouTube Data API key.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    /// Environment variable the binaries read the key from.
    pub const ENV_VAR: &'static str = "YOUTUBE_API_KEY";

    /// Read the key from the environment. A missing or blank value is a
    /// fatal configuration error, surfaced before any network call.
    pub fn from_env() -> Result<Self, SourceError> {
        match std::env::var(Self::ENV_VAR) {
            Ok(key) if !key.trim().is_empty() => Ok(Self(key.trim().to_string())),
            _ => Err(SourceError::MissingApiKey),
        }
    }

    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keep the key out of debug logs.
impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}
