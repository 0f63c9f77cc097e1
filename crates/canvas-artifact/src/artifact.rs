//! Image artifacts and their provenance
//!
//! Defines [`ImageArtifact`], the single work product of a generation round:
//! an image locator plus the prompt that produced it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A generated image and its provenance
///
/// # Invariants
/// - `source_prompt` is the prompt at the moment generation was requested,
///   not whatever the session's prompt reads later
/// - Immutable after construction; a newer generation replaces the whole value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageArtifact {
    /// Image locator: remote URL or inline `data:` payload
    uri: String,
    /// Prompt that produced this image
    source_prompt: String,
    /// Creation timestamp
    created_at: DateTime<Utc>,
}

impl ImageArtifact {
    /// Create artifact, capturing provenance at request time
    #[inline]
    #[must_use]
    pub fn new(uri: impl Into<String>, source_prompt: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            source_prompt: source_prompt.into(),
            created_at: Utc::now(),
        }
    }

    /// Get the image locator
    #[inline]
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Get the originating prompt
    #[inline]
    #[must_use]
    pub fn source_prompt(&self) -> &str {
        &self.source_prompt
    }

    /// Get the creation timestamp
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
