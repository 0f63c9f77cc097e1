//! Image generation flow
//!
//! The remote operation that turns a prompt into an image locator.

use crate::error::FlowError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Input for image generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageInput {
    /// Prompt text, exactly as the user supplied it
    pub prompt: String,
}

impl GenerateImageInput {
    /// Create new input
    #[inline]
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

/// Output of image generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageOutput {
    /// Image locator: remote URL or inline `data:` payload
    pub image_url: String,
}

/// The image generation collaborator
///
/// Asynchronous and one-shot: the session invokes it at most once at a time
/// and waits for resolution. Implementations may be remote or in-process.
#[async_trait]
pub trait ImageGeneration: Send + Sync {
    /// Generate an image for the prompt
    ///
    /// # Errors
    /// [`FlowError::Remote`] carries a human-readable message suitable for
    /// surfacing verbatim; other variants do not.
    async fn generate_image(
        &self,
        input: GenerateImageInput,
    ) -> Result<GenerateImageOutput, FlowError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_camel_case() {
        let output = GenerateImageOutput {
            image_url: "http://x/1.png".to_string(),
        };
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["imageUrl"], "http://x/1.png");

        let input: GenerateImageInput =
            serde_json::from_str(r#"{"prompt": "a red fox"}"#).unwrap();
        assert_eq!(input.prompt, "a red fox");
    }
}
