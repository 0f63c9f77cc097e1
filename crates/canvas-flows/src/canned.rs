//! Canned flow collaborators
//!
//! Offline stand-ins for the remote flows. Generation always yields the
//! same tiny inline image; improvement appends a fixed suffix.

use crate::error::FlowError;
use crate::generate::{GenerateImageInput, GenerateImageOutput, ImageGeneration};
use crate::improve::{
    PromptImprovement, SuggestPromptImprovementsInput, SuggestPromptImprovementsOutput,
};
use async_trait::async_trait;

/// A 1x1 transparent PNG, inline as a data URI
pub const PLACEHOLDER_IMAGE_URI: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8BQDwAEhQGAhKmMIQAAAABJRU5ErkJggg==";

/// Suffix the canned improver appends to every prompt
pub const IMPROVEMENT_SUFFIX: &str = "ultra detailed, cinematic lighting, 8k";

/// Flow collaborators that never leave the process
#[derive(Debug, Clone, Default)]
pub struct CannedFlows;

impl CannedFlows {
    /// Create canned flows
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ImageGeneration for CannedFlows {
    async fn generate_image(
        &self,
        input: GenerateImageInput,
    ) -> Result<GenerateImageOutput, FlowError> {
        tracing::debug!(prompt = %input.prompt, "serving canned image");
        Ok(GenerateImageOutput {
            image_url: PLACEHOLDER_IMAGE_URI.to_string(),
        })
    }
}

#[async_trait]
impl PromptImprovement for CannedFlows {
    async fn suggest_prompt_improvements(
        &self,
        input: SuggestPromptImprovementsInput,
    ) -> Result<SuggestPromptImprovementsOutput, FlowError> {
        Ok(SuggestPromptImprovementsOutput {
            improved_prompt: format!("{}, {IMPROVEMENT_SUFFIX}", input.prompt.trim()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn canned_generate_yields_inline_uri() {
        let flows = CannedFlows::new();
        let output = flows
            .generate_image(GenerateImageInput::new("a red fox"))
            .await
            .unwrap();
        assert!(output.image_url.starts_with("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn canned_improve_appends_suffix() {
        let flows = CannedFlows::new();
        let output = flows
            .suggest_prompt_improvements(SuggestPromptImprovementsInput::new("  a red fox  "))
            .await
            .unwrap();
        assert_eq!(
            output.improved_prompt,
            "a red fox, ultra detailed, cinematic lighting, 8k"
        );
    }
}
