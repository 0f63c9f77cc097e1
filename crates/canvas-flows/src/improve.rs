//! Prompt improvement flow
//!
//! The remote operation that rewrites a prompt into a richer one.

use crate::error::FlowError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Input for prompt improvement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestPromptImprovementsInput {
    /// Prompt text, exactly as the user supplied it
    pub prompt: String,
}

impl SuggestPromptImprovementsInput {
    /// Create new input
    #[inline]
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

/// Output of prompt improvement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestPromptImprovementsOutput {
    /// The rewritten prompt
    pub improved_prompt: String,
}

/// The prompt improvement collaborator
///
/// Same invocation and failure contract as
/// [`ImageGeneration`](crate::ImageGeneration).
#[async_trait]
pub trait PromptImprovement: Send + Sync {
    /// Suggest an improved version of the prompt
    ///
    /// # Errors
    /// [`FlowError::Remote`] carries a human-readable message suitable for
    /// surfacing verbatim; other variants do not.
    async fn suggest_prompt_improvements(
        &self,
        input: SuggestPromptImprovementsInput,
    ) -> Result<SuggestPromptImprovementsOutput, FlowError>;
}
