//! HTTP transport for the remote flows
//!
//! Each flow is a JSON POST against a fixed route. Failure bodies carry a
//! single `error` field with the human-readable message.

use crate::error::FlowError;
use crate::generate::{GenerateImageInput, GenerateImageOutput, ImageGeneration};
use crate::improve::{
    PromptImprovement, SuggestPromptImprovementsInput, SuggestPromptImprovementsOutput,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Route for the image generation flow
pub const GENERATE_ROUTE: &str = "/flows/generate-image-from-text";
/// Route for the prompt improvement flow
pub const IMPROVE_ROUTE: &str = "/flows/suggest-prompt-improvements";

/// Failure body shape returned by the flow endpoints
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for the remote flows
///
/// Speaks JSON to a flow server. Both flow traits are implemented on a
/// single client so one value can serve a whole session.
#[derive(Debug, Clone)]
pub struct FlowClient {
    client: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl FlowClient {
    /// Create a client against the given base URL
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: trim_trailing_slash(base_url.into()),
            bearer_token: None,
        }
    }

    /// Attach a bearer token sent with every request
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Base URL this client posts against
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_flow<I, O>(&self, route: &str, input: &I) -> Result<O, FlowError>
    where
        I: Serialize + Sync,
        O: DeserializeOwned,
    {
        let url = format!("{}{route}", self.base_url);
        tracing::debug!(%url, "posting flow request");

        let mut request = self.client.post(&url).json(input);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(rejection_from_body(status, &body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ImageGeneration for FlowClient {
    async fn generate_image(
        &self,
        input: GenerateImageInput,
    ) -> Result<GenerateImageOutput, FlowError> {
        self.post_flow(GENERATE_ROUTE, &input).await
    }
}

#[async_trait]
impl PromptImprovement for FlowClient {
    async fn suggest_prompt_improvements(
        &self,
        input: SuggestPromptImprovementsInput,
    ) -> Result<SuggestPromptImprovementsOutput, FlowError> {
        self.post_flow(IMPROVE_ROUTE, &input).await
    }
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

/// Map a non-success response to a flow error
///
/// A parseable `{"error": ...}` body yields [`FlowError::Remote`] with the
/// server's message; anything else collapses to [`FlowError::Status`].
fn rejection_from_body(status: reqwest::StatusCode, body: &str) -> FlowError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(rejection) => {
            tracing::warn!(%status, message = %rejection.error, "flow rejected");
            FlowError::remote(rejection.error)
        }
        Err(_) => {
            tracing::warn!(%status, "flow failed without a message body");
            FlowError::Status { status }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn base_url_drops_trailing_slashes() {
        let client = FlowClient::new("http://localhost:8085/");
        assert_eq!(client.base_url(), "http://localhost:8085");

        let client = FlowClient::new("http://localhost:8085");
        assert_eq!(client.base_url(), "http://localhost:8085");
    }

    #[test]
    fn rejection_with_error_body_carries_message() {
        let err = rejection_from_body(
            reqwest::StatusCode::TOO_MANY_REQUESTS,
            r#"{"error": "quota exceeded"}"#,
        );
        assert_eq!(err.remote_message(), Some("quota exceeded"));
    }

    #[test]
    fn rejection_without_error_body_has_no_message() {
        let err = rejection_from_body(reqwest::StatusCode::BAD_GATEWAY, "<html>nope</html>");
        assert!(err.remote_message().is_none());
        assert!(matches!(err, FlowError::Status { .. }));
    }
}
