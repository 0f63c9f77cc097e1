//! Flow error taxonomy
//!
//! Distinguishes failures the collaborator reported (with a message meant
//! for the user) from failures of the plumbing around it.

/// Flow invocation failures
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    /// The collaborator rejected the request with a human-readable message
    #[error("flow rejected: {message}")]
    Remote {
        /// Message suitable for surfacing verbatim
        message: String,
    },

    /// The backend answered with a failure status and no usable message
    #[error("flow returned status {status}")]
    Status {
        /// HTTP status of the response
        status: reqwest::StatusCode,
    },

    /// The request never produced a response
    #[error("transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response arrived but could not be decoded
    #[error("malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

impl FlowError {
    /// Create a remote rejection
    #[inline]
    #[must_use]
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            message: message.into(),
        }
    }

    /// The collaborator-reported message, when one exists
    ///
    /// Status, transport, and decode failures carry technical causes rather
    /// than messages meant for the user; those return `None`.
    #[inline]
    #[must_use]
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            Self::Remote { message } => Some(message),
            Self::Status { .. } | Self::Transport(_) | Self::MalformedResponse(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_failure_carries_its_message() {
        let err = FlowError::remote("quota exceeded");

        assert_eq!(err.remote_message(), Some("quota exceeded"));
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[test]
    fn plumbing_failures_have_no_user_message() {
        let decode = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = FlowError::MalformedResponse(decode);
        assert_eq!(err.remote_message(), None);

        let err = FlowError::Status {
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
        };
        assert_eq!(err.remote_message(), None);
    }
}
