//! Error types for Canvas Core
//!
//! Provides error handling for:
//! - Prompt validation failures
//! - Busy-session rejections
//! - Remote flow failures
//! - Download failures

use crate::guard::OperationState;
use canvas_artifact::ExportError;
use canvas_flows::FlowError;

/// Main session error type
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Prompt failed validation
    #[error("invalid prompt: {0}")]
    Validation(String),

    /// Another operation is already running
    #[error("operation already in flight: {active:?}")]
    Busy {
        /// What the session was doing when the attempt was refused
        active: OperationState,
    },

    /// A remote flow failed
    #[error("{message}")]
    Remote {
        /// Message surfaced to the user
        message: String,
        /// The underlying flow failure
        #[source]
        source: FlowError,
    },

    /// No artifact available to download
    #[error("no image to download")]
    NoArtifact,

    /// Writing the download failed
    #[error("export failed: {0}")]
    Export(#[from] ExportError),
}

impl SessionError {
    /// Message recorded in session error state, if this failure has one
    ///
    /// Validation and remote failures carry user-facing text; busy
    /// rejections and download failures do not touch error state.
    #[inline]
    #[must_use]
    pub fn surfaced_message(&self) -> Option<&str> {
        match self {
            Self::Validation(message) | Self::Remote { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Check if this is a busy rejection
    #[inline]
    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy { .. })
    }
}
