//! Canvas Core - Prompt-to-image session
//!
//! The session layer that:
//! - Owns the prompt, artifact, and error state
//! - Guards generation and improvement so only one runs at a time
//! - Reconciles flow outcomes into state and user notices
//! - Writes finished images to disk for download
//!
//! # Example
//!
//! ```rust,ignore
//! use canvas_core::{CanvasSession, SessionConfig};
//! use canvas_flows::CannedFlows;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let flows = Arc::new(CannedFlows::new());
//! let session = CanvasSession::with_log_notifier(SessionConfig::new(), flows.clone(), flows);
//!
//! session.set_prompt("a red fox at dawn");
//! let artifact = session.generate("a red fox at dawn").await?;
//! println!("image at {}", artifact.uri());
//!
//! let path = session.download()?;
//! println!("saved {}", path.display());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod error;
pub mod guard;
pub mod session;
pub mod tuning;
pub mod types;

// Re-exports for convenience
pub use error::SessionError;
pub use guard::{OperationGuard, OperationKind, OperationPermit, OperationState};
pub use session::CanvasSession;
pub use tuning::{
    BaseModel, DatasetSelection, FineTuningSettings, NoiseScheduler, SamplingMethod, TuningPanel,
};
pub use types::{SessionConfig, SessionId};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with Canvas Core
    pub use crate::{
        CanvasSession, OperationKind, OperationState, SessionConfig, SessionError, SessionId,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;
    use canvas_flows::CannedFlows;
    use std::sync::Arc;

    #[tokio::test]
    async fn canned_session_full_flow() {
        let dir = tempfile::tempdir().unwrap();
        let flows = Arc::new(CannedFlows::new());
        let session = CanvasSession::with_log_notifier(
            SessionConfig::new().with_download_dir(dir.path()),
            flows.clone(),
            flows,
        );

        let artifact = session.generate("A Cat In A Hat").await.unwrap();
        assert!(artifact.uri().starts_with("data:image/png;base64,"));

        let path = session.download().unwrap();
        assert!(path.ends_with("a-cat-in-a-hat.png"));
        assert!(path.exists());
    }

    #[test]
    fn prelude_covers_session_types() {
        use crate::prelude::*;

        let config = SessionConfig::new();
        assert_eq!(config.download_dir, std::path::PathBuf::from("downloads"));
        assert!(!OperationState::Idle.is_busy());
    }
}
