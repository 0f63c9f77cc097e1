//! # Canvas Flows
//!
//! Remote flow contracts for ImaginAIry Canvas: the two async operations a
//! session can invoke, the transport that carries them, and the notices a
//! session raises around them.
//!
//! ## Core Concepts
//!
//! - **Flow traits**: [`ImageGeneration`] and [`PromptImprovement`], the
//!   async collaborators a session is built over
//! - **Transport**: [`FlowClient`], a JSON-over-HTTP implementation of both
//!   traits against a flow server
//! - **Canned flows**: [`CannedFlows`], offline stand-ins for demos and tests
//! - **Notices**: [`Notice`] and [`Notifier`], the user-facing message sink
//!
//! ## Example
//!
//! ```rust,ignore
//! use canvas_flows::{FlowClient, GenerateImageInput, ImageGeneration};
//!
//! let client = FlowClient::new("http://localhost:8085")
//!     .with_bearer_token("secret");
//! let output = client
//!     .generate_image(GenerateImageInput::new("a red fox at dawn"))
//!     .await?;
//! println!("image at {}", output.image_url);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod canned;
mod error;
mod generate;
mod http;
mod improve;
mod notify;

pub use canned::{CannedFlows, IMPROVEMENT_SUFFIX, PLACEHOLDER_IMAGE_URI};
pub use error::FlowError;
pub use generate::{GenerateImageInput, GenerateImageOutput, ImageGeneration};
pub use http::{FlowClient, GENERATE_ROUTE, IMPROVE_ROUTE};
pub use improve::{
    PromptImprovement, SuggestPromptImprovementsInput, SuggestPromptImprovementsOutput,
};
pub use notify::{LogNotifier, Notice, NoticeKind, Notifier};

/// Version of the canvas-flows crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
