//! ImaginAIry Canvas artifact system
//!
//! Generated images, their provenance, and local materialization.
//!
//! # Core Concepts
//!
//! - [`ImageArtifact`]: the single work product of a generation round
//! - [`ImageLocator`]: remote URL vs inline `data:` payload classification
//! - [`suggested_file_name`]: download naming derived from the prompt
//! - [`ImageExporter`]: writes inline payloads into a download directory
//!
//! # Example
//!
//! ```rust,ignore
//! use canvas_artifact::{ImageArtifact, ImageExporter};
//!
//! let artifact = ImageArtifact::new("data:image/png;base64,...", "a red fox");
//! let exporter = ImageExporter::new("downloads");
//!
//! let path = exporter.export(&artifact)?;
//! println!("Saved to {}", path.display());
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod artifact;
mod export;
mod filename;
mod locator;

// Re-exports
pub use artifact::ImageArtifact;
pub use export::{ExportError, ImageExporter};
pub use filename::{suggested_file_name, FALLBACK_BASE, FILE_EXTENSION, MAX_BASE_LEN};
pub use locator::{ImageLocator, InlineImage, LocatorError};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
