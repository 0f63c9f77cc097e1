//! Materializing artifacts as local files

use crate::artifact::ImageArtifact;
use crate::filename::suggested_file_name;
use crate::locator::{ImageLocator, LocatorError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Export failures
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// URI points at a remote resource; materializing would require a fetch
    #[error("artifact uri is remote, cannot export without fetching: {uri}")]
    RemoteLocator { uri: String },

    /// Inline payload could not be decoded
    #[error("artifact uri is not a usable image payload: {0}")]
    Locator(#[from] LocatorError),

    /// Filesystem failure
    #[error("failed to write image file: {0}")]
    Io(#[from] io::Error),
}

/// Writes artifacts into a configured directory
///
/// Export is synchronous and side-effect-only: it never mutates the artifact
/// and performs no remote call. Only inline payloads can be written; remote
/// locators are rejected rather than fetched.
#[derive(Debug, Clone)]
pub struct ImageExporter {
    out_dir: PathBuf,
}

impl ImageExporter {
    /// Create exporter rooted at `out_dir`
    #[inline]
    #[must_use]
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Get the configured output directory
    #[inline]
    #[must_use]
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Write the artifact's image to disk, returning the file path
    ///
    /// The file name derives from the artifact's source prompt. The output
    /// directory is created on first use.
    ///
    /// # Errors
    /// - [`ExportError::RemoteLocator`] for non-inline URIs
    /// - [`ExportError::Locator`] for undecodable inline payloads
    /// - [`ExportError::Io`] for filesystem failures
    pub fn export(&self, artifact: &ImageArtifact) -> Result<PathBuf, ExportError> {
        let image = match ImageLocator::parse(artifact.uri())? {
            ImageLocator::Inline(image) => image,
            ImageLocator::Remote(uri) => return Err(ExportError::RemoteLocator { uri }),
        };

        fs::create_dir_all(&self.out_dir)?;

        let path = self
            .out_dir
            .join(suggested_file_name(artifact.source_prompt()));
        fs::write(&path, &image.bytes)?;
        tracing::debug!(path = %path.display(), bytes = image.bytes.len(), "exported image");

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine as _;

    fn inline_artifact(prompt: &str, bytes: &[u8]) -> ImageArtifact {
        let uri = format!("data:image/png;base64,{}", BASE64.encode(bytes));
        ImageArtifact::new(uri, prompt)
    }

    #[test]
    fn exports_inline_payload_under_derived_name() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = ImageExporter::new(dir.path());
        let artifact = inline_artifact("A Cat In A Hat", b"pretend png bytes");

        let path = exporter.export(&artifact).unwrap();

        assert_eq!(path, dir.path().join("a-cat-in-a-hat.png"));
        assert_eq!(fs::read(&path).unwrap(), b"pretend png bytes");
    }

    #[test]
    fn creates_missing_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("deep").join("downloads");
        let exporter = ImageExporter::new(&nested);

        let path = exporter
            .export(&inline_artifact("a fox", b"bytes"))
            .unwrap();

        assert!(path.starts_with(&nested));
        assert!(path.exists());
    }

    #[test]
    fn traversal_prompt_stays_inside_the_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("downloads");
        let exporter = ImageExporter::new(&out);

        let path = exporter
            .export(&inline_artifact("../escaped", b"bytes"))
            .unwrap();

        assert_eq!(path, out.join("escaped.png"));
        assert!(path.exists());
        assert!(!dir.path().join("escaped.png").exists());
    }

    #[test]
    fn remote_locator_is_rejected_without_side_effects() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("never-created");
        let exporter = ImageExporter::new(&out);
        let artifact = ImageArtifact::new("http://x/1.png", "a fox");

        let result = exporter.export(&artifact);

        assert!(matches!(result, Err(ExportError::RemoteLocator { .. })));
        assert!(!out.exists());
    }

    #[test]
    fn undecodable_payload_is_a_locator_error() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = ImageExporter::new(dir.path());
        let artifact = ImageArtifact::new("data:image/png;base64,@@@", "a fox");

        let result = exporter.export(&artifact);
        assert!(matches!(result, Err(ExportError::Locator(_))));
    }
}
