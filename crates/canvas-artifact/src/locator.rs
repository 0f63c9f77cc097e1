//! Locator classification for artifact URIs
//!
//! An artifact URI is either an opaque remote locator (dereferenced by the
//! embedding UI or backend, never by this crate) or an inline `data:` payload
//! that can be decoded locally.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

/// Parsed artifact locator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageLocator {
    /// Embedded payload: `data:<media-type>;base64,<payload>`
    Inline(InlineImage),
    /// Opaque remote locator (anything that is not a `data:` URI)
    Remote(String),
}

/// Decoded inline image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    /// Media type, e.g. `image/png`
    pub media_type: String,
    /// Raw image bytes
    pub bytes: Vec<u8>,
}

/// Locator decode failures
#[derive(Debug, thiserror::Error)]
pub enum LocatorError {
    /// `data:` URI without the `;base64,` marker
    #[error("unsupported data uri encoding (expected base64)")]
    UnsupportedEncoding,

    /// Payload is not valid base64
    #[error("invalid base64 payload: {0}")]
    InvalidPayload(#[from] base64::DecodeError),
}

impl ImageLocator {
    /// Classify a URI, decoding inline payloads
    ///
    /// # Errors
    /// Returns [`LocatorError`] for a `data:` URI whose payload cannot be
    /// decoded. Non-`data:` URIs always classify as [`ImageLocator::Remote`].
    pub fn parse(uri: &str) -> Result<Self, LocatorError> {
        let Some(rest) = uri.strip_prefix("data:") else {
            return Ok(Self::Remote(uri.to_string()));
        };

        let Some((media_type, payload)) = rest.split_once(";base64,") else {
            return Err(LocatorError::UnsupportedEncoding);
        };

        let bytes = BASE64.decode(payload.trim())?;
        Ok(Self::Inline(InlineImage {
            media_type: media_type.to_string(),
            bytes,
        }))
    }

    /// Whether this locator can be materialized without a remote call
    #[inline]
    #[must_use]
    pub fn is_inline(&self) -> bool {
        matches!(self, Self::Inline(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_uri_classifies_as_remote() {
        let locator = ImageLocator::parse("http://x/1.png").unwrap();

        assert!(!locator.is_inline());
        assert_eq!(locator, ImageLocator::Remote("http://x/1.png".to_string()));
    }

    #[test]
    fn data_uri_decodes_inline_payload() {
        let encoded = BASE64.encode(b"not really a png");
        let uri = format!("data:image/png;base64,{encoded}");

        let locator = ImageLocator::parse(&uri).unwrap();
        match locator {
            ImageLocator::Inline(image) => {
                assert_eq!(image.media_type, "image/png");
                assert_eq!(image.bytes, b"not really a png");
            }
            ImageLocator::Remote(uri) => panic!("expected inline payload, got {uri}"),
        }
    }

    #[test]
    fn data_uri_without_base64_marker_is_rejected() {
        let result = ImageLocator::parse("data:text/plain,hello");
        assert!(matches!(result, Err(LocatorError::UnsupportedEncoding)));
    }

    #[test]
    fn garbage_payload_is_rejected() {
        let result = ImageLocator::parse("data:image/png;base64,@@not-base64@@");
        assert!(matches!(result, Err(LocatorError::InvalidPayload(_))));
    }
}
