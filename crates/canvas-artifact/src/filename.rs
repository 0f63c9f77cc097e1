//! Download file naming
//!
//! Derives a filesystem-friendly name for an exported image from the prompt
//! that produced it.

/// Longest derived base name, before the extension
pub const MAX_BASE_LEN: usize = 30;

/// Base name used when the prompt yields nothing usable
pub const FALLBACK_BASE: &str = "generated-image";

/// Extension appended to every exported image
pub const FILE_EXTENSION: &str = "png";

/// Derive the suggested download name for a prompt
///
/// Lower-cases the prompt, collapses whitespace runs to single hyphens, and
/// caps the base at [`MAX_BASE_LEN`] characters. Path separators are dropped
/// and leading dots stripped, so the name always stays inside the directory
/// it is joined onto. A prompt that yields nothing usable falls back to
/// [`FALLBACK_BASE`]. The `.png` extension is always appended.
#[must_use]
pub fn suggested_file_name(prompt: &str) -> String {
    let collapsed = prompt
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();
    let sanitized: String = collapsed
        .chars()
        .filter(|c| !matches!(c, '/' | '\\'))
        .collect();
    let base: String = sanitized
        .trim_start_matches('.')
        .chars()
        .take(MAX_BASE_LEN)
        .collect();

    if base.is_empty() {
        format!("{FALLBACK_BASE}.{FILE_EXTENSION}")
    } else {
        format!("{base}.{FILE_EXTENSION}")
    }
}
