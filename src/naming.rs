//! Centralized parsing of content-hashed asset filenames.
//!
//! Archive tooling writes system assets with a content-hash suffix for
//! cache busting: `added-icon-1a2b3c4d.svg`, `topic-5e6f70.css`. For a
//! plain static export the suffix is noise, so the copier can strip it and
//! produce `added-icon.svg`.
//!
//! A trailing dash-separated segment counts as a hash when it is at least
//! [`MIN_HASH_LEN`] characters of ASCII hex with at least one digit. The
//! digit requirement keeps ordinary words out: `curve-fade.svg` and
//! `dark-mode.css` pass through untouched even though "fade" and "de" are
//! valid hex.

/// Minimum length of a trailing segment before it is considered a hash.
const MIN_HASH_LEN: usize = 6;

/// Strip a content-hash suffix from an asset filename, if present.
///
/// Handles these patterns:
/// - `"added-icon-1a2b3c4d.svg"` → `"added-icon.svg"`
/// - `"documentation-topic-2e49a7.css"` → `"documentation-topic.css"`
/// - `"curve-fade.svg"` → unchanged (no digit in the tail segment)
/// - `"logo.png"` → unchanged (no dash)
/// - `"1a2b3c4d"` → unchanged (a bare hash has no name to keep)
pub fn strip_content_hash(file_name: &str) -> String {
    let (stem, ext) = match file_name.rsplit_once('.') {
        Some((stem, ext)) => (stem, Some(ext)),
        None => (file_name, None),
    };

    let stripped = match stem.rsplit_once('-') {
        Some((name, tail)) if !name.is_empty() && is_hash_segment(tail) => name,
        _ => stem,
    };

    match ext {
        Some(ext) => format!("{stripped}.{ext}"),
        None => stripped.to_string(),
    }
}

/// Whether a filename segment looks like a content hash.
fn is_hash_segment(segment: &str) -> bool {
    segment.len() >= MIN_HASH_LEN
        && segment.chars().all(|c| c.is_ascii_hexdigit())
        && segment.chars().any(|c| c.is_ascii_digit())
}
