//! Display titles derived from filenames.
//!
//! Titles are mechanical: the stem with separators turned into spaces,
//! symbols dropped, and sentence-style capitalization. No audio metadata
//! is consulted.

use std::path::Path;

/// Derive a display title from a filename
///
/// `Cafe_Song.mp3` becomes `Cafe song`, `track_1.mp3` becomes `Track 1`.
/// A stem with no letters or digits yields the empty string.
pub fn derive_title(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename);

    let spaced: String = stem
        .chars()
        .map(|c| if c == '_' || c == '-' { ' ' } else { c })
        .collect();
    let spaced = spaced.split_whitespace().collect::<Vec<_>>().join(" ");

    let kept: String = spaced
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();
    let kept = kept.split_whitespace().collect::<Vec<_>>().join(" ");

    let lowered = kept.to_lowercase();
    let mut chars = lowered.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
