//! Filename sanitization.
//!
//! Rewrites filenames into a portable `[A-Za-z0-9_-]` alphabet while
//! keeping the extension. Accented characters survive as their base
//! letters (NFKD decomposition with combining marks dropped); every other
//! run of disallowed characters collapses to a single underscore.
//! Applying a name on disk resolves collisions with a numeric suffix
//! before renaming.

use std::fs;
use std::io;
use std::path::Path;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::config::FALLBACK_STEM;

/// Sanitize a filename, preserving the extension
///
/// `Café Song.mp3` becomes `Cafe_Song.mp3`. Idempotent: a sanitized name
/// passes through unchanged.
pub fn sanitize_filename(name: &str) -> String {
    let (stem, ext) = split_name(name);

    let mut folded = String::with_capacity(stem.len());
    for c in stem.nfkd() {
        if is_combining_mark(c) {
            continue;
        }
        if c.is_ascii_alphanumeric() || c == '-' {
            folded.push(c);
        } else if !folded.ends_with('_') {
            folded.push('_');
        }
    }

    let stem = folded.trim_matches('_');
    let stem = if stem.is_empty() { FALLBACK_STEM } else { stem };

    match ext {
        Some(ext) => format!("{}.{}", stem, ext),
        None => stem.to_string(),
    }
}

/// Sanitize `name` inside `dir`, renaming the file when the name changes
///
/// When the sanitized name is already taken, `stem_1.ext`, `stem_2.ext`,
/// ... are probed against the directory and the first free one wins.
/// Returns the name the file ends up with.
pub fn apply_sanitized(dir: &Path, name: &str) -> io::Result<String> {
    let sanitized = sanitize_filename(name);
    if sanitized == name {
        return Ok(sanitized);
    }

    let target = next_free_name(dir, &sanitized);
    fs::rename(dir.join(name), dir.join(&target))?;
    tracing::info!("Renamed {} -> {}", name, target);

    Ok(target)
}

/// First non-colliding variant of `wanted` inside `dir`
fn next_free_name(dir: &Path, wanted: &str) -> String {
    if !dir.join(wanted).exists() {
        return wanted.to_string();
    }

    let (stem, ext) = split_name(wanted);
    let mut counter = 1;
    loop {
        let candidate = match ext {
            Some(ext) => format!("{}_{}.{}", stem, counter, ext),
            None => format!("{}_{}", stem, counter),
        };
        if !dir.join(&candidate).exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Split a filename into stem and extension
fn split_name(name: &str) -> (&str, Option<&str>) {
    let path = Path::new(name);
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or(name);
    let ext = path.extension().and_then(|e| e.to_str());
    (stem, ext)
}
