//! Compile-time publishing configuration.
//!
//! The feed that consumes the catalog hard-codes where the audio files are
//! served from, so the base URL, the directory layout and the catalog name
//! are constants. Only the root directory is chosen at runtime (`--root`
//! flag or TRACKDEX_ROOT).

use std::path::{Path, PathBuf};

/// Base URL the published files are served from
pub const BASE_URL: &str = "https://github.com/trackdex/music-vault/raw/refs/heads/main";

/// Subdirectory of the root that holds the audio files
pub const MUSIC_DIR_NAME: &str = "musics";

/// Catalog file name, resolved against the root
pub const CATALOG_FILE_NAME: &str = "data.json";

/// Extensions recognized as audio, matched case-insensitively
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "flac", "wav", "ogg", "aac", "m4a", "wma", "opus"];

/// Replacement stem for filenames that sanitize to nothing
pub const FALLBACK_STEM: &str = "arquivo";

/// Directory scanned for audio files
pub fn music_dir(root: &Path) -> PathBuf {
    root.join(MUSIC_DIR_NAME)
}

/// Path of the JSON catalog
pub fn catalog_path(root: &Path) -> PathBuf {
    root.join(CATALOG_FILE_NAME)
}

/// Public URL a cataloged file is served from
pub fn track_url(filename: &str) -> String {
    format!("{}/{}/{}", BASE_URL, MUSIC_DIR_NAME, filename)
}
