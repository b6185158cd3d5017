//! The scan pass: sanitize the music directory and fold new files into
//! the catalog.
//!
//! One invocation is a single synchronous sweep. Renames happen as each
//! file is visited, so collision probing always sees the directory state
//! left by earlier renames in the same run.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use crate::catalog::{assign_ids, Catalog, PendingTrack};
use crate::config;
use crate::sanitize::apply_sanitized;
use crate::title::derive_title;

/// Errors that abort a scan before anything is written
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Music directory does not exist: {0}")]
    MusicDirNotFound(PathBuf),
}

/// Counts reported after a scan
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Entries added to the catalog this run
    pub new_tracks: usize,

    /// Audio files skipped because their URL was already cataloged
    pub already_cataloged: usize,

    /// Files renamed while sanitizing
    pub renamed: usize,

    /// Elements in the catalog after the merge
    pub total_tracks: usize,
}

impl ScanReport {
    /// Audio files examined this run
    pub fn total_scanned(&self) -> usize {
        self.new_tracks + self.already_cataloged
    }
}

/// Scan the music directory under `root` and update the catalog
///
/// New files get sanitized names on disk, a derived title, a public URL
/// and a sequential id, and are prepended to `data.json`. When nothing
/// new is found the catalog file is left untouched.
pub fn run(root: &Path) -> Result<ScanReport> {
    let music_dir = config::music_dir(root);
    if !music_dir.is_dir() {
        return Err(ScanError::MusicDirNotFound(music_dir).into());
    }

    let catalog_path = config::catalog_path(root);
    let mut catalog = Catalog::load(&catalog_path)?;
    let known_urls = catalog.known_urls();

    let mut report = ScanReport::default();
    let mut pending = Vec::new();

    // Snapshot the listing before touching anything: the renames below
    // must not feed back into the iteration.
    let entries = fs::read_dir(&music_dir)
        .with_context(|| format!("Failed to list {}", music_dir.display()))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry?;

        let file_type = match entry.file_type() {
            Ok(t) => t,
            Err(_) => continue,
        };
        if !file_type.is_file() {
            continue;
        }

        let path = entry.path();
        if !is_audio_file(&path) {
            continue;
        }

        // Names the filesystem cannot represent as UTF-8 are skipped
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            names.push(name.to_string());
        }
    }

    for name in names {
        let final_name = apply_sanitized(&music_dir, &name)
            .with_context(|| format!("Failed to rename {}", music_dir.join(&name).display()))?;
        if final_name != name {
            report.renamed += 1;
        }

        let url = config::track_url(&final_name);
        if known_urls.contains(&url) {
            tracing::debug!("Already cataloged: {}", final_name);
            report.already_cataloged += 1;
            continue;
        }

        pending.push(PendingTrack {
            url,
            title: derive_title(&final_name),
            filename: final_name,
        });
    }

    if pending.is_empty() {
        report.total_tracks = catalog.len();
        return Ok(report);
    }

    report.new_tracks = pending.len();
    let new_entries = assign_ids(pending, catalog.max_id());
    catalog.prepend(new_entries);
    catalog.save(&catalog_path)?;
    report.total_tracks = catalog.len();

    Ok(report)
}

/// Check if a path has a recognized audio extension
fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            config::AUDIO_EXTENSIONS
                .iter()
                .any(|e| e.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_music_dir_aborts() {
        let temp = TempDir::new().unwrap();

        let err = run(temp.path()).unwrap_err();

        assert!(err.downcast_ref::<ScanError>().is_some());
        assert!(!config::catalog_path(temp.path()).exists());
    }

    #[test]
    fn test_empty_music_dir_writes_nothing() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(config::music_dir(temp.path())).unwrap();

        let report = run(temp.path()).unwrap();

        assert_eq!(report.new_tracks, 0);
        assert_eq!(report.total_tracks, 0);
        assert!(!config::catalog_path(temp.path()).exists());
    }

    #[test]
    fn test_is_audio_file_matches_case_insensitively() {
        assert!(is_audio_file(Path::new("song.mp3")));
        assert!(is_audio_file(Path::new("song.MP3")));
        assert!(is_audio_file(Path::new("song.FlAc")));
        assert!(!is_audio_file(Path::new("song.txt")));
        assert!(!is_audio_file(Path::new("mp3")));
        assert!(!is_audio_file(Path::new(".mp3")));
    }
}
