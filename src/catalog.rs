//! Append-only JSON catalog of published tracks.
//!
//! The catalog file is a JSON array with the newest entries first.
//! Elements that do not conform to the track shape (hand edits, older
//! formats) are preserved as raw values across rewrites; they still count
//! toward URL deduplication and id assignment.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single published track
///
/// Field order is the serialized key order. `filename` keeps its legacy
/// wire key `arquivo`; the published feed consumes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackEntry {
    /// Public URL the file is served from
    pub url: String,

    /// Display title derived from the filename
    pub title: String,

    /// On-disk filename
    #[serde(rename = "arquivo")]
    pub filename: String,

    /// Sequential identifier, unique across the catalog
    pub id: u64,

    /// Identifier assigned immediately before this one
    pub previous_id: Option<u64>,
}

/// An element of the catalog file
///
/// Anything that fails to parse as a [`TrackEntry`] is carried as a raw
/// JSON value and written back out untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredEntry {
    Track(TrackEntry),
    Other(Value),
}

/// In-memory catalog, loaded once per run
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// All stored elements, newest block first
    pub entries: Vec<StoredEntry>,
}

impl Catalog {
    /// Load the catalog from disk
    ///
    /// A missing file is an empty catalog. A file that reads but does not
    /// parse as a JSON array is treated the same, recovering silently.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;

        let entries = match serde_json::from_str::<Vec<StoredEntry>>(&content) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Ignoring malformed catalog {}: {}", path.display(), e);
                Vec::new()
            }
        };

        Ok(Self { entries })
    }

    /// Save the catalog to disk as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.entries)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write catalog: {}", path.display()))?;

        Ok(())
    }

    /// URLs already present in the catalog
    pub fn known_urls(&self) -> HashSet<String> {
        self.entries
            .iter()
            .filter_map(|entry| match entry {
                StoredEntry::Track(track) => Some(track.url.clone()),
                StoredEntry::Other(value) => value
                    .get("url")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            })
            .collect()
    }

    /// Highest id assigned so far, 0 when none
    ///
    /// Raw elements contribute their `id` field when it is a well-typed
    /// non-negative integer.
    pub fn max_id(&self) -> u64 {
        self.entries
            .iter()
            .filter_map(|entry| match entry {
                StoredEntry::Track(track) => Some(track.id),
                StoredEntry::Other(value) => value.get("id").and_then(Value::as_u64),
            })
            .max()
            .unwrap_or(0)
    }

    /// Insert new entries ahead of everything already stored
    pub fn prepend(&mut self, new_entries: Vec<TrackEntry>) {
        let mut entries: Vec<StoredEntry> =
            new_entries.into_iter().map(StoredEntry::Track).collect();
        entries.append(&mut self.entries);
        self.entries = entries;
    }

    /// Well-formed track entries in storage order
    pub fn tracks(&self) -> impl Iterator<Item = &TrackEntry> {
        self.entries.iter().filter_map(|entry| match entry {
            StoredEntry::Track(track) => Some(track),
            StoredEntry::Other(_) => None,
        })
    }

    /// Get the number of stored elements
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A scanned file waiting for an id
#[derive(Debug, Clone)]
pub struct PendingTrack {
    pub url: String,
    pub title: String,
    pub filename: String,
}

/// Assign sequential ids continuing after `last_id`
///
/// Ids run `last_id + 1` onward in the order given. Each entry's
/// `previous_id` is the id assigned just before it; the first one links
/// back to `last_id`, or to nothing when no id was ever assigned.
pub fn assign_ids(pending: Vec<PendingTrack>, last_id: u64) -> Vec<TrackEntry> {
    let mut previous_id = (last_id > 0).then_some(last_id);
    let mut next_id = last_id + 1;

    pending
        .into_iter()
        .map(|track| {
            let entry = TrackEntry {
                url: track.url,
                title: track.title,
                filename: track.filename,
                id: next_id,
                previous_id,
            };
            previous_id = Some(entry.id);
            next_id += 1;
            entry
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn track(url: &str, id: u64, previous_id: Option<u64>) -> TrackEntry {
        TrackEntry {
            url: url.to_string(),
            title: String::new(),
            filename: String::new(),
            id,
            previous_id,
        }
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();

        let catalog = Catalog::load(&temp.path().join("data.json")).unwrap();

        assert!(catalog.is_empty());
        assert_eq!(catalog.max_id(), 0);
    }

    #[test]
    fn test_load_malformed_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data.json");
        fs::write(&path, "not json at all").unwrap();

        let catalog = Catalog::load(&path).unwrap();

        assert!(catalog.is_empty());
    }

    #[test]
    fn test_load_non_array_is_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data.json");
        fs::write(&path, r#"{"url": "x"}"#).unwrap();

        let catalog = Catalog::load(&path).unwrap();

        assert!(catalog.is_empty());
    }

    #[test]
    fn test_known_urls_and_max_id_see_raw_entries() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data.json");
        let content = json!([
            {"url": "https://x/musics/a.mp3", "title": "A", "arquivo": "a.mp3", "id": 2, "previous_id": null},
            {"url": "https://x/musics/b.mp3", "id": 9, "hand": "edited"},
            "just a string"
        ]);
        fs::write(&path, content.to_string()).unwrap();

        let catalog = Catalog::load(&path).unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.tracks().count(), 1);

        let urls = catalog.known_urls();
        assert_eq!(urls.len(), 2);
        assert!(urls.contains("https://x/musics/a.mp3"));
        assert!(urls.contains("https://x/musics/b.mp3"));

        assert_eq!(catalog.max_id(), 9);
    }

    #[test]
    fn test_prepend_puts_new_entries_first() {
        let mut catalog = Catalog::default();
        catalog.prepend(vec![track("https://x/1", 1, None)]);
        catalog.prepend(vec![
            track("https://x/2", 2, Some(1)),
            track("https://x/3", 3, Some(2)),
        ]);

        let ids: Vec<u64> = catalog.tracks().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_save_keeps_raw_entries() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data.json");
        fs::write(&path, json!([{"legacy": true, "id": 5}]).to_string()).unwrap();

        let mut catalog = Catalog::load(&path).unwrap();
        catalog.prepend(vec![track("https://x/new", 6, Some(5))]);
        catalog.save(&path).unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written[0]["url"], "https://x/new");
        assert_eq!(written[1]["legacy"], true);
        assert_eq!(written[1]["id"], 5);
    }

    #[test]
    fn test_save_writes_two_space_indent_and_raw_unicode() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data.json");

        let mut entry = track("https://x/song", 1, None);
        entry.title = "Canção de roda".to_string();
        let mut catalog = Catalog::default();
        catalog.prepend(vec![entry]);
        catalog.save(&path).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("[\n  {\n    \"url\""));
        assert!(raw.contains("Canção de roda"));
        assert!(raw.contains("\"previous_id\": null"));
    }

    #[test]
    fn test_assign_ids_first_run_starts_at_one() {
        let pending = vec![
            PendingTrack {
                url: "u1".into(),
                title: "t1".into(),
                filename: "f1".into(),
            },
            PendingTrack {
                url: "u2".into(),
                title: "t2".into(),
                filename: "f2".into(),
            },
        ];

        let entries = assign_ids(pending, 0);

        assert_eq!(entries[0].id, 1);
        assert_eq!(entries[0].previous_id, None);
        assert_eq!(entries[1].id, 2);
        assert_eq!(entries[1].previous_id, Some(1));
    }

    #[test]
    fn test_assign_ids_continues_chain_from_prior_maximum() {
        let pending = vec![PendingTrack {
            url: "u".into(),
            title: "t".into(),
            filename: "f".into(),
        }];

        let entries = assign_ids(pending, 41);

        assert_eq!(entries[0].id, 42);
        assert_eq!(entries[0].previous_id, Some(41));
    }
}
