//! trackdex - music directory scanner and catalog builder
//!
//! A batch tool that prepares a directory of audio files for static
//! publishing: filenames are sanitized on disk and every file is recorded
//! in an append-only JSON catalog with a public URL, a display title and
//! a sequential id.
//!
//! # Pipeline
//!
//! One `scan` invocation is a single synchronous pass:
//! - load the prior catalog (seen URLs, highest id)
//! - list `musics/`, keeping audio files
//! - sanitize each filename, renaming on disk when it changes
//! - derive a display title from the final name
//! - prepend entries for unseen URLs and rewrite the catalog
//!
//! # Modules
//!
//! - `catalog`: catalog file model and id assignment
//! - `scan`: the scan pass
//! - `sanitize` / `title`: pure string transformations
//! - `config`: compile-time publishing constants
//! - `cli`: command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Update data.json from musics/
//! trackdex scan --root ~/music-vault
//!
//! # Inspect the result
//! trackdex list --root ~/music-vault
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod sanitize;
pub mod scan;
pub mod title;

// Re-export main types at crate root for convenience
pub use catalog::{Catalog, PendingTrack, StoredEntry, TrackEntry};
pub use sanitize::sanitize_filename;
pub use scan::{ScanError, ScanReport};
pub use title::derive_title;
