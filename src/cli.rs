//! Command-line interface for trackdex.
//!
//! Provides commands for scanning the music directory, listing the
//! catalog, and inspecting the resolved configuration.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::catalog::Catalog;
use crate::config;
use crate::scan;

/// trackdex - music directory scanner and catalog builder
#[derive(Parser, Debug)]
#[command(name = "trackdex")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan the music directory and update the catalog
    Scan {
        /// Directory holding musics/ and data.json
        #[arg(short, long, env = "TRACKDEX_ROOT", default_value = ".")]
        root: PathBuf,
    },

    /// List cataloged tracks, newest first
    List {
        /// Directory holding musics/ and data.json
        #[arg(short, long, env = "TRACKDEX_ROOT", default_value = ".")]
        root: PathBuf,

        /// Maximum number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show resolved paths and publishing constants (debug)
    Config {
        /// Directory holding musics/ and data.json
        #[arg(short, long, env = "TRACKDEX_ROOT", default_value = ".")]
        root: PathBuf,
    },
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Scan { root } => run_scan(&root),
            Commands::List { root, limit } => list_catalog(&root, limit),
            Commands::Config { root } => show_config(&root),
        }
    }
}

/// Run the scan pass and print its summary
fn run_scan(root: &Path) -> Result<()> {
    let report = scan::run(root)?;

    if report.new_tracks == 0 {
        println!("ℹ️ No new music found.");
        return Ok(());
    }

    println!(
        "✅ Catalog updated: {}",
        config::catalog_path(root).display()
    );
    println!("   New tracks added: {}", report.new_tracks);
    println!("   Total entries in catalog: {}", report.total_tracks);
    if report.renamed > 0 {
        println!("   Files renamed: {}", report.renamed);
    }

    Ok(())
}

/// List catalog entries as a table
fn list_catalog(root: &Path, limit: usize) -> Result<()> {
    let catalog = Catalog::load(&config::catalog_path(root))?;

    if catalog.is_empty() {
        println!("Catalog is empty. Use 'trackdex scan' to add music.");
        return Ok(());
    }

    println!("{:<6} {:<40} {:<40}", "ID", "TITLE", "FILE");
    println!("{}", "-".repeat(88));

    for track in catalog.tracks().take(limit) {
        println!(
            "{:<6} {:<40} {:<40}",
            track.id,
            truncate(&track.title, 37),
            truncate(&track.filename, 37)
        );
    }

    println!("\nTotal: {} entries", catalog.len());

    Ok(())
}

/// Show the resolved configuration (for debugging)
fn show_config(root: &Path) -> Result<()> {
    println!("Paths:");
    println!("  Root:    {}", root.display());
    println!("  Music:   {}", config::music_dir(root).display());
    println!("  Catalog: {}", config::catalog_path(root).display());
    println!();
    println!("Publishing:");
    println!("  Base URL:   {}", config::BASE_URL);
    println!("  Extensions: {}", config::AUDIO_EXTENSIONS.join(", "));

    Ok(())
}

/// Shorten a string for table display
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let cut: String = s.chars().take(max).collect();
        format!("{}...", cut)
    } else {
        s.to_string()
    }
}
