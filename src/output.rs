//! CLI output formatting.
//!
//! Each command has a `format_*` function that returns `Vec<String>` and a
//! `print_*` wrapper that writes to stdout. Format functions are pure, with
//! no I/O, so the exact console output is unit-testable.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Playlists
//! 001 uk.m3u (12 channels)
//! 002 us.m3u (30 channels)
//!
//! Channels
//!     42 entries, 40 unique, 38 sfw
//!     Uncategorized: 3
//!     No country: 1
//!     No language: 5
//!
//! Total: 42 channels, 2 countries, 3 languages, 5 categories.
//! ```
//!
//! ## Generate
//!
//! ```text
//! index.m3u (40 channels, 38 sfw)
//! index.category.m3u (40 channels, 38 sfw)
//! categories/
//!     news.m3u (12 channels)
//!     other.m3u (3 channels)
//! countries/
//!     us.m3u (30 channels, 29 sfw)
//! channels.json (42 channels)
//!
//! Total: 42 channels, 2 countries, 3 languages, 5 categories.
//! ```

use crate::generate::{Artifact, GenerateReport};
use crate::store::{Store, StoreSummary};
use std::collections::BTreeMap;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `(N channels)` or `(N channels, M sfw)`.
fn count_detail(entries: usize, sfw: Option<usize>) -> String {
    match sfw {
        Some(s) => format!("({} channels, {} sfw)", entries, s),
        None => format!("({} channels)", entries),
    }
}

/// The closing totals line.
pub fn format_total(summary: &StoreSummary) -> String {
    format!(
        "Total: {} channels, {} countries, {} languages, {} categories.",
        summary.channels, summary.countries, summary.languages, summary.categories
    )
}

// ============================================================================
// Check
// ============================================================================

/// Format the loaded store as a content inventory.
pub fn format_check_output(store: &Store) -> Vec<String> {
    let mut lines = Vec::new();
    let channels = store.all_channels();

    let mut per_file: BTreeMap<&str, usize> = BTreeMap::new();
    for channel in channels {
        *per_file.entry(channel.filename.as_str()).or_default() += 1;
    }

    lines.push("Playlists".to_string());
    for (i, (filename, count)) in per_file.iter().enumerate() {
        lines.push(format!(
            "{} {} {}",
            format_index(i + 1),
            filename,
            count_detail(*count, None)
        ));
    }

    let unique = store.channels().remove_duplicates().count();
    let sfw = channels.iter().filter(|c| c.sfw).count();
    lines.push(String::new());
    lines.push("Channels".to_string());
    lines.push(format!(
        "{}{} entries, {} unique, {} sfw",
        indent(1),
        channels.len(),
        unique,
        sfw
    ));
    lines.push(format!(
        "{}Uncategorized: {}",
        indent(1),
        channels.iter().filter(|c| c.category.is_none()).count()
    ));
    lines.push(format!(
        "{}No country: {}",
        indent(1),
        channels.iter().filter(|c| c.countries.is_empty()).count()
    ));
    lines.push(format!(
        "{}No language: {}",
        indent(1),
        channels.iter().filter(|c| c.languages.is_empty()).count()
    ));

    lines.push(String::new());
    lines.push(format_total(&store.summary()));
    lines
}

/// Print check output to stdout.
pub fn print_check_output(store: &Store) {
    for line in format_check_output(store) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate
// ============================================================================

/// Format the artifacts of a generation run.
///
/// Top-level files are listed directly; files inside a subdirectory are
/// grouped under a `dir/` header in the order they were written.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_dir: Option<&str> = None;

    for artifact in &report.artifacts {
        match artifact.path.split_once('/') {
            Some((dir, file)) => {
                if current_dir != Some(dir) {
                    lines.push(format!("{}/", dir));
                    current_dir = Some(dir);
                }
                lines.push(format!("{}{}", indent(1), artifact_line(file, artifact)));
            }
            None => {
                current_dir = None;
                lines.push(artifact_line(&artifact.path, artifact));
            }
        }
    }

    lines.push(String::new());
    lines.push(format_total(&report.summary));
    lines
}

fn artifact_line(name: &str, artifact: &Artifact) -> String {
    format!(
        "{} {}",
        name,
        count_detail(artifact.entries, artifact.sfw_entries)
    )
}

/// Print generate output to stdout.
pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
