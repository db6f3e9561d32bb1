//! Shared test utilities for the channel-index test suite.
//!
//! Provides terse builders for entities and channels, plus a fixture copier
//! for tests that load a real source directory.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let cnn = with_country(channel("CNN", "http://cnn"), "us", "United States");
//! let store = Store::new(vec![cnn], vec![], vec![country("us", "United States")], vec![]);
//!
//! let tmp = setup_fixtures();
//! let store = load(tmp.path(), &GeneratorConfig::default()).unwrap();
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::types::{Category, Channel, Country, HttpOptions, Language};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/source/` to a temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/source");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Entity builders
// =========================================================================

pub fn category(id: &str, name: &str) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
    }
}

pub fn country(code: &str, name: &str) -> Country {
    Country {
        code: code.to_string(),
        name: name.to_string(),
    }
}

pub fn language(code: &str, name: &str) -> Language {
    Language {
        code: code.to_string(),
        name: name.to_string(),
    }
}

/// A bare SFW channel with no associations or metadata.
pub fn channel(name: &str, url: &str) -> Channel {
    Channel {
        name: name.to_string(),
        url: url.to_string(),
        category: None,
        countries: vec![],
        languages: vec![],
        sfw: true,
        logo: None,
        tvg_id: None,
        tvg_name: None,
        tvg_url: None,
        resolution: None,
        status: None,
        http: HttpOptions::default(),
        filename: "test.m3u".to_string(),
    }
}

pub fn with_category(mut channel: Channel, id: &str, name: &str) -> Channel {
    channel.category = Some(category(id, name));
    channel
}

pub fn with_country(mut channel: Channel, code: &str, name: &str) -> Channel {
    channel.countries.push(country(code, name));
    channel
}

pub fn with_language(mut channel: Channel, code: &str, name: &str) -> Channel {
    channel.languages.push(language(code, name));
    channel
}

pub fn nsfw(mut channel: Channel) -> Channel {
    channel.sfw = false;
    channel
}

// =========================================================================
// Output readers
// =========================================================================

/// Read a generated playlist and return the channel names in file order.
///
/// Names are taken from the text after the title comma of each `#EXTINF`
/// line, so resolution and status suffixes are included.
pub fn playlist_titles(path: &Path) -> Vec<String> {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("cannot read playlist {}: {e}", path.display()));
    content
        .lines()
        .filter(|l| l.starts_with("#EXTINF:"))
        .map(|l| {
            l.rsplit_once("\",")
                .map(|(_, title)| title.to_string())
                .unwrap_or_else(|| panic!("malformed EXTINF line: {l}"))
        })
        .collect()
}

/// All `group-title` values in a generated playlist, in file order.
pub fn playlist_group_titles(path: &Path) -> Vec<String> {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("cannot read playlist {}: {e}", path.display()));
    content
        .lines()
        .filter(|l| l.starts_with("#EXTINF:"))
        .map(|l| {
            let start = l
                .find("group-title=\"")
                .unwrap_or_else(|| panic!("no group-title in: {l}"))
                + "group-title=\"".len();
            let end = l[start..].find('"').unwrap() + start;
            l[start..end].to_string()
        })
        .collect()
}
