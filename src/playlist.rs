//! Channel serialization: playlist entries and JSON records.
//!
//! ## Playlist Entry Format
//!
//! Players consume these files verbatim, so the layout is fixed:
//!
//! ```text
//! #EXTINF:-1 tvg-id="cnn.us" tvg-name="CNN" tvg-country="US;CA" tvg-language="English" tvg-logo="https://logo/cnn.png" group-title="News",CNN (720p) [Geo-blocked]
//! #EXTVLCOPT:http-referrer=https://cnn.com/
//! https://cnn.example/live.m3u8
//! ```
//!
//! - Absent metadata prints as an empty attribute value, never omitted.
//! - A `user-agent` attribute appears before `group-title` only when the
//!   channel needs one, and is repeated as an `#EXTVLCOPT` line.
//! - No escaping is applied to any value.
//!
//! The `group-title` is a parameter rather than a channel field: the country
//! and language indexes label entries with the country or language name
//! instead of the category, and must not touch the channel to do it.

use crate::types::{Channel, Country, Language};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// First line of every generated playlist.
pub const PLAYLIST_HEADER: &str = "#EXTM3U";

/// Format a channel as a playlist entry labeled with its own category.
pub fn playlist_entry(channel: &Channel) -> String {
    playlist_entry_with_label(channel, channel.category_name())
}

/// Format a channel as a playlist entry with an explicit `group-title`.
pub fn playlist_entry_with_label(channel: &Channel, group_title: &str) -> String {
    let countries = channel
        .countries
        .iter()
        .map(|c| c.code.to_uppercase())
        .collect::<Vec<_>>()
        .join(";");
    let languages = channel
        .languages
        .iter()
        .map(|l| l.name.as_str())
        .collect::<Vec<_>>()
        .join(";");

    let mut entry = format!(
        "#EXTINF:-1 tvg-id=\"{}\" tvg-name=\"{}\" tvg-country=\"{}\" tvg-language=\"{}\" tvg-logo=\"{}\"",
        opt(&channel.tvg_id),
        opt(&channel.tvg_name),
        countries,
        languages,
        opt(&channel.logo),
    );
    if let Some(agent) = &channel.http.user_agent {
        entry.push_str(&format!(" user-agent=\"{agent}\""));
    }
    entry.push_str(&format!(
        " group-title=\"{}\",{}",
        group_title,
        display_name(channel)
    ));
    if let Some(referrer) = &channel.http.referrer {
        entry.push_str(&format!("\n#EXTVLCOPT:http-referrer={referrer}"));
    }
    if let Some(agent) = &channel.http.user_agent {
        entry.push_str(&format!("\n#EXTVLCOPT:http-user-agent={agent}"));
    }
    entry.push('\n');
    entry.push_str(&channel.url);
    entry.push('\n');
    entry
}

/// Name with resolution and status suffixes restored: `CNN (720p) [Geo-blocked]`.
pub fn display_name(channel: &Channel) -> String {
    let mut name = channel.name.clone();
    if let Some(height) = channel.resolution {
        name.push_str(&format!(" ({height}p)"));
    }
    if let Some(status) = &channel.status {
        name.push_str(&format!(" [{status}]"));
    }
    name
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

// ============================================================================
// JSON export
// ============================================================================

/// The exported form of a channel in `channels.json`.
///
/// Absent optional values serialize as `null` rather than being omitted, so
/// every record has the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelRecord {
    pub name: String,
    pub logo: Option<String>,
    pub url: String,
    /// Category display name.
    pub category: Option<String>,
    pub languages: Vec<Language>,
    pub countries: Vec<Country>,
    pub tvg: TvgRecord,
    pub sfw: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvgRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
}

impl From<&Channel> for ChannelRecord {
    fn from(channel: &Channel) -> Self {
        Self {
            name: channel.name.clone(),
            logo: channel.logo.clone(),
            url: channel.url.clone(),
            category: channel.category.as_ref().map(|c| c.name.clone()),
            languages: channel.languages.clone(),
            countries: channel.countries.clone(),
            tvg: TvgRecord {
                id: channel.tvg_id.clone(),
                name: channel.tvg_name.clone(),
                url: channel.tvg_url.clone(),
            },
            sfw: channel.sfw,
        }
    }
}

// ============================================================================
// Playlist files
// ============================================================================

/// A playlist accumulated in memory and written in one call.
#[derive(Debug, Clone)]
pub struct Playlist {
    content: String,
    entries: usize,
}

impl Default for Playlist {
    fn default() -> Self {
        Self::new()
    }
}

impl Playlist {
    pub fn new() -> Self {
        Self {
            content: format!("{PLAYLIST_HEADER}\n"),
            entries: 0,
        }
    }

    pub fn push(&mut self, entry: &str) {
        self.content.push_str(entry);
        self.entries += 1;
    }

    pub fn entries(&self) -> usize {
        self.entries
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Create or truncate `path` with the playlist content.
    pub fn write(&self, path: &Path) -> std::io::Result<()> {
        fs::write(path, &self.content)
    }
}

/// A playlist paired with its SFW sibling.
#[derive(Debug, Clone, Default)]
pub struct SplitPlaylist {
    pub full: Playlist,
    pub sfw: Playlist,
}

impl SplitPlaylist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the full playlist, and to the SFW one if the channel is SFW.
    pub fn push(&mut self, channel: &Channel, group_title: &str) {
        let entry = playlist_entry_with_label(channel, group_title);
        if channel.sfw {
            self.sfw.push(&entry);
        }
        self.full.push(&entry);
    }
}
