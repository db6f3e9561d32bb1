//! Minimal extended-M3U reader for source playlists.
//!
//! Only the subset the channel database uses is understood:
//!
//! ```text
//! #EXTM3U
//! #EXTINF:-1 tvg-id="cnn.us" tvg-country="US" group-title="News",CNN (720p)
//! #EXTVLCOPT:http-referrer=https://example.com/
//! #EXTVLCOPT:http-user-agent=Mozilla/5.0
//! https://example.com/cnn.m3u8
//! ```
//!
//! Attribute values keep their raw text; mapping attributes to store entities
//! happens in [`crate::load`].

use std::collections::BTreeMap;
use tracing::warn;

/// One `#EXTINF` record with the url that follows it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawEntry {
    /// Title after the last top-level comma, untrimmed of suffixes.
    pub title: String,
    pub attributes: BTreeMap<String, String>,
    pub url: String,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
    /// 1-based line number of the `#EXTINF` directive.
    pub line: usize,
}

impl RawEntry {
    /// Attribute value, with empty strings treated as absent.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .get(key)
            .map(|v| v.as_str())
            .filter(|v| !v.is_empty())
    }
}

/// Parse playlist text into entries. Entries without a url are skipped.
pub fn parse_playlist(content: &str) -> Vec<RawEntry> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut entries = Vec::new();
    let mut pending: Option<RawEntry> = None;

    for (idx, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(info) = line.strip_prefix("#EXTINF:") {
            if let Some(prev) = pending.take() {
                warn!("playlist entry '{}' at line {} has no url", prev.title, prev.line);
            }
            pending = Some(parse_extinf(info, idx + 1));
        } else if let Some(opt) = line.strip_prefix("#EXTVLCOPT:") {
            if let Some(entry) = pending.as_mut() {
                if let Some(referrer) = opt.strip_prefix("http-referrer=") {
                    entry.referrer = Some(referrer.to_string());
                } else if let Some(agent) = opt.strip_prefix("http-user-agent=") {
                    entry.user_agent = Some(agent.to_string());
                }
            }
        } else if line.starts_with('#') {
            // #EXTM3U header and unknown directives
        } else if let Some(mut entry) = pending.take() {
            entry.url = line.to_string();
            entries.push(entry);
        }
    }

    if let Some(prev) = pending {
        warn!("playlist entry '{}' at line {} has no url", prev.title, prev.line);
    }

    entries
}

/// Parse the text after `#EXTINF:` into attributes and title.
fn parse_extinf(info: &str, line: usize) -> RawEntry {
    let (attributes_part, title) = match find_title_comma(info) {
        Some(pos) => (&info[..pos], info[pos + 1..].trim()),
        None => (info, ""),
    };

    let mut attributes = BTreeMap::new();
    for (key, value) in parse_attributes(attributes_part) {
        attributes.insert(key, value);
    }

    RawEntry {
        title: title.to_string(),
        attributes,
        line,
        ..RawEntry::default()
    }
}

/// Position of the first comma outside double quotes.
fn find_title_comma(info: &str) -> Option<usize> {
    let mut in_quotes = false;
    for (pos, ch) in info.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => return Some(pos),
            _ => {}
        }
    }
    None
}

/// Split `-1 key="value" key2="value 2"` into key/value pairs.
///
/// The leading duration has no `=` and is dropped.
fn parse_attributes(attributes: &str) -> Vec<(String, String)> {
    let mut attrs = Vec::new();
    let mut current_key = String::new();
    let mut current_value = String::new();
    let mut in_quotes = false;
    let mut in_value = false;

    for ch in attributes.chars() {
        match ch {
            '"' if in_value => in_quotes = !in_quotes,
            '=' if !in_quotes && !in_value => in_value = true,
            ' ' | '\t' if !in_quotes => {
                if in_value {
                    attrs.push((current_key.trim().to_string(), current_value.clone()));
                    in_value = false;
                }
                current_key.clear();
                current_value.clear();
            }
            _ => {
                if in_value {
                    current_value.push(ch);
                } else {
                    current_key.push(ch);
                }
            }
        }
    }

    if in_value {
        attrs.push((current_key.trim().to_string(), current_value));
    }

    attrs
}
