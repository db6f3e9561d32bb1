//! Channel title parsing.
//!
//! Source playlists pack three things into the `#EXTINF` title: the channel
//! name, an optional resolution suffix and an optional status suffix.
//!
//! - `CNN` → name="CNN"
//! - `CNN (720p)` → name="CNN", resolution=720
//! - `CNN (1280x720)` → name="CNN", resolution=720
//! - `CNN (720p) [Geo-blocked]` → name="CNN", resolution=720, status="Geo-blocked"
//!
//! Suffixes are peeled from the end, so their relative order does not matter.
//! Parenthesized text that is not a resolution stays part of the name.

/// Result of parsing a channel title like `CNN (720p) [Geo-blocked]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTitle {
    pub name: String,
    /// Vertical resolution in pixels.
    pub resolution: Option<u32>,
    pub status: Option<String>,
}

pub fn parse_title(title: &str) -> ParsedTitle {
    let mut rest = title.trim();
    let mut resolution = None;
    let mut status = None;

    loop {
        if status.is_none() && rest.ends_with(']') {
            if let Some(open) = rest.rfind('[') {
                let inner = rest[open + 1..rest.len() - 1].trim();
                if !inner.is_empty() {
                    status = Some(inner.to_string());
                }
                rest = rest[..open].trim_end();
                continue;
            }
        }
        if resolution.is_none() && rest.ends_with(')') {
            if let Some(open) = rest.rfind('(') {
                if let Some(height) = parse_resolution(&rest[open + 1..rest.len() - 1]) {
                    resolution = Some(height);
                    rest = rest[..open].trim_end();
                    continue;
                }
            }
        }
        break;
    }

    ParsedTitle {
        name: rest.to_string(),
        resolution,
        status,
    }
}

/// Parse `720p` or `1280x720` into a height.
fn parse_resolution(s: &str) -> Option<u32> {
    let s = s.trim();
    if let Some(digits) = s.strip_suffix(['p', 'P']) {
        return digits.parse().ok();
    }
    let (width, height) = s.split_once(['x', 'X'])?;
    width.parse::<u32>().ok()?;
    height.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_name() {
        let p = parse_title("CNN");
        assert_eq!(p.name, "CNN");
        assert_eq!(p.resolution, None);
        assert_eq!(p.status, None);
    }

    #[test]
    fn name_with_resolution() {
        let p = parse_title("BBC One (1080p)");
        assert_eq!(p.name, "BBC One");
        assert_eq!(p.resolution, Some(1080));
    }

    #[test]
    fn name_with_dimensions() {
        let p = parse_title("Arte (1280x720)");
        assert_eq!(p.name, "Arte");
        assert_eq!(p.resolution, Some(720));
    }

    #[test]
    fn name_with_resolution_and_status() {
        let p = parse_title("CNN (720p) [Geo-blocked]");
        assert_eq!(p.name, "CNN");
        assert_eq!(p.resolution, Some(720));
        assert_eq!(p.status.as_deref(), Some("Geo-blocked"));
    }

    #[test]
    fn status_before_resolution() {
        let p = parse_title("CNN [Not 24/7] (480p)");
        assert_eq!(p.name, "CNN");
        assert_eq!(p.resolution, Some(480));
        assert_eq!(p.status.as_deref(), Some("Not 24/7"));
    }

    #[test]
    fn non_resolution_parentheses_stay_in_name() {
        let p = parse_title("Channel 5 (UK)");
        assert_eq!(p.name, "Channel 5 (UK)");
        assert_eq!(p.resolution, None);
    }

    #[test]
    fn empty_brackets_are_dropped_without_status() {
        let p = parse_title("France 24 []");
        assert_eq!(p.name, "France 24");
        assert_eq!(p.status, None);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let p = parse_title("  Euronews  ");
        assert_eq!(p.name, "Euronews");
    }
}
