//! Shared entity types held by the store.
//!
//! Reference entities (categories, countries, languages) are small lookup
//! records. A [`Channel`] carries copies of the keys and display names of the
//! entities it is associated with, never the authoritative record: the store
//! remains the single list that generation iterates over.

use serde::{Deserialize, Serialize};

/// Sentinel id for channels without a category.
pub const OTHER_CATEGORY: &str = "other";
/// Sentinel code for channels without a country or language.
pub const UNDEFINED_CODE: &str = "undefined";

/// A channel category such as `news` or `music`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

impl Category {
    /// The unclassified bucket (`other`).
    pub fn other() -> Self {
        Self {
            id: OTHER_CATEGORY.to_string(),
            name: String::new(),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.id == OTHER_CATEGORY
    }
}

/// A country keyed by its lowercase ISO 3166 code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub code: String,
    pub name: String,
}

impl Country {
    /// The unclassified bucket (`undefined`).
    pub fn undefined() -> Self {
        Self {
            code: UNDEFINED_CODE.to_string(),
            name: String::new(),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.code == UNDEFINED_CODE
    }
}

/// A language keyed by its ISO 639-3 code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    pub name: String,
}

impl Language {
    /// The unclassified bucket (`undefined`).
    pub fn undefined() -> Self {
        Self {
            code: UNDEFINED_CODE.to_string(),
            name: String::new(),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.code == UNDEFINED_CODE
    }
}

/// HTTP options some streams require, emitted as `#EXTVLCOPT` lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpOptions {
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
}

/// A single playable channel.
///
/// Identity is the `(name, url)` pair; the same pair may appear several times
/// when it is listed in more than one source playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    /// Display name with resolution and status suffixes stripped.
    pub name: String,
    pub url: String,
    pub category: Option<Category>,
    /// Empty when the channel has no country association.
    pub countries: Vec<Country>,
    /// Empty when the channel has no language association.
    pub languages: Vec<Language>,
    /// Safe-for-work classification, fixed at load time.
    pub sfw: bool,
    pub logo: Option<String>,
    pub tvg_id: Option<String>,
    pub tvg_name: Option<String>,
    pub tvg_url: Option<String>,
    /// Vertical resolution parsed from a `(720p)` title suffix.
    pub resolution: Option<u32>,
    /// Status label parsed from a `[Geo-blocked]` title suffix.
    pub status: Option<String>,
    pub http: HttpOptions,
    /// Source playlist, relative to the channels directory.
    pub filename: String,
}

impl Channel {
    /// Display name of the channel's category, or `""` when uncategorized.
    pub fn category_name(&self) -> &str {
        self.category.as_ref().map(|c| c.name.as_str()).unwrap_or("")
    }

    pub fn category_id(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_are_recognized() {
        assert!(Category::other().is_sentinel());
        assert!(Country::undefined().is_sentinel());
        assert!(Language::undefined().is_sentinel());
    }

    #[test]
    fn real_entities_are_not_sentinels() {
        let news = Category {
            id: "news".to_string(),
            name: "News".to_string(),
        };
        let us = Country {
            code: "us".to_string(),
            name: "United States".to_string(),
        };
        assert!(!news.is_sentinel());
        assert!(!us.is_sentinel());
    }

    #[test]
    fn sentinel_names_are_empty() {
        assert_eq!(Category::other().name, "");
        assert_eq!(Country::undefined().name, "");
        assert_eq!(Language::undefined().name, "");
    }
}
