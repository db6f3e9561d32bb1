//! Read-only query pipeline over the channel collection.
//!
//! A [`Query`] is a small builder: each call records an operation and returns
//! the builder by value, and nothing touches the channels until a terminal
//! [`Query::collect`] or [`Query::count`]. Operations are applied in a fixed
//! order regardless of call order:
//!
//! ```text
//! 1. association filters   (for_category / for_country / for_language)
//! 2. stable sort           (sort_by; the last call wins)
//! 3. duplicate removal     (remove_duplicates)
//! ```
//!
//! Deduplication keeps the first `(name, url)` occurrence, so it must see the
//! sorted sequence: which duplicate survives is only defined relative to the
//! established sort order. Unsorted queries keep load order.

use crate::types::{Category, Channel, Country, Language};
use std::cmp::Ordering;
use std::collections::HashSet;

/// A channel field usable as a sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Url,
    /// Category display name; uncategorized channels compare as `""`.
    Category,
}

impl SortKey {
    fn compare(self, a: &Channel, b: &Channel) -> Ordering {
        match self {
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::Url => a.url.cmp(&b.url),
            SortKey::Category => a.category_name().cmp(b.category_name()),
        }
    }
}

/// An association filter. `None` selects channels with no association.
#[derive(Debug, Clone, PartialEq)]
enum Association {
    Category(Option<String>),
    Country(Option<String>),
    Language(Option<String>),
}

impl Association {
    fn matches(&self, channel: &Channel) -> bool {
        match self {
            Association::Category(None) => channel.category.is_none(),
            Association::Category(Some(id)) => channel
                .category_id()
                .is_some_and(|c| c.eq_ignore_ascii_case(id)),
            Association::Country(None) => channel.countries.is_empty(),
            Association::Country(Some(code)) => channel
                .countries
                .iter()
                .any(|c| c.code.eq_ignore_ascii_case(code)),
            Association::Language(None) => channel.languages.is_empty(),
            Association::Language(Some(code)) => channel
                .languages
                .iter()
                .any(|l| l.code.eq_ignore_ascii_case(code)),
        }
    }
}

/// A pending query over a borrowed channel slice.
#[derive(Debug, Clone)]
pub struct Query<'a> {
    channels: &'a [Channel],
    filters: Vec<Association>,
    sort_keys: Vec<SortKey>,
    dedup: bool,
}

impl<'a> Query<'a> {
    pub fn new(channels: &'a [Channel]) -> Self {
        Self {
            channels,
            filters: Vec::new(),
            sort_keys: Vec::new(),
            dedup: false,
        }
    }

    /// Order by the given keys, primary first; later keys break ties.
    pub fn sort_by(mut self, keys: &[SortKey]) -> Self {
        self.sort_keys = keys.to_vec();
        self
    }

    /// Keep channels in `category`, or uncategorized ones for the sentinel.
    pub fn for_category(mut self, category: &Category) -> Self {
        let id = (!category.is_sentinel()).then(|| category.id.clone());
        self.filters.push(Association::Category(id));
        self
    }

    /// Keep channels listing `country`, or those with none for the sentinel.
    pub fn for_country(mut self, country: &Country) -> Self {
        let code = (!country.is_sentinel()).then(|| country.code.clone());
        self.filters.push(Association::Country(code));
        self
    }

    /// Keep channels listing `language`, or those with none for the sentinel.
    pub fn for_language(mut self, language: &Language) -> Self {
        let code = (!language.is_sentinel()).then(|| language.code.clone());
        self.filters.push(Association::Language(code));
        self
    }

    /// Collapse channels sharing `(name, url)`, keeping the first after sorting.
    pub fn remove_duplicates(mut self) -> Self {
        self.dedup = true;
        self
    }

    /// Run the query.
    pub fn collect(&self) -> Vec<&'a Channel> {
        let mut result: Vec<&'a Channel> = self
            .channels
            .iter()
            .filter(|c| self.filters.iter().all(|f| f.matches(c)))
            .collect();

        if !self.sort_keys.is_empty() {
            // sort_by is stable, so equal keys keep load order
            result.sort_by(|a, b| {
                self.sort_keys
                    .iter()
                    .map(|key| key.compare(a, b))
                    .find(|ord| ord.is_ne())
                    .unwrap_or(Ordering::Equal)
            });
        }

        if self.dedup {
            result = dedup_by_identity(result);
        }

        result
    }

    pub fn count(&self) -> usize {
        self.collect().len()
    }
}

/// Keep the first channel of each `(name, url)` pair, preserving order.
fn dedup_by_identity<'a>(channels: Vec<&'a Channel>) -> Vec<&'a Channel> {
    let mut seen: HashSet<(&'a str, &'a str)> = HashSet::new();
    channels
        .into_iter()
        .filter(|&c| seen.insert((c.name.as_str(), c.url.as_str())))
        .collect()
}
