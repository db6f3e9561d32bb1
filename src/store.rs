//! The entity store: an immutable snapshot of everything generation reads.
//!
//! A [`Store`] is built once (by [`crate::load::load`] or directly in tests)
//! and then only borrowed. Queries over its channels go through
//! [`Store::channels`], which hands out a fresh [`Query`] each call.

use crate::query::Query;
use crate::types::{Category, Channel, Country, Language};

#[derive(Debug, Clone, Default)]
pub struct Store {
    channels: Vec<Channel>,
    categories: Vec<Category>,
    countries: Vec<Country>,
    languages: Vec<Language>,
}

impl Store {
    pub fn new(
        channels: Vec<Channel>,
        categories: Vec<Category>,
        countries: Vec<Country>,
        languages: Vec<Language>,
    ) -> Self {
        Self {
            channels,
            categories,
            countries,
            languages,
        }
    }

    /// Start a query over all channels, in load order.
    pub fn channels(&self) -> Query<'_> {
        Query::new(&self.channels)
    }

    /// All channels in load order, duplicates included.
    pub fn all_channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    /// Countries ordered by display name.
    pub fn countries_by_name(&self) -> Vec<&Country> {
        let mut sorted: Vec<&Country> = self.countries.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        sorted
    }

    /// Languages ordered by display name.
    pub fn languages_by_name(&self) -> Vec<&Language> {
        let mut sorted: Vec<&Language> = self.languages.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        sorted
    }

    pub fn summary(&self) -> StoreSummary {
        StoreSummary {
            channels: self.channels.len(),
            categories: self.categories.len(),
            countries: self.countries.len(),
            languages: self.languages.len(),
        }
    }
}

/// Entity counts, as printed at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreSummary {
    pub channels: usize,
    pub categories: usize,
    pub countries: usize,
    pub languages: usize,
}
