//! Site generation.
//!
//! Runs the query pipeline once per artifact and writes the results under the
//! output root. Every artifact is defined by a sort order, an optional
//! association filter, and whether an SFW sibling is written:
//!
//! | Artifact | Sort keys | Filter | SFW sibling |
//! |----------|-----------|--------|-------------|
//! | `index.m3u` | name, url | none | yes |
//! | `index.category.m3u` | category, name, url | none | yes |
//! | `index.country.m3u` | name, url | each country, sentinel first | yes |
//! | `index.language.m3u` | name, url | each language, sentinel first | yes |
//! | `categories/<id>.m3u` | name, url | one category, then `other` | no |
//! | `countries/<code>.m3u` | name, url | one country, then `undefined` | yes |
//! | `languages/<code>.m3u` | name, url | one language, then `undefined` | yes |
//! | `channels.json` | name, url | none, not deduplicated | no |
//!
//! ## Output Structure
//!
//! ```text
//! .gh-pages/
//! ├── .nojekyll
//! ├── index.m3u / index.sfw.m3u
//! ├── index.category.m3u / index.category.sfw.m3u
//! ├── index.country.m3u / index.country.sfw.m3u
//! ├── index.language.m3u / index.language.sfw.m3u
//! ├── categories/
//! │   ├── news.m3u
//! │   └── other.m3u
//! ├── countries/
//! │   ├── us.m3u / us.sfw.m3u
//! │   └── undefined.m3u / undefined.sfw.m3u
//! ├── languages/
//! │   ├── eng.m3u / eng.sfw.m3u
//! │   └── undefined.m3u / undefined.sfw.m3u
//! └── channels.json
//! ```
//!
//! In the country and language indexes each entry's `group-title` is the
//! country or language name (empty for the sentinel), so players group those
//! playlists by country or language instead of category.

use crate::config::GeneratorConfig;
use crate::playlist::{ChannelRecord, Playlist, SplitPlaylist, playlist_entry};
use crate::query::{Query, SortKey};
use crate::store::{Store, StoreSummary};
use crate::types::{Category, Country, Language};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

const BY_NAME: &[SortKey] = &[SortKey::Name, SortKey::Url];
const BY_CATEGORY: &[SortKey] = &[SortKey::Category, SortKey::Name, SortKey::Url];

/// One written file (or file pair) and how many entries it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Path relative to the output root.
    pub path: String,
    pub entries: usize,
    /// Entries in the `.sfw` sibling, if one was written.
    pub sfw_entries: Option<usize>,
}

/// What a generation run wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateReport {
    pub artifacts: Vec<Artifact>,
    pub summary: StoreSummary,
}

impl GenerateReport {
    pub fn find(&self, path: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.path == path)
    }
}

pub fn generate(
    store: &Store,
    config: &GeneratorConfig,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    info!("Creating {}", output_dir.display());
    fs::create_dir_all(output_dir)?;

    if config.output.nojekyll {
        fs::write(output_dir.join(".nojekyll"), "")?;
    }

    let mut artifacts = Vec::new();
    artifacts.push(generate_index(store, output_dir)?);
    artifacts.push(generate_category_index(store, output_dir)?);
    artifacts.push(generate_country_index(store, output_dir)?);
    artifacts.push(generate_language_index(store, output_dir)?);
    artifacts.extend(generate_categories(store, output_dir)?);
    artifacts.extend(generate_countries(store, output_dir)?);
    artifacts.extend(generate_languages(store, output_dir)?);
    artifacts.push(generate_channels_json(store, config, output_dir)?);

    info!(
        "Wrote {} artifacts to {}",
        artifacts.len(),
        output_dir.display()
    );
    Ok(GenerateReport {
        artifacts,
        summary: store.summary(),
    })
}

fn generate_index(store: &Store, output_dir: &Path) -> Result<Artifact, GenerateError> {
    info!("Generating index.m3u");
    let mut split = SplitPlaylist::new();
    for channel in store.channels().sort_by(BY_NAME).remove_duplicates().collect() {
        split.push(channel, channel.category_name());
    }
    write_split(output_dir, "index", &split)
}

fn generate_category_index(store: &Store, output_dir: &Path) -> Result<Artifact, GenerateError> {
    info!("Generating index.category.m3u");
    let mut split = SplitPlaylist::new();
    for channel in store
        .channels()
        .sort_by(BY_CATEGORY)
        .remove_duplicates()
        .collect()
    {
        split.push(channel, channel.category_name());
    }
    write_split(output_dir, "index.category", &split)
}

fn generate_country_index(store: &Store, output_dir: &Path) -> Result<Artifact, GenerateError> {
    info!("Generating index.country.m3u");
    let undefined = Country::undefined();
    let countries = std::iter::once(&undefined).chain(store.countries_by_name());

    let mut split = SplitPlaylist::new();
    for country in countries {
        let query = store.channels().sort_by(BY_NAME).for_country(country);
        push_labeled(&mut split, query, &country.name);
    }
    write_split(output_dir, "index.country", &split)
}

fn generate_language_index(store: &Store, output_dir: &Path) -> Result<Artifact, GenerateError> {
    info!("Generating index.language.m3u");
    let undefined = Language::undefined();
    let languages = std::iter::once(&undefined).chain(store.languages_by_name());

    let mut split = SplitPlaylist::new();
    for language in languages {
        let query = store.channels().sort_by(BY_NAME).for_language(language);
        push_labeled(&mut split, query, &language.name);
    }
    write_split(output_dir, "index.language", &split)
}

/// Append a deduplicated query result under a fixed `group-title`.
fn push_labeled(split: &mut SplitPlaylist, query: Query<'_>, label: &str) {
    for channel in query.remove_duplicates().collect() {
        split.push(channel, label);
    }
}

fn generate_categories(store: &Store, output_dir: &Path) -> Result<Vec<Artifact>, GenerateError> {
    info!("Generating categories/");
    let dir = output_dir.join("categories");
    fs::create_dir_all(&dir)?;

    let other = Category::other();
    let mut artifacts = Vec::new();
    for category in store.categories().iter().chain(std::iter::once(&other)) {
        let mut playlist = Playlist::new();
        for channel in store
            .channels()
            .sort_by(BY_NAME)
            .for_category(category)
            .remove_duplicates()
            .collect()
        {
            playlist.push(&playlist_entry(channel));
        }
        let filename = format!("{}.m3u", category.id);
        playlist.write(&dir.join(&filename))?;
        debug!("categories/{}: {} entries", filename, playlist.entries());
        artifacts.push(Artifact {
            path: format!("categories/{filename}"),
            entries: playlist.entries(),
            sfw_entries: None,
        });
    }
    Ok(artifacts)
}

fn generate_countries(store: &Store, output_dir: &Path) -> Result<Vec<Artifact>, GenerateError> {
    info!("Generating countries/");
    let dir = output_dir.join("countries");
    fs::create_dir_all(&dir)?;

    let undefined = Country::undefined();
    let mut artifacts = Vec::new();
    for country in store.countries().iter().chain(std::iter::once(&undefined)) {
        let mut split = SplitPlaylist::new();
        for channel in store
            .channels()
            .sort_by(BY_NAME)
            .for_country(country)
            .remove_duplicates()
            .collect()
        {
            split.push(channel, channel.category_name());
        }
        artifacts.push(write_split(&dir, &country.code, &split).map(|a| Artifact {
            path: format!("countries/{}", a.path),
            ..a
        })?);
    }
    Ok(artifacts)
}

fn generate_languages(store: &Store, output_dir: &Path) -> Result<Vec<Artifact>, GenerateError> {
    info!("Generating languages/");
    let dir = output_dir.join("languages");
    fs::create_dir_all(&dir)?;

    let undefined = Language::undefined();
    let mut artifacts = Vec::new();
    for language in store.languages().iter().chain(std::iter::once(&undefined)) {
        let mut split = SplitPlaylist::new();
        for channel in store
            .channels()
            .sort_by(BY_NAME)
            .for_language(language)
            .remove_duplicates()
            .collect()
        {
            split.push(channel, channel.category_name());
        }
        artifacts.push(write_split(&dir, &language.code, &split).map(|a| Artifact {
            path: format!("languages/{}", a.path),
            ..a
        })?);
    }
    Ok(artifacts)
}

fn generate_channels_json(
    store: &Store,
    config: &GeneratorConfig,
    output_dir: &Path,
) -> Result<Artifact, GenerateError> {
    info!("Generating channels.json");
    let records: Vec<ChannelRecord> = store
        .channels()
        .sort_by(BY_NAME)
        .collect()
        .into_iter()
        .map(ChannelRecord::from)
        .collect();
    let json = if config.output.pretty_json {
        serde_json::to_string_pretty(&records)?
    } else {
        serde_json::to_string(&records)?
    };
    fs::write(output_dir.join("channels.json"), json)?;
    Ok(Artifact {
        path: "channels.json".to_string(),
        entries: records.len(),
        sfw_entries: None,
    })
}

/// Write `<stem>.m3u` and `<stem>.sfw.m3u` into `dir`.
fn write_split(dir: &Path, stem: &str, split: &SplitPlaylist) -> Result<Artifact, GenerateError> {
    let filename = format!("{stem}.m3u");
    split.full.write(&dir.join(&filename))?;
    split.sfw.write(&dir.join(format!("{stem}.sfw.m3u")))?;
    debug!(
        "{}: {} entries ({} sfw)",
        filename,
        split.full.entries(),
        split.sfw.entries()
    );
    Ok(Artifact {
        path: filename,
        entries: split.full.entries(),
        sfw_entries: Some(split.sfw.entries()),
    })
}
