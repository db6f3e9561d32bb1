//! Source directory loading.
//!
//! Builds the [`Store`] snapshot from a source directory:
//!
//! ```text
//! source/
//! ├── config.toml          # Generator config (optional)
//! ├── reference.toml       # Categories, countries, languages
//! └── channels/            # Any tree of *.m3u playlists
//!     ├── us.m3u
//!     └── uk/
//!         └── regional.m3u
//! ```
//!
//! Playlists are read in path order so that load order, and therefore the
//! tie-breaking of equal sort keys, is the same on every machine.
//!
//! ## Attribute Resolution
//!
//! | Attribute | Resolves against | Match |
//! |-----------|------------------|-------|
//! | `group-title` | category id or name | case-insensitive, unknown → uncategorized |
//! | `tvg-country` | `;`-separated country codes | case-insensitive, unknown dropped |
//! | `tvg-language` | `;`-separated language names | case-insensitive, unknown dropped |
//!
//! Upstream data is not validated: anything that does not resolve is simply
//! left unassociated and lands in the sentinel bucket.

use crate::config::{self, GeneratorConfig};
use crate::m3u::{self, RawEntry};
use crate::naming::parse_title;
use crate::store::Store;
use crate::types::{
    Category, Channel, Country, HttpOptions, Language, OTHER_CATEGORY, UNDEFINED_CODE,
};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Reference file parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Reference file not found: {0}")]
    MissingReference(PathBuf),
    #[error("Channels directory not found: {0}")]
    MissingChannelsDir(PathBuf),
    #[error("Reserved {kind} id in reference file: {id}")]
    ReservedId { kind: &'static str, id: String },
}

/// Contents of `reference.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReferenceData {
    pub categories: Vec<Category>,
    pub countries: Vec<Country>,
    pub languages: Vec<Language>,
}

/// Load `config.toml` from `root`, then the store it describes.
pub fn load_source(root: &Path) -> Result<(GeneratorConfig, Store), LoadError> {
    let config = config::load_config(root)?;
    let store = load(root, &config)?;
    Ok((config, store))
}

/// Build the store from the source directory at `root`.
pub fn load(root: &Path, config: &GeneratorConfig) -> Result<Store, LoadError> {
    let reference = load_reference(&root.join(&config.reference_file))?;

    let channels_dir = root.join(&config.channels_dir);
    if !channels_dir.is_dir() {
        return Err(LoadError::MissingChannelsDir(channels_dir));
    }

    let mut channels = Vec::new();
    let mut playlist_count = 0;
    for entry in WalkDir::new(&channels_dir).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || !is_playlist(path) {
            continue;
        }
        playlist_count += 1;

        let filename = path
            .strip_prefix(&channels_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");
        let content = fs::read_to_string(path)?;
        let entries = m3u::parse_playlist(&content);
        debug!("{}: {} entries", filename, entries.len());

        channels.extend(
            entries
                .iter()
                .map(|raw| resolve_channel(raw, &reference, config, &filename)),
        );
    }

    info!(
        "Loaded {} channels from {} playlists ({} categories, {} countries, {} languages)",
        channels.len(),
        playlist_count,
        reference.categories.len(),
        reference.countries.len(),
        reference.languages.len()
    );

    Ok(Store::new(
        channels,
        reference.categories,
        reference.countries,
        reference.languages,
    ))
}

/// Read and parse the reference lists. Country codes are lowercased.
///
/// The sentinel ids (`other` for categories, `undefined` for countries and
/// languages) name the unassociated buckets and their output files, so a
/// reference entry may not use them.
pub fn load_reference(path: &Path) -> Result<ReferenceData, LoadError> {
    if !path.is_file() {
        return Err(LoadError::MissingReference(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    let mut reference: ReferenceData = toml::from_str(&content)?;
    for country in &mut reference.countries {
        country.code = country.code.to_lowercase();
    }

    let reserved = reference
        .categories
        .iter()
        .filter(|c| c.id.eq_ignore_ascii_case(OTHER_CATEGORY))
        .map(|c| ("category", &c.id))
        .chain(
            reference
                .countries
                .iter()
                .filter(|c| c.code.eq_ignore_ascii_case(UNDEFINED_CODE))
                .map(|c| ("country", &c.code)),
        )
        .chain(
            reference
                .languages
                .iter()
                .filter(|l| l.code.eq_ignore_ascii_case(UNDEFINED_CODE))
                .map(|l| ("language", &l.code)),
        )
        .next();
    if let Some((kind, id)) = reserved {
        return Err(LoadError::ReservedId {
            kind,
            id: id.clone(),
        });
    }

    Ok(reference)
}

fn is_playlist(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("m3u"))
        .unwrap_or(false)
}

/// Turn a raw playlist entry into a channel, resolving its associations.
fn resolve_channel(
    raw: &RawEntry,
    reference: &ReferenceData,
    config: &GeneratorConfig,
    filename: &str,
) -> Channel {
    let parsed = parse_title(&raw.title);

    let category = raw.attr("group-title").and_then(|title| {
        let found = reference
            .categories
            .iter()
            .find(|c| c.id.eq_ignore_ascii_case(title) || c.name.eq_ignore_ascii_case(title));
        if found.is_none() {
            debug!("{}:{}: unknown category '{}'", filename, raw.line, title);
        }
        found.cloned()
    });

    let mut countries: Vec<Country> = Vec::new();
    for code in split_list(raw.attr("tvg-country")) {
        match reference
            .countries
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
        {
            Some(country) if !countries.contains(country) => countries.push(country.clone()),
            Some(_) => {}
            None => debug!("{}:{}: unknown country '{}'", filename, raw.line, code),
        }
    }

    let mut languages: Vec<Language> = Vec::new();
    for name in split_list(raw.attr("tvg-language")) {
        match reference
            .languages
            .iter()
            .find(|l| l.name.eq_ignore_ascii_case(name))
        {
            Some(language) if !languages.contains(language) => languages.push(language.clone()),
            Some(_) => {}
            None => debug!("{}:{}: unknown language '{}'", filename, raw.line, name),
        }
    }

    let sfw = config.is_sfw_category(category.as_ref().map(|c| c.id.as_str()));

    Channel {
        name: parsed.name,
        url: raw.url.clone(),
        category,
        countries,
        languages,
        sfw,
        logo: raw.attr("tvg-logo").map(str::to_string),
        tvg_id: raw.attr("tvg-id").map(str::to_string),
        tvg_name: raw.attr("tvg-name").map(str::to_string),
        tvg_url: raw.attr("tvg-url").map(str::to_string),
        resolution: parsed.resolution,
        status: parsed.status,
        http: HttpOptions {
            referrer: raw.referrer.clone(),
            user_agent: raw
                .user_agent
                .clone()
                .or_else(|| raw.attr("user-agent").map(str::to_string)),
        },
        filename: filename.to_string(),
    }
}

/// Split a `;`-separated attribute into trimmed, non-empty items.
fn split_list(value: Option<&str>) -> impl Iterator<Item = &str> {
    value
        .unwrap_or("")
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn write_source(reference: &str, playlists: &[(&str, &str)]) -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("reference.toml"), reference).unwrap();
        let channels = tmp.path().join("channels");
        fs::create_dir_all(&channels).unwrap();
        for (name, content) in playlists {
            let path = channels.join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        tmp
    }

    const REFERENCE: &str = r#"
        [[categories]]
        id = "news"
        name = "News"

        [[categories]]
        id = "xxx"
        name = "XXX"

        [[countries]]
        code = "US"
        name = "United States"

        [[countries]]
        code = "ca"
        name = "Canada"

        [[languages]]
        code = "eng"
        name = "English"
    "#;

    #[test]
    fn fixtures_load() {
        let tmp = setup_fixtures();
        let (config, store) = load_source(tmp.path()).unwrap();
        assert_eq!(config.channels_dir, "channels");
        assert!(!store.all_channels().is_empty());
        assert!(!store.categories().is_empty());
        assert!(!store.countries().is_empty());
        assert!(!store.languages().is_empty());
    }

    #[test]
    fn resolves_associations() {
        let tmp = write_source(
            REFERENCE,
            &[(
                "us.m3u",
                "#EXTM3U\n#EXTINF:-1 tvg-id=\"cnn.us\" tvg-country=\"US;ca\" tvg-language=\"english\" group-title=\"news\",CNN (720p) [Geo-blocked]\nhttp://cnn\n",
            )],
        );
        let store = load(tmp.path(), &GeneratorConfig::default()).unwrap();
        let cnn = &store.all_channels()[0];
        assert_eq!(cnn.name, "CNN");
        assert_eq!(cnn.resolution, Some(720));
        assert_eq!(cnn.status.as_deref(), Some("Geo-blocked"));
        assert_eq!(cnn.category_id(), Some("news"));
        assert_eq!(cnn.category_name(), "News");
        let codes: Vec<&str> = cnn.countries.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["us", "ca"]);
        assert_eq!(cnn.languages[0].code, "eng");
        assert_eq!(cnn.tvg_id.as_deref(), Some("cnn.us"));
        assert_eq!(cnn.filename, "us.m3u");
        assert!(cnn.sfw);
    }

    #[test]
    fn unknown_references_are_left_unassociated() {
        let tmp = write_source(
            REFERENCE,
            &[(
                "x.m3u",
                "#EXTINF:-1 tvg-country=\"ZZ\" tvg-language=\"Klingon\" group-title=\"Cooking\",Chef\nhttp://chef\n",
            )],
        );
        let store = load(tmp.path(), &GeneratorConfig::default()).unwrap();
        let chef = &store.all_channels()[0];
        assert!(chef.category.is_none());
        assert!(chef.countries.is_empty());
        assert!(chef.languages.is_empty());
    }

    #[test]
    fn nsfw_category_marks_channel() {
        let tmp = write_source(
            REFERENCE,
            &[("x.m3u", "#EXTINF:-1 group-title=\"XXX\",Adult\nhttp://adult\n")],
        );
        let store = load(tmp.path(), &GeneratorConfig::default()).unwrap();
        assert!(!store.all_channels()[0].sfw);
    }

    #[test]
    fn repeated_country_codes_collapse() {
        let tmp = write_source(
            REFERENCE,
            &[("x.m3u", "#EXTINF:-1 tvg-country=\"US;us\",A\nhttp://a\n")],
        );
        let store = load(tmp.path(), &GeneratorConfig::default()).unwrap();
        assert_eq!(store.all_channels()[0].countries.len(), 1);
    }

    #[test]
    fn user_agent_attribute_sets_http_option() {
        let tmp = write_source(
            REFERENCE,
            &[("x.m3u", "#EXTINF:-1 user-agent=\"Agent/1.0\",A\nhttp://a\n")],
        );
        let store = load(tmp.path(), &GeneratorConfig::default()).unwrap();
        assert_eq!(
            store.all_channels()[0].http.user_agent.as_deref(),
            Some("Agent/1.0")
        );
    }

    #[test]
    fn playlists_load_in_path_order() {
        let tmp = write_source(
            REFERENCE,
            &[
                ("b.m3u", "#EXTINF:-1,From B\nhttp://b\n"),
                ("a/nested.m3u", "#EXTINF:-1,From A\nhttp://a\n"),
                ("notes.txt", "#EXTINF:-1,Ignored\nhttp://ignored\n"),
            ],
        );
        let store = load(tmp.path(), &GeneratorConfig::default()).unwrap();
        let files: Vec<&str> = store
            .all_channels()
            .iter()
            .map(|c| c.filename.as_str())
            .collect();
        assert_eq!(files, vec!["a/nested.m3u", "b.m3u"]);
    }

    #[test]
    fn duplicates_are_kept_at_load() {
        let entry = "#EXTINF:-1,A\nhttp://a\n";
        let tmp = write_source(REFERENCE, &[("one.m3u", entry), ("two.m3u", entry)]);
        let store = load(tmp.path(), &GeneratorConfig::default()).unwrap();
        assert_eq!(store.all_channels().len(), 2);
    }

    #[test]
    fn country_codes_are_lowercased() {
        let tmp = write_source(REFERENCE, &[]);
        let store = load(tmp.path(), &GeneratorConfig::default()).unwrap();
        assert_eq!(store.countries()[0].code, "us");
    }

    #[test]
    fn missing_reference_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("channels")).unwrap();
        let result = load(tmp.path(), &GeneratorConfig::default());
        assert!(matches!(result, Err(LoadError::MissingReference(_))));
    }

    #[test]
    fn missing_channels_dir_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("reference.toml"), REFERENCE).unwrap();
        let result = load(tmp.path(), &GeneratorConfig::default());
        assert!(matches!(result, Err(LoadError::MissingChannelsDir(_))));
    }

    #[test]
    fn invalid_reference_is_error() {
        let tmp = write_source("[[countries]]\ncode = 1\n", &[]);
        let result = load(tmp.path(), &GeneratorConfig::default());
        assert!(matches!(result, Err(LoadError::Toml(_))));
    }

    #[test]
    fn reserved_category_id_is_rejected() {
        let tmp = write_source(
            "[[categories]]\nid = \"other\"\nname = \"Other\"\n",
            &[(
                "x.m3u",
                "#EXTINF:-1 group-title=\"Other\",Tagged\nhttp://t\n#EXTINF:-1,Bare\nhttp://b\n",
            )],
        );
        match load_source(tmp.path()) {
            Err(LoadError::ReservedId { kind, id }) => {
                assert_eq!(kind, "category");
                assert_eq!(id, "other");
            }
            other => panic!("expected ReservedId, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn reserved_country_and_language_codes_are_rejected() {
        let tmp = write_source("[[countries]]\ncode = \"UNDEFINED\"\nname = \"Nowhere\"\n", &[]);
        let result = load(tmp.path(), &GeneratorConfig::default());
        assert!(matches!(
            result,
            Err(LoadError::ReservedId { kind: "country", .. })
        ));

        let tmp = write_source("[[languages]]\ncode = \"undefined\"\nname = \"None\"\n", &[]);
        let result = load(tmp.path(), &GeneratorConfig::default());
        assert!(matches!(
            result,
            Err(LoadError::ReservedId { kind: "language", .. })
        ));
    }

    #[test]
    fn custom_channels_dir_from_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("reference.toml"), REFERENCE).unwrap();
        fs::write(tmp.path().join("config.toml"), "channels_dir = \"streams\"\n").unwrap();
        fs::create_dir_all(tmp.path().join("streams")).unwrap();
        fs::write(
            tmp.path().join("streams/a.m3u"),
            "#EXTINF:-1,A\nhttp://a\n",
        )
        .unwrap();
        let (_, store) = load_source(tmp.path()).unwrap();
        assert_eq!(store.all_channels().len(), 1);
    }
}
