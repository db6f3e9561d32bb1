//! # Channel Index
//!
//! A static site generator that publishes a channel database as a tree of M3U
//! playlists and a JSON export, ready to be served from any static host.
//!
//! # Architecture: Load, Query, Write
//!
//! ```text
//! 1. Load      source/  →  Store           (reference lists + parsed playlists)
//! 2. Query     Store    →  ordered views   (filter, sort, dedupe per artifact)
//! 3. Write     views    →  .gh-pages/      (playlists + channels.json)
//! ```
//!
//! The store is built once and never mutated. Every artifact is a fresh
//! [`query::Query`] over it, so the order in which artifacts are generated
//! cannot affect their content.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`load`] | Reads `reference.toml` and walks the channel playlists into a [`store::Store`] |
//! | [`m3u`] | Extended-M3U reader for source playlists |
//! | [`naming`] | Splits titles like `CNN (720p) [Geo-blocked]` into name, resolution, status |
//! | [`store`] | Immutable entity snapshot |
//! | [`query`] | Filter / sort / dedupe builder over the channels |
//! | [`playlist`] | Playlist entry and JSON record serialization |
//! | [`generate`] | Artifact policy and file writing |
//! | [`config`] | `config.toml` loading, merging, and validation |
//! | [`types`] | Channel and reference entity types |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Deduplication After Sorting
//!
//! The same `(name, url)` pair can appear in several source playlists with
//! different metadata. Which copy survives is defined as "the first under the
//! artifact's sort order", so the query builder always applies duplicate
//! removal after sorting, whatever order the builder methods were called in.
//!
//! ## Labels as Parameters
//!
//! The country and language indexes show the country or language name where
//! the category would normally go. The label is an argument to the entry
//! formatter; channels are never rewritten, not even temporarily.
//!
//! ## Sentinel Buckets
//!
//! Channels without a category, country or language are not dropped. They are
//! published under `other` (categories) or `undefined` (countries and
//! languages), so every channel is reachable from each per-dimension listing.

pub mod config;
pub mod generate;
pub mod load;
pub mod m3u;
pub mod naming;
pub mod output;
pub mod playlist;
pub mod query;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
