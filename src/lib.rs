//! # Site Content
//!
//! The content layer of a multilingual marketing site: articles, news, case
//! studies and product updates, each available in English, Hungarian and
//! German, with English as the fallback for any text not yet translated.
//!
//! # Architecture: Load Once, Query Many
//!
//! ```text
//! content/  →  load  →  Repository (frozen)  →  queries / CLI output
//! ```
//!
//! Loading is the only phase that can fail. It reads JSON records, validates
//! them into [`model::ContentItem`]s and registers them per content type as a
//! base catalog plus an override registry. Once a [`query::Repository`] exists
//! it is immutable, so every query is a pure function of the snapshot and can
//! be called from any number of threads.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`locale`] | Supported languages, `LocalizedText`, the English fallback rule |
//! | [`naming`] | `NNN-name` file-name convention and URL-safe slug check |
//! | [`model`] | Content types, items, authors, ingestion errors |
//! | [`record`] | Partial on-disk records and their validation into items |
//! | [`catalog`] | Base catalog + override registry per type, and the merge rule |
//! | [`authors`] | Author directory and author reference resolution |
//! | [`query`] | `Repository`: listing, recency, tags, related content, search |
//! | [`config`] | `content.toml` loading, stock defaults, layering, validation |
//! | [`load`] | Filesystem content source producing a `Repository` |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Overrides Replace Whole Records
//!
//! An override with the same id as a base item replaces it entirely. Nothing
//! is merged field by field, so an override must be complete, and the record
//! validation rejects an incomplete one when it is registered.
//!
//! ## Closed Enums for Categories
//!
//! Content types and news categories are enums, and type-specific fields live
//! in the variant of [`model::Details`] for that type. An item's category is
//! derived from its details and cannot disagree with its collection.
//!
//! ## Unique Ids and Slugs
//!
//! Duplicate ids inside one side of a collection, and duplicate slugs in the
//! merged view, fail registration. Lookups by id or slug therefore have at
//! most one answer.
//!
//! ## Stable Ordering
//!
//! The merged view is surviving base items in catalog order followed by all
//! overrides in registry order. Recency and related-content listings sort by
//! date with a stable sort, so ties keep that order. Search does not rank.

pub mod authors;
pub mod catalog;
pub mod config;
pub mod load;
pub mod locale;
pub mod model;
pub mod naming;
pub mod output;
pub mod query;
pub mod record;

#[cfg(test)]
pub(crate) mod test_helpers;
