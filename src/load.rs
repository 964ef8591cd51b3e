//! Filesystem content source.
//!
//! Walks a content root and builds a [`Repository`] from it. Loading is the
//! only phase that touches the disk or can fail; once [`load`] returns, the
//! repository is frozen and every query is infallible.
//!
//! ## Layout
//!
//! ```text
//! content/
//! ├── content.toml                  # optional, see crate::config
//! ├── authors.json                  # [ { "id": ..., "name": ..., "role": {...} }, ... ]
//! ├── articles/
//! │   ├── 010-lean-production.json  # base catalog record
//! │   ├── 020-sustainable-steel.json
//! │   └── custom/                   # override registry
//! │       └── 010-lean-production.json
//! ├── news/
//! ├── case-studies/
//! └── updates/
//! ```
//!
//! ## Rules
//!
//! - A missing collection directory, override directory or authors file is
//!   treated as empty.
//! - Only `*.json` files are records. Hidden entries are ignored silently;
//!   anything else is skipped with a warning.
//! - Records are ordered by their `NNN-` prefix, then by file name.
//!   Unnumbered files come after numbered ones. This order is the catalog's
//!   insertion order.
//! - A record without a `slug` takes the file name minus its number prefix.
//! - Errors carry the path of the offending file.

use crate::authors::AuthorDirectory;
use crate::catalog::Collection;
use crate::config::{self, ConfigError, ContentConfig};
use crate::model::{Author, ContentError, ContentType, Origin};
use crate::naming::{ParsedName, parse_entry_name};
use crate::query::Repository;
use crate::record::ItemRecord;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{path}: {source}")]
    Content { path: PathBuf, source: ContentError },
    #[error("{0}")]
    Invalid(#[from] ContentError),
    #[error("Content root not found: {0}")]
    MissingRoot(PathBuf),
}

/// Everything read from a content root.
#[derive(Debug)]
pub struct LoadedContent {
    pub config: ContentConfig,
    pub repository: Repository,
}

/// Load the content tree under `root`.
pub fn load(root: &Path) -> Result<LoadedContent, LoadError> {
    if !root.is_dir() {
        return Err(LoadError::MissingRoot(root.to_path_buf()));
    }
    let config = config::load_config(root)?;
    let authors = load_authors(&root.join(&config.layout.authors_file))?;

    let mut collections = Vec::with_capacity(ContentType::ALL.len());
    for content_type in ContentType::ALL {
        collections.push(load_collection(root, content_type, &config)?);
    }

    let repository = Repository::new(collections, authors)?;
    Ok(LoadedContent { config, repository })
}

fn load_authors(path: &Path) -> Result<AuthorDirectory, LoadError> {
    if !path.is_file() {
        debug!(path = %path.display(), "no authors file");
        return Ok(AuthorDirectory::default());
    }
    let authors: Vec<Author> = read_json(path)?;
    debug!(path = %path.display(), count = authors.len(), "loaded authors");
    Ok(AuthorDirectory::new(authors)?)
}

fn load_collection(
    root: &Path,
    content_type: ContentType,
    config: &ContentConfig,
) -> Result<Collection, LoadError> {
    let dir = root.join(content_type.dir_name());
    if !dir.is_dir() {
        debug!(%content_type, dir = %dir.display(), "no collection directory");
        return Ok(Collection::empty(content_type));
    }

    let overrides_dir = config.layout.overrides_dir.as_str();
    let base = load_records(&dir, content_type, Origin::Base, Some(overrides_dir))?;
    let custom = dir.join(overrides_dir);
    let overrides = if custom.is_dir() {
        load_records(&custom, content_type, Origin::Override, None)?
    } else {
        Vec::new()
    };

    Collection::from_records(content_type, base, overrides, |path, source| {
        LoadError::Content { path, source }
    })
}

/// Read every record file directly inside `dir`, in catalog order, keyed by
/// its path. Validation happens when the collection is registered.
///
/// `expected_subdir` names a sub-directory that is allowed to exist without
/// a warning (the override registry).
fn load_records(
    dir: &Path,
    content_type: ContentType,
    origin: Origin,
    expected_subdir: Option<&str>,
) -> Result<Vec<(PathBuf, ItemRecord)>, LoadError> {
    let mut records = Vec::new();
    for RecordFile { path, name } in collect_record_files(dir, expected_subdir)? {
        let mut record: ItemRecord = read_json(&path)?;
        if record.slug.is_none() && !name.name.is_empty() {
            record.slug = Some(name.name);
        }
        debug!(%content_type, %origin, path = %path.display(), "read record");
        records.push((path, record));
    }
    Ok(records)
}

struct RecordFile {
    path: PathBuf,
    /// Parsed file stem.
    name: ParsedName,
}

/// JSON files directly inside `dir`, sorted by number prefix, then name,
/// then full file name.
fn collect_record_files(
    dir: &Path,
    expected_subdir: Option<&str>,
) -> Result<Vec<RecordFile>, LoadError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        if entry.file_type().is_dir() {
            if expected_subdir != Some(name.as_str()) {
                warn!(path = %entry.path().display(), "skipping unexpected directory");
            }
            continue;
        }
        let is_json = entry
            .path()
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if !is_json {
            warn!(path = %entry.path().display(), "skipping non-JSON file");
            continue;
        }
        let stem = entry
            .path()
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        files.push(RecordFile {
            name: parse_entry_name(&stem),
            path: entry.into_path(),
        });
    }

    files.sort_by(|a, b| {
        (a.name.sort_key(), a.path.file_name()).cmp(&(b.name.sort_key(), b.path.file_name()))
    });
    Ok(files)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Language;
    use crate::model::{AuthorRef, Details, NewsCategory};
    use crate::test_helpers::{find_item, ids, setup_fixtures};
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, body: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }

    fn minimal(id: &str, date: &str) -> String {
        format!(
            r#"{{
                "id": "{id}",
                "title": {{"en": "Title {id}"}},
                "description": {{"en": "About {id}"}},
                "content": {{"en": "Body {id}"}},
                "image": "images/{id}.webp",
                "date": "{date}",
                "author": "jane",
                "readTime": 3
            }}"#
        )
    }

    const AUTHORS: &str = r#"[{"id": "jane", "name": "Jane", "role": {"en": "Editor"}}]"#;

    // =========================================================================
    // Fixture tree
    // =========================================================================

    #[test]
    fn fixtures_load_every_collection() {
        let tmp = setup_fixtures();
        let loaded = load(tmp.path()).unwrap();
        let repo = &loaded.repository;

        assert_eq!(
            ids(&repo.all(ContentType::Article)),
            vec!["a-steel", "a-twins", "a-energy", "a-lean"]
        );
        assert_eq!(
            ids(&repo.all(ContentType::News)),
            vec!["n-expo", "n-iso", "n-press", "n-plant"]
        );
        assert_eq!(ids(&repo.all(ContentType::CaseStudy)), vec!["cs-auto", "cs-pack"]);
        assert!(repo.all(ContentType::Update).is_empty());
        assert_eq!(repo.authors().len(), 3);
    }

    #[test]
    fn fixtures_config_applied() {
        let tmp = setup_fixtures();
        let loaded = load(tmp.path()).unwrap();
        assert_eq!(loaded.config.queries.recent_limit, 3);
        assert_eq!(loaded.config.queries.related_limit, 3);
    }

    #[test]
    fn fixture_override_replaces_base_article() {
        let tmp = setup_fixtures();
        let loaded = load(tmp.path()).unwrap();
        let repo = &loaded.repository;

        let lean = find_item(repo, ContentType::Article, "a-lean");
        assert_eq!(lean.slug, "lean-production");
        assert_eq!(lean.custom_url.as_deref(), Some("/resources/lean-production"));
        assert_eq!(lean.date.to_string(), "2024-06-01");
        assert!(!lean.featured);
        assert!(!repo.all_tags(ContentType::Article).contains(&"kaizen"));
        assert!(repo.featured(ContentType::Article).is_empty());
    }

    #[test]
    fn fixture_localized_fields_resolve_with_fallback() {
        let tmp = setup_fixtures();
        let loaded = load(tmp.path()).unwrap();
        let repo = &loaded.repository;

        let twins = find_item(repo, ContentType::Article, "a-twins");
        assert_ne!(twins.title.resolve(Language::Hu), twins.title.english());
        assert_eq!(twins.title.resolve(Language::De), twins.title.english());
    }

    #[test]
    fn fixture_authors_by_id_and_embedded() {
        let tmp = setup_fixtures();
        let loaded = load(tmp.path()).unwrap();
        let repo = &loaded.repository;

        let steel = find_item(repo, ContentType::Article, "a-steel");
        assert_eq!(repo.author_of(steel).unwrap().name, "Anna Schmidt");

        let energy = find_item(repo, ContentType::Article, "a-energy");
        assert!(matches!(energy.author, AuthorRef::Embedded(_)));
        assert_eq!(repo.author_of(energy).unwrap().id, "guest-lukas");
    }

    #[test]
    fn fixture_news_details() {
        let tmp = setup_fixtures();
        let loaded = load(tmp.path()).unwrap();
        let repo = &loaded.repository;

        let press = find_item(repo, ContentType::News, "n-press");
        match &press.details {
            Details::News(news) => {
                assert_eq!(news.news_category, NewsCategory::Product);
                assert!(news.urgent);
            }
            other => panic!("expected news details, got {other:?}"),
        }
        assert_eq!(ids(&repo.news_by_category(NewsCategory::Company)), vec!["n-plant"]);
    }

    // =========================================================================
    // Layout rules
    // =========================================================================

    #[test]
    fn missing_root_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = load(&tmp.path().join("nope"));
        assert!(matches!(result, Err(LoadError::MissingRoot(_))));
    }

    #[test]
    fn empty_root_loads_empty_repository() {
        let tmp = TempDir::new().unwrap();
        let loaded = load(tmp.path()).unwrap();
        for content_type in ContentType::ALL {
            assert!(loaded.repository.all(content_type).is_empty());
        }
        assert!(loaded.repository.authors().is_empty());
    }

    #[test]
    fn numbered_files_first_then_by_name() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "authors.json", AUTHORS);
        write(tmp.path(), "updates/zeta.json", &minimal("u-zeta", "2024-01-01"));
        write(tmp.path(), "updates/alpha.json", &minimal("u-alpha", "2024-01-01"));
        write(tmp.path(), "updates/020-second.json", &minimal("u-2", "2024-01-01"));
        write(tmp.path(), "updates/003-first.json", &minimal("u-1", "2024-01-01"));

        let loaded = load(tmp.path()).unwrap();
        assert_eq!(
            ids(&loaded.repository.all(ContentType::Update)),
            vec!["u-1", "u-2", "u-alpha", "u-zeta"]
        );
    }

    #[test]
    fn slug_defaults_to_file_name() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "authors.json", AUTHORS);
        write(tmp.path(), "updates/010-spring-release.json", &minimal("u1", "2024-01-01"));

        let loaded = load(tmp.path()).unwrap();
        let item = loaded
            .repository
            .by_slug(ContentType::Update, "spring-release")
            .unwrap();
        assert_eq!(item.id, "u1");
    }

    #[test]
    fn non_json_and_hidden_files_skipped() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "authors.json", AUTHORS);
        write(tmp.path(), "updates/010-one.json", &minimal("u1", "2024-01-01"));
        write(tmp.path(), "updates/README.md", "# notes");
        write(tmp.path(), "updates/.020-draft.json", "not even json");
        write(tmp.path(), "updates/drafts/030-wip.json", "not even json");

        let loaded = load(tmp.path()).unwrap();
        assert_eq!(ids(&loaded.repository.all(ContentType::Update)), vec!["u1"]);
    }

    #[test]
    fn configured_overrides_dir_used() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "authors.json", AUTHORS);
        write(tmp.path(), "content.toml", "[layout]\noverrides_dir = \"local\"\n");
        write(tmp.path(), "updates/010-one.json", &minimal("u1", "2024-01-01"));
        write(tmp.path(), "updates/local/010-one.json", &minimal("u1", "2024-09-09"));

        let loaded = load(tmp.path()).unwrap();
        let all = loaded.repository.all(ContentType::Update);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].date.to_string(), "2024-09-09");
    }

    // =========================================================================
    // Errors
    // =========================================================================

    #[test]
    fn partial_override_fails_with_path() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "authors.json", AUTHORS);
        write(tmp.path(), "updates/010-one.json", &minimal("u1", "2024-01-01"));
        write(
            tmp.path(),
            "updates/custom/010-one.json",
            r#"{"id": "u1", "featured": true}"#,
        );

        let err = load(tmp.path()).unwrap_err();
        match &err {
            LoadError::Content { path, source } => {
                assert!(path.ends_with("custom/010-one.json"));
                assert!(matches!(source, ContentError::MissingFields { .. }));
            }
            other => panic!("expected content error, got {other:?}"),
        }
        assert!(err.to_string().contains("missing required fields"));
    }

    #[test]
    fn invalid_json_reports_path() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "updates/010-broken.json", "{ \"id\": ");
        let err = load(tmp.path()).unwrap_err();
        assert!(matches!(err, LoadError::Json { ref path, .. } if path.ends_with("010-broken.json")));
    }

    #[test]
    fn unknown_author_fails_load() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "updates/010-one.json", &minimal("u1", "2024-01-01"));
        let err = load(tmp.path()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Invalid(ContentError::UnknownAuthor { .. })
        ));
    }

    #[test]
    fn duplicate_slug_across_files_fails_load() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "authors.json", AUTHORS);
        write(tmp.path(), "updates/010-same.json", &minimal("u1", "2024-01-01"));
        write(tmp.path(), "updates/020-same.json", &minimal("u2", "2024-01-02"));
        let err = load(tmp.path()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Invalid(ContentError::DuplicateSlug { .. })
        ));
    }

    #[test]
    fn custom_url_on_base_file_rejected() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "authors.json", AUTHORS);
        let body = minimal("u1", "2024-01-01").replacen('{', r#"{"customUrl": "/x","#, 1);
        write(tmp.path(), "updates/010-one.json", &body);
        let err = load(tmp.path()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Content {
                source: ContentError::CustomUrlOnBase { .. },
                ..
            }
        ));
    }
}
