//! Shared test utilities for the site-content test suite.
//!
//! Provides item and record builders, a one-call repository constructor, and
//! lookup helpers that panic with the available ids on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let repo = repository(
//!     ContentType::Article,
//!     vec![article("a1", "2024-01-15", &["x"])],
//!     vec![],
//! );
//! assert_eq!(ids(&repo.all(ContentType::Article)), vec!["a1"]);
//!
//! let tmp = setup_fixtures();
//! let loaded = load(tmp.path()).unwrap();
//! let item = find_item(&loaded.repository, ContentType::News, "n-expo");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::authors::AuthorDirectory;
use crate::catalog::Collection;
use crate::locale::{Language, LocalizedText};
use crate::model::{
    Author, AuthorRef, ContentItem, ContentType, Details, NewsCategory, NewsDetails,
};
use crate::query::Repository;
use crate::record::{ItemRecord, parse_date};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Item builders
// =========================================================================

fn text(en: &str) -> LocalizedText {
    LocalizedText::new(en).unwrap()
}

fn item(id: &str, date: &str, tags: &[&str], details: Details) -> ContentItem {
    let content_type = details.content_type();
    ContentItem {
        id: id.to_string(),
        slug: format!("{id}-slug"),
        title: text(&format!("{} {id}", content_type.label())),
        description: text(&format!("About {id}")),
        content: text(&format!("Body of {id}")),
        excerpt: Some(text(&format!("Excerpt {id}"))),
        image: format!("images/{id}.webp"),
        thumbnail_image: None,
        date: parse_date(date).unwrap(),
        updated_at: None,
        author: AuthorRef::Id("jane".to_string()),
        read_time: 4,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        featured: false,
        custom_url: None,
        details,
    }
}

/// A complete article credited to `jane`, slug `{id}-slug`.
pub fn article(id: &str, date: &str, tags: &[&str]) -> ContentItem {
    item(id, date, tags, Details::Article)
}

/// A complete news item of the given editorial category.
pub fn news(id: &str, date: &str, category: NewsCategory, tags: &[&str]) -> ContentItem {
    item(
        id,
        date,
        tags,
        Details::News(NewsDetails {
            news_category: category,
            source: None,
            location: None,
            urgent: false,
        }),
    )
}

/// Author named `Name {id}`, role "Author" with a Hungarian variant.
pub fn author(id: &str) -> Author {
    Author {
        id: id.to_string(),
        name: format!("Name {id}"),
        role: text("Author").with(Language::Hu, format!("Szerző {id}")),
        avatar: None,
    }
}

// =========================================================================
// Record builders
// =========================================================================

/// A record with every field an article needs.
pub fn full_record(id: &str) -> ItemRecord {
    ItemRecord {
        id: Some(id.to_string()),
        slug: Some(format!("{id}-slug")),
        title: Some(text(&format!("Title {id}")).with(Language::Hu, format!("Cím {id}"))),
        description: Some(text(&format!("About {id}"))),
        content: Some(text(&format!("Body of {id}"))),
        image: Some(format!("images/{id}.webp")),
        date: Some("2024-01-15".to_string()),
        author: Some(AuthorRef::Id("jane".to_string())),
        read_time: Some(5),
        tags: Some(vec!["manufacturing".to_string()]),
        ..ItemRecord::default()
    }
}

pub fn news_record(id: &str) -> ItemRecord {
    ItemRecord {
        news_category: Some(NewsCategory::Industry),
        location: Some("Győr".to_string()),
        urgent: Some(true),
        ..full_record(id)
    }
}

pub fn case_study_record(id: &str) -> ItemRecord {
    ItemRecord {
        client: Some("Acme Automotive".to_string()),
        industry: Some("Automotive".to_string()),
        results: Some(vec![text("Scrap rate down 30%")]),
        ..full_record(id)
    }
}

// =========================================================================
// Repository helpers
// =========================================================================

/// A repository holding one collection, with `jane` in the author directory.
pub fn repository(
    content_type: ContentType,
    base: Vec<ContentItem>,
    overrides: Vec<ContentItem>,
) -> Repository {
    let collection = Collection::new(content_type, base, overrides).unwrap();
    let authors = AuthorDirectory::new(vec![author("jane")]).unwrap();
    Repository::new([collection], authors).unwrap()
}

/// Ids of `items`, in order.
pub fn ids<'a>(items: &[&'a ContentItem]) -> Vec<&'a str> {
    items.iter().map(|item| item.id.as_str()).collect()
}

/// Find an item by id in the merged view. Panics if not found.
pub fn find_item<'a>(repo: &'a Repository, content_type: ContentType, id: &str) -> &'a ContentItem {
    repo.by_id(content_type, id).unwrap_or_else(|| {
        let all = repo.all(content_type);
        panic!(
            "{content_type} '{id}' not found. Available: {:?}",
            ids(&all)
        )
    })
}
