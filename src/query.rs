//! Read-only query service over the merged content snapshot.
//!
//! A [`Repository`] owns one [`Collection`] per content type plus the
//! [`AuthorDirectory`]. It is built once (normally by [`crate::load`]) and
//! then only read. Every query recomputes the merged view of the collection
//! it touches and works on borrowed items, so results are plain
//! `Vec<&ContentItem>` tied to the repository's lifetime.
//!
//! Misses are never errors: an unknown id or slug is `None`, an unknown tag
//! or a type with no collection is an empty list.
//!
//! ## Ordering
//!
//! | Query | Order |
//! |-------|-------|
//! | `all`, `featured`, `by_tag`, `search`, `news_by_category` | merged order |
//! | `recent`, `related` | `date` descending, stable (ties keep merged order) |
//! | `all_tags` | lexicographic, de-duplicated |
//!
//! Search results are deliberately **not** ranked or sorted by date.

use crate::authors::AuthorDirectory;
use crate::catalog::Collection;
use crate::model::{
    Author, AuthorRef, ContentError, ContentItem, ContentType, Details, NewsCategory,
};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

/// Default number of items returned by [`Repository::recent`] callers.
pub const DEFAULT_RECENT_LIMIT: usize = 5;
/// Default number of items returned by [`Repository::related`] callers.
pub const DEFAULT_RELATED_LIMIT: usize = 3;

/// Immutable content snapshot with the query operations the site uses.
#[derive(Debug, Clone, Default)]
pub struct Repository {
    collections: BTreeMap<ContentType, Collection>,
    authors: AuthorDirectory,
}

impl Repository {
    /// Assemble a repository, checking that every author id referenced by
    /// any registered item (base or override) exists in the directory.
    pub fn new(
        collections: impl IntoIterator<Item = Collection>,
        authors: AuthorDirectory,
    ) -> Result<Self, ContentError> {
        let mut by_type = BTreeMap::new();
        for collection in collections {
            let content_type = collection.content_type();
            if by_type.insert(content_type, collection).is_some() {
                return Err(ContentError::DuplicateCollection(content_type));
            }
        }

        for collection in by_type.values() {
            for item in collection.base().iter().chain(collection.overrides()) {
                if let AuthorRef::Id(author) = &item.author
                    && !authors.contains(author)
                {
                    return Err(ContentError::UnknownAuthor {
                        content_type: collection.content_type(),
                        id: item.id.clone(),
                        author: author.clone(),
                    });
                }
            }
            info!(
                content_type = %collection.content_type(),
                base = collection.base().len(),
                overrides = collection.overrides().len(),
                "registered collection"
            );
        }

        Ok(Self {
            collections: by_type,
            authors,
        })
    }

    pub fn collection(&self, content_type: ContentType) -> Option<&Collection> {
        self.collections.get(&content_type)
    }

    /// Content types that have a registered collection, in [`ContentType`] order.
    pub fn content_types(&self) -> impl Iterator<Item = ContentType> + '_ {
        self.collections.keys().copied()
    }

    pub fn authors(&self) -> &AuthorDirectory {
        &self.authors
    }

    /// Every item of `content_type`, base merged with overrides.
    pub fn all(&self, content_type: ContentType) -> Vec<&ContentItem> {
        self.collection(content_type)
            .map(Collection::merged)
            .unwrap_or_default()
    }

    pub fn featured(&self, content_type: ContentType) -> Vec<&ContentItem> {
        self.filtered(content_type, |item| item.featured)
    }

    /// The `limit` newest items. Equal dates keep their merged order.
    pub fn recent(&self, content_type: ContentType, limit: usize) -> Vec<&ContentItem> {
        let mut items = self.all(content_type);
        sort_newest_first(&mut items);
        items.truncate(limit);
        items
    }

    /// Items carrying exactly `tag` (case-sensitive).
    pub fn by_tag(&self, content_type: ContentType, tag: &str) -> Vec<&ContentItem> {
        self.filtered(content_type, |item| item.has_tag(tag))
    }

    pub fn by_id(&self, content_type: ContentType, id: &str) -> Option<&ContentItem> {
        self.all(content_type).into_iter().find(|item| item.id == id)
    }

    pub fn by_slug(&self, content_type: ContentType, slug: &str) -> Option<&ContentItem> {
        self.all(content_type)
            .into_iter()
            .find(|item| item.slug == slug)
    }

    /// Up to `limit` other items sharing at least one tag with item `id`,
    /// newest first.
    ///
    /// Empty when `id` is unknown or the item has no tags. Overlap is a
    /// yes/no test; how many tags are shared does not affect the order.
    pub fn related(&self, content_type: ContentType, id: &str, limit: usize) -> Vec<&ContentItem> {
        let items = self.all(content_type);
        let Some(source) = items.iter().copied().find(|item| item.id == id) else {
            return Vec::new();
        };
        if source.tags.is_empty() {
            return Vec::new();
        }

        let mut related: Vec<&ContentItem> = items
            .into_iter()
            .filter(|item| item.id != source.id && item.shares_tag_with(source))
            .collect();
        sort_newest_first(&mut related);
        related.truncate(limit);
        related
    }

    /// Every tag used in the merged collection, sorted and de-duplicated.
    pub fn all_tags(&self, content_type: ContentType) -> Vec<&str> {
        self.all(content_type)
            .into_iter()
            .flat_map(|item| item.tags.iter().map(String::as_str))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Case-insensitive substring search.
    ///
    /// An item matches when the query occurs in any language variant of its
    /// title, description or excerpt, in any of its tags, or in its category
    /// code (plus the news category for news items). An empty query matches
    /// everything. Results keep merged order.
    pub fn search(&self, content_type: ContentType, query: &str) -> Vec<&ContentItem> {
        let needle = query.to_lowercase();
        self.filtered(content_type, |item| matches_query(item, &needle))
    }

    /// News items of one editorial category, in merged order.
    pub fn news_by_category(&self, category: NewsCategory) -> Vec<&ContentItem> {
        self.filtered(ContentType::News, |item| {
            item.news_category() == Some(category)
        })
    }

    /// The author credited on `item`.
    pub fn author_of<'a>(&'a self, item: &'a ContentItem) -> Option<&'a Author> {
        self.authors.resolve(&item.author)
    }

    /// Serializable view of every merged collection and the author list.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            collections: self
                .collections
                .iter()
                .map(|(content_type, collection)| (*content_type, collection.merged()))
                .collect(),
            authors: self.authors.iter().collect(),
        }
    }

    fn filtered<F>(&self, content_type: ContentType, keep: F) -> Vec<&ContentItem>
    where
        F: Fn(&ContentItem) -> bool,
    {
        self.all(content_type)
            .into_iter()
            .filter(|item| keep(*item))
            .collect()
    }
}

/// The merged content as written by the `export` command.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub collections: BTreeMap<ContentType, Vec<&'a ContentItem>>,
    pub authors: Vec<&'a Author>,
}

/// Stable sort, newest `date` first.
fn sort_newest_first(items: &mut [&ContentItem]) {
    items.sort_by(|a, b| b.date.cmp(&a.date));
}

/// `needle` must already be lowercase.
fn matches_query(item: &ContentItem, needle: &str) -> bool {
    let contains = |text: &str| text.to_lowercase().contains(needle);

    let in_text = [Some(&item.title), Some(&item.description), item.excerpt.as_ref()]
        .into_iter()
        .flatten()
        .any(|field| field.variants().any(|(_, text)| contains(text)));

    in_text
        || item.tags.iter().any(|tag| contains(tag.as_str()))
        || contains(item.category().code())
        || match &item.details {
            Details::News(news) => contains(news.news_category.code()),
            _ => false,
        }
}
