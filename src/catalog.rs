//! Base catalog, override registry and the merge between them.
//!
//! Each content type has one [`Collection`]: the canonical base catalog plus
//! an override registry of custom entries. Both sides are validated and
//! frozen when the collection is registered; nothing mutates them afterwards.
//!
//! ## Merge rule
//!
//! ```text
//! merged = [base items whose id is not overridden] ++ [all override items]
//! ```
//!
//! Overrides replace a same-id base item **as a whole record**. No base field
//! survives into the merged view, even one the override leaves at its default.
//! The merged order is exactly the concatenation above; anything that needs
//! a different order sorts downstream.
//!
//! The merged view is recomputed on every call to [`Collection::merged`].
//! It borrows from the collection, so recomputing is a filter over two
//! slices, and there is nothing to invalidate.
//!
//! ## Uniqueness
//!
//! Registration rejects duplicate ids within the base catalog, duplicate ids
//! within the override registry, and duplicate slugs in the merged view.
//! Together with the merge rule this makes every id and slug occur exactly
//! once per type, so id/slug lookups have a single possible answer.

use crate::model::{ContentError, ContentItem, ContentType, Origin};
use crate::record::ItemRecord;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Merge a base catalog with an override registry.
///
/// Base items whose id appears among the overrides are dropped; all
/// overrides follow the surviving base items, in registry order.
pub fn merge<'a>(base: &'a [ContentItem], overrides: &'a [ContentItem]) -> Vec<&'a ContentItem> {
    let override_ids: HashSet<&str> = overrides.iter().map(|item| item.id.as_str()).collect();
    base.iter()
        .filter(|item| !override_ids.contains(item.id.as_str()))
        .chain(overrides)
        .collect()
}

/// One content type's base catalog and override registry.
#[derive(Debug, Clone)]
pub struct Collection {
    content_type: ContentType,
    base: Vec<ContentItem>,
    overrides: Vec<ContentItem>,
}

impl Collection {
    /// Register already-validated items.
    pub fn new(
        content_type: ContentType,
        base: Vec<ContentItem>,
        overrides: Vec<ContentItem>,
    ) -> Result<Self, ContentError> {
        check_side(content_type, &base, Origin::Base)?;
        check_side(content_type, &overrides, Origin::Override)?;

        let collection = Self {
            content_type,
            base,
            overrides,
        };
        collection.check_merged_slugs()?;

        for id in collection.superseded_ids() {
            debug!(%content_type, id, "override supersedes base item");
        }
        Ok(collection)
    }

    /// Validate raw records and register them.
    ///
    /// Each record travels with a caller-chosen key (the loader uses the file
    /// path). A record that fails validation is reported through `rejected`
    /// together with its key, so an override missing required fields fails
    /// here, at registration, with [`ContentError::MissingFields`].
    pub fn from_records<K, E>(
        content_type: ContentType,
        base: Vec<(K, ItemRecord)>,
        overrides: Vec<(K, ItemRecord)>,
        rejected: impl Fn(K, ContentError) -> E,
    ) -> Result<Self, E>
    where
        E: From<ContentError>,
    {
        let validate = |records: Vec<(K, ItemRecord)>, origin: Origin| {
            records
                .into_iter()
                .map(|(key, record)| {
                    record
                        .into_item(content_type, origin)
                        .map_err(|error| rejected(key, error))
                })
                .collect::<Result<Vec<_>, E>>()
        };
        let base = validate(base, Origin::Base)?;
        let overrides = validate(overrides, Origin::Override)?;
        Ok(Self::new(content_type, base, overrides)?)
    }

    /// An empty collection.
    pub fn empty(content_type: ContentType) -> Self {
        Self {
            content_type,
            base: Vec::new(),
            overrides: Vec::new(),
        }
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn base(&self) -> &[ContentItem] {
        &self.base
    }

    pub fn overrides(&self) -> &[ContentItem] {
        &self.overrides
    }

    /// The merged, queryable view. See the module docs for the rule.
    pub fn merged(&self) -> Vec<&ContentItem> {
        merge(&self.base, &self.overrides)
    }

    /// Ids of base items replaced by an override, in base order.
    pub fn superseded_ids(&self) -> Vec<&str> {
        let override_ids: HashSet<&str> =
            self.overrides.iter().map(|item| item.id.as_str()).collect();
        self.base
            .iter()
            .map(|item| item.id.as_str())
            .filter(|id| override_ids.contains(id))
            .collect()
    }

    fn check_merged_slugs(&self) -> Result<(), ContentError> {
        let mut seen: HashMap<&str, &str> = HashMap::new();
        for item in self.merged() {
            if let Some(first) = seen.insert(item.slug.as_str(), item.id.as_str()) {
                return Err(ContentError::DuplicateSlug {
                    content_type: self.content_type,
                    slug: item.slug.clone(),
                    first: first.to_string(),
                    second: item.id.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Every item belongs to the collection's type, ids are unique, and only
/// overrides carry a custom URL.
fn check_side(
    content_type: ContentType,
    items: &[ContentItem],
    origin: Origin,
) -> Result<(), ContentError> {
    let mut ids = HashSet::new();
    for item in items {
        if item.category() != content_type {
            return Err(ContentError::CategoryMismatch {
                content_type,
                id: item.id.clone(),
                declared: item.category(),
            });
        }
        if origin == Origin::Base && item.custom_url.is_some() {
            return Err(ContentError::CustomUrlOnBase {
                content_type,
                id: item.id.clone(),
            });
        }
        if !ids.insert(item.id.as_str()) {
            return Err(ContentError::DuplicateId {
                content_type,
                id: item.id.clone(),
                origin,
            });
        }
    }
    Ok(())
}
