//! Author directory.
//!
//! Authors are shared many-to-one by content items. An item either embeds
//! its author or names one by id; the directory resolves ids and keeps the
//! order authors were listed in for display.

use crate::model::{Author, AuthorRef, ContentError};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct AuthorDirectory {
    authors: Vec<Author>,
    index: HashMap<String, usize>,
}

impl AuthorDirectory {
    /// Build a directory, rejecting duplicate ids.
    pub fn new(authors: Vec<Author>) -> Result<Self, ContentError> {
        let mut index = HashMap::with_capacity(authors.len());
        for (pos, author) in authors.iter().enumerate() {
            if index.insert(author.id.clone(), pos).is_some() {
                return Err(ContentError::DuplicateAuthor(author.id.clone()));
            }
        }
        Ok(Self { authors, index })
    }

    pub fn get(&self, id: &str) -> Option<&Author> {
        self.index.get(id).map(|&pos| &self.authors[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Resolve an item's author reference. Embedded authors resolve to
    /// themselves; ids resolve through the directory.
    pub fn resolve<'a>(&'a self, author: &'a AuthorRef) -> Option<&'a Author> {
        match author {
            AuthorRef::Embedded(author) => Some(author),
            AuthorRef::Id(id) => self.get(id),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Author> {
        self.authors.iter()
    }

    pub fn len(&self) -> usize {
        self.authors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }
}
