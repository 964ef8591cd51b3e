//! Raw content records and their validation into [`ContentItem`]s.
//!
//! Records are what content files contain: every field optional, camelCase
//! keys, type-specific fields side by side. A record only becomes a
//! [`ContentItem`] through [`ItemRecord::into_item`], which is the single
//! place where completeness is checked. Base catalog records and override
//! records go through the same conversion, so an incomplete override is
//! rejected when it is registered instead of leaking half-filled items into
//! query results.
//!
//! ## Required fields
//!
//! | Field | Applies to |
//! |-------|------------|
//! | `id`, `slug`, `title`, `description`, `content`, `image`, `date`, `author`, `readTime` | all |
//! | `newsCategory` | news |
//! | `client` | case studies |
//!
//! Everything else is optional: `tags` defaults to empty, `featured` and
//! `urgent` to false.
//!
//! ## Field checks
//!
//! - `slug` must be URL-safe ([`is_url_safe_slug`])
//! - `readTime` must be positive
//! - tags must be non-empty; duplicates are dropped keeping the first
//! - `date` / `updatedAt` must be ISO-8601 dates or RFC 3339 timestamps; a
//!   timestamp keeps its time and offset
//! - `category`, if given, must match the collection
//! - `customUrl` only on override records
//! - type-specific fields only on their own type

use crate::locale::LocalizedText;
use crate::model::{
    AuthorRef, CaseStudyDetails, ContentError, ContentItem, ContentType, Details, NewsCategory,
    NewsDetails, Origin, PublishDate,
};
use crate::naming::is_url_safe_slug;
use serde::Deserialize;

/// A content record as written in a content file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ItemRecord {
    pub id: Option<String>,
    pub slug: Option<String>,
    pub category: Option<ContentType>,
    pub title: Option<LocalizedText>,
    pub description: Option<LocalizedText>,
    pub content: Option<LocalizedText>,
    pub excerpt: Option<LocalizedText>,
    pub image: Option<String>,
    pub thumbnail_image: Option<String>,
    pub date: Option<String>,
    pub updated_at: Option<String>,
    pub author: Option<AuthorRef>,
    pub read_time: Option<u32>,
    pub tags: Option<Vec<String>>,
    pub featured: Option<bool>,
    pub custom_url: Option<String>,

    // News
    pub news_category: Option<NewsCategory>,
    pub source: Option<String>,
    pub location: Option<String>,
    pub urgent: Option<bool>,

    // Case studies
    pub client: Option<String>,
    pub industry: Option<String>,
    pub results: Option<Vec<LocalizedText>>,
}

impl ItemRecord {
    /// Validate this record as a member of `content_type`'s collection.
    pub fn into_item(
        mut self,
        content_type: ContentType,
        origin: Origin,
    ) -> Result<ContentItem, ContentError> {
        let id = match self.id.take() {
            Some(id) if !id.trim().is_empty() => id,
            _ => return Err(ContentError::MissingId { content_type }),
        };
        let invalid = |field: &'static str, reason: String| ContentError::InvalidField {
            content_type,
            id: id.clone(),
            field,
            reason,
        };

        if let Some(declared) = self.category
            && declared != content_type
        {
            return Err(ContentError::CategoryMismatch {
                content_type,
                id,
                declared,
            });
        }
        if origin == Origin::Base && self.custom_url.is_some() {
            return Err(ContentError::CustomUrlOnBase { content_type, id });
        }
        reject_foreign_fields(&self, content_type, &invalid)?;

        let mut missing = Vec::new();
        macro_rules! require {
            ($field:expr, $name:literal) => {{
                if $field.is_none() {
                    missing.push($name);
                }
                $field
            }};
        }
        let slug = require!(self.slug, "slug");
        let title = require!(self.title, "title");
        let description = require!(self.description, "description");
        let content = require!(self.content, "content");
        let image = require!(self.image, "image");
        let date = require!(self.date, "date");
        let author = require!(self.author, "author");
        let read_time = require!(self.read_time, "readTime");
        let details = match content_type {
            ContentType::Article => Some(Details::Article),
            ContentType::Update => Some(Details::Update),
            ContentType::News => {
                require!(self.news_category, "newsCategory").map(|news_category| {
                    Details::News(NewsDetails {
                        news_category,
                        source: self.source,
                        location: self.location,
                        urgent: self.urgent.unwrap_or(false),
                    })
                })
            }
            ContentType::CaseStudy => require!(self.client, "client").map(|client| {
                Details::CaseStudy(CaseStudyDetails {
                    client,
                    industry: self.industry,
                    results: self.results.unwrap_or_default(),
                })
            }),
        };

        let (
            Some(slug),
            Some(title),
            Some(description),
            Some(content),
            Some(image),
            Some(date),
            Some(author),
            Some(read_time),
            Some(details),
        ) = (
            slug,
            title,
            description,
            content,
            image,
            date,
            author,
            read_time,
            details,
        )
        else {
            return Err(ContentError::MissingFields {
                content_type,
                id,
                fields: missing,
            });
        };

        if !is_url_safe_slug(&slug) {
            return Err(invalid(
                "slug",
                format!("'{slug}' is not lowercase alphanumerics separated by dashes"),
            ));
        }
        if read_time == 0 {
            return Err(invalid("readTime", "must be a positive number of minutes".into()));
        }
        let date = parse_date(&date).map_err(|reason| invalid("date", reason))?;
        let updated_at = self
            .updated_at
            .as_deref()
            .map(parse_date)
            .transpose()
            .map_err(|reason| invalid("updatedAt", reason))?;
        let tags = normalize_tags(self.tags.unwrap_or_default())
            .map_err(|reason| invalid("tags", reason))?;

        Ok(ContentItem {
            id,
            slug,
            title,
            description,
            content,
            excerpt: self.excerpt,
            image,
            thumbnail_image: self.thumbnail_image,
            date,
            updated_at,
            author,
            read_time,
            tags,
            featured: self.featured.unwrap_or(false),
            custom_url: self.custom_url,
            details,
        })
    }
}

/// Fields that belong to one content type must not appear on another.
fn reject_foreign_fields(
    record: &ItemRecord,
    content_type: ContentType,
    invalid: &impl Fn(&'static str, String) -> ContentError,
) -> Result<(), ContentError> {
    let news_fields = [
        ("newsCategory", record.news_category.is_some()),
        ("source", record.source.is_some()),
        ("location", record.location.is_some()),
        ("urgent", record.urgent.is_some()),
    ];
    let case_study_fields = [
        ("client", record.client.is_some()),
        ("industry", record.industry.is_some()),
        ("results", record.results.is_some()),
    ];
    let foreign: Vec<(&'static str, bool)> = match content_type {
        ContentType::News => case_study_fields.to_vec(),
        ContentType::CaseStudy => news_fields.to_vec(),
        ContentType::Article | ContentType::Update => news_fields
            .iter()
            .chain(&case_study_fields)
            .copied()
            .collect(),
    };
    match foreign.into_iter().find(|(_, present)| *present) {
        Some((field, _)) => Err(invalid(field, format!("not a {content_type} field"))),
        None => Ok(()),
    }
}

/// Parse an ISO-8601 calendar date or a full RFC 3339 timestamp.
pub fn parse_date(value: &str) -> Result<PublishDate, String> {
    value.parse()
}

/// Drop duplicate tags (first occurrence wins) and reject blank ones.
fn normalize_tags(tags: Vec<String>) -> Result<Vec<String>, String> {
    let mut seen = Vec::with_capacity(tags.len());
    for tag in tags {
        if tag.trim().is_empty() {
            return Err("tags must be non-empty strings".into());
        }
        if !seen.contains(&tag) {
            seen.push(tag);
        }
    }
    Ok(seen)
}
