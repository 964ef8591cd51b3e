//! Content model shared by every stage: loader, catalog, queries and output.
//!
//! A [`ContentItem`] is one published unit (article, news item, case study,
//! update). Fields common to all of them live on the item itself; fields
//! that only make sense for one type live in [`Details`], a closed enum whose
//! variant *is* the item's category. There is no separate category string
//! that could disagree with the collection an item belongs to.
//!
//! Items are never built field-by-field by hand in production code: they are
//! produced by validating an [`ItemRecord`](crate::record::ItemRecord), which
//! is where required fields, tag hygiene and slug safety are enforced.
//!
//! Items serialize back to the same camelCase shape they are read from, with
//! the category flattened in as a `"category"` key. The `export` command
//! relies on this.

use crate::locale::LocalizedText;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The kind of content a collection holds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ContentType {
    Article,
    News,
    CaseStudy,
    Update,
}

impl ContentType {
    pub const ALL: [ContentType; 4] = [
        ContentType::Article,
        ContentType::News,
        ContentType::CaseStudy,
        ContentType::Update,
    ];

    /// Category code carried by every item of this type.
    pub const fn code(self) -> &'static str {
        match self {
            ContentType::Article => "article",
            ContentType::News => "news",
            ContentType::CaseStudy => "case-study",
            ContentType::Update => "update",
        }
    }

    /// Directory under the content root holding this collection.
    pub const fn dir_name(self) -> &'static str {
        match self {
            ContentType::Article => "articles",
            ContentType::News => "news",
            ContentType::CaseStudy => "case-studies",
            ContentType::Update => "updates",
        }
    }

    /// Human-readable collection label.
    pub const fn label(self) -> &'static str {
        match self {
            ContentType::Article => "Articles",
            ContentType::News => "News",
            ContentType::CaseStudy => "Case Studies",
            ContentType::Update => "Updates",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ContentType {
    type Err = String;

    /// Accepts either the category code (`case-study`) or the directory
    /// name (`case-studies`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        ContentType::ALL
            .into_iter()
            .find(|t| t.code() == s || t.dir_name() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = ContentType::ALL.iter().map(|t| t.code()).collect();
                format!("unknown content type '{s}' (expected one of: {})", known.join(", "))
            })
    }
}

/// Editorial category of a news item.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum NewsCategory {
    Company,
    Industry,
    Product,
    Event,
    Award,
}

impl NewsCategory {
    pub const ALL: [NewsCategory; 5] = [
        NewsCategory::Company,
        NewsCategory::Industry,
        NewsCategory::Product,
        NewsCategory::Event,
        NewsCategory::Award,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            NewsCategory::Company => "company",
            NewsCategory::Industry => "industry",
            NewsCategory::Product => "product",
            NewsCategory::Event => "event",
            NewsCategory::Award => "award",
        }
    }
}

impl fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for NewsCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        NewsCategory::ALL
            .into_iter()
            .find(|c| c.code() == s)
            .ok_or_else(|| format!("unknown news category '{s}'"))
    }
}

/// A person credited on content items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Author {
    pub id: String,
    pub name: String,
    pub role: LocalizedText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// How an item points at its author: by directory id or embedded in full.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorRef {
    Id(String),
    Embedded(Author),
}

impl AuthorRef {
    pub fn id(&self) -> &str {
        match self {
            AuthorRef::Id(id) => id,
            AuthorRef::Embedded(author) => &author.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsDetails {
    pub news_category: NewsCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub urgent: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudyDetails {
    pub client: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<LocalizedText>,
}

/// Type-specific fields. The variant doubles as the item's category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "category", rename_all = "kebab-case")]
pub enum Details {
    Article,
    News(NewsDetails),
    CaseStudy(CaseStudyDetails),
    Update,
}

impl Details {
    pub fn content_type(&self) -> ContentType {
        match self {
            Details::Article => ContentType::Article,
            Details::News(_) => ContentType::News,
            Details::CaseStudy(_) => ContentType::CaseStudy,
            Details::Update => ContentType::Update,
        }
    }
}

/// When an item was published or updated: a calendar day, or a full
/// RFC 3339 timestamp with its original offset.
///
/// Values compare as UTC instants. A bare day counts as midnight UTC, so it
/// equals a timestamp at `00:00:00Z` on that day.
#[derive(Debug, Clone, Copy)]
pub enum PublishDate {
    Day(NaiveDate),
    Instant(DateTime<FixedOffset>),
}

impl PublishDate {
    pub fn utc(&self) -> DateTime<Utc> {
        match self {
            PublishDate::Day(day) => Utc.from_utc_datetime(&day.and_time(NaiveTime::default())),
            PublishDate::Instant(instant) => instant.with_timezone(&Utc),
        }
    }
}

impl PartialEq for PublishDate {
    fn eq(&self, other: &Self) -> bool {
        self.utc() == other.utc()
    }
}

impl Eq for PublishDate {}

impl PartialOrd for PublishDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PublishDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.utc().cmp(&other.utc())
    }
}

impl fmt::Display for PublishDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishDate::Day(day) => write!(f, "{}", day.format("%Y-%m-%d")),
            PublishDate::Instant(instant) => {
                f.write_str(&instant.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
        }
    }
}

impl FromStr for PublishDate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(PublishDate::Day)
            .or_else(|_| DateTime::parse_from_rfc3339(s).map(PublishDate::Instant))
            .map_err(|_| format!("'{s}' is not an ISO-8601 date or RFC 3339 timestamp"))
    }
}

impl Serialize for PublishDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One published unit of content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: String,
    pub slug: String,
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub content: LocalizedText,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<LocalizedText>,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_image: Option<String>,
    pub date: PublishDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<PublishDate>,
    pub author: AuthorRef,
    /// Minutes. Always positive.
    pub read_time: u32,
    /// De-duplicated, in first-seen order.
    pub tags: Vec<String>,
    pub featured: bool,
    /// Dedicated standalone page. Only override records carry one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_url: Option<String>,
    #[serde(flatten)]
    pub details: Details,
}

impl ContentItem {
    pub fn category(&self) -> ContentType {
        self.details.content_type()
    }

    pub fn news_category(&self) -> Option<NewsCategory> {
        match &self.details {
            Details::News(news) => Some(news.news_category),
            _ => None,
        }
    }

    /// Thumbnail reference, falling back to the main image.
    pub fn thumbnail(&self) -> &str {
        self.thumbnail_image.as_deref().unwrap_or(&self.image)
    }

    /// Exact, case-sensitive tag membership.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// True when the two items have at least one tag in common.
    pub fn shares_tag_with(&self, other: &ContentItem) -> bool {
        self.tags.iter().any(|t| other.has_tag(t))
    }
}

/// Which side of a collection a record was registered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Base,
    Override,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Base => f.write_str("base catalog"),
            Origin::Override => f.write_str("override registry"),
        }
    }
}

/// Ingestion-time validation failures.
///
/// Queries never produce these; they surface while records are registered
/// and the repository is assembled.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("{content_type} record has no id")]
    MissingId { content_type: ContentType },
    #[error("{content_type} '{id}' is missing required fields: {}", .fields.join(", "))]
    MissingFields {
        content_type: ContentType,
        id: String,
        fields: Vec<&'static str>,
    },
    #[error("{content_type} '{id}': invalid {field}: {reason}")]
    InvalidField {
        content_type: ContentType,
        id: String,
        field: &'static str,
        reason: String,
    },
    #[error("{content_type} '{id}' declares category '{declared}'")]
    CategoryMismatch {
        content_type: ContentType,
        id: String,
        declared: ContentType,
    },
    #[error("{content_type} '{id}': customUrl is only allowed on override records")]
    CustomUrlOnBase { content_type: ContentType, id: String },
    #[error("duplicate {content_type} id '{id}' in {origin}")]
    DuplicateId {
        content_type: ContentType,
        id: String,
        origin: Origin,
    },
    #[error("duplicate {content_type} slug '{slug}' (ids '{first}' and '{second}')")]
    DuplicateSlug {
        content_type: ContentType,
        slug: String,
        first: String,
        second: String,
    },
    #[error("{content_type} '{id}' references unknown author '{author}'")]
    UnknownAuthor {
        content_type: ContentType,
        id: String,
        author: String,
    },
    #[error("duplicate author id '{0}'")]
    DuplicateAuthor(String),
    #[error("collection '{0}' registered twice")]
    DuplicateCollection(ContentType),
}
