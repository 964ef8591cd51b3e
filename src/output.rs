//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Every entity is shown by its semantic identity first (positional index
//! and title, resolved in the requested language) with identifiers, dates and
//! tags as indented context lines. Paths and raw JSON never appear here; the
//! `export` command covers machine-readable output.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Articles (4 items)
//!     Base: 4
//!     Overrides: 1
//!     Superseded: a-lean
//!     Tags: 7
//!     Titles: English 4, Hungarian 3, German 1
//! Updates (0 items)
//!
//! Authors (3)
//! ```
//!
//! ## List / search / related
//!
//! ```text
//! 001 Lean production in practice: one year on [featured]
//!     a-lean · lean-production · 2024-06-01
//!     Tags: lean, manufacturing
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure.

use crate::locale::Language;
use crate::model::{Author, ContentItem, Details};
use crate::query::Repository;

/// Longest description/excerpt shown in detail view, in characters.
const DESCRIPTION_WIDTH: usize = 160;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Collection header with its item count.
///
/// ```text
/// Articles (4 items)
/// News (1 item)
/// ```
fn collection_header(label: &str, count: usize) -> String {
    let noun = if count == 1 { "item" } else { "items" };
    format!("{label} ({count} {noun})")
}

/// Item header: positional index and resolved title, flagged when featured.
fn item_header(index: usize, item: &ContentItem, lang: Language) -> String {
    let title = item.title.resolve(lang);
    if item.featured {
        format!("{} {} [featured]", format_index(index), title)
    } else {
        format!("{} {}", format_index(index), title)
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}...", &text[..cut]),
    }
}

fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

/// Per-language count of titles, every supported language listed.
///
/// ```text
/// English 4, Hungarian 3, German 1
/// ```
fn title_coverage(items: &[&ContentItem]) -> String {
    Language::ALL
        .iter()
        .map(|&lang| {
            let count = items
                .iter()
                .filter(|item| item.title.languages().any(|l| l == lang))
                .count();
            format!("{} {count}", lang.name())
        })
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// check
// ============================================================================

/// Inventory of every collection plus the author directory.
pub fn format_inventory(repo: &Repository) -> Vec<String> {
    let mut lines = Vec::new();

    for content_type in repo.content_types() {
        let Some(collection) = repo.collection(content_type) else {
            continue;
        };
        let merged = collection.merged();
        lines.push(collection_header(content_type.label(), merged.len()));
        if merged.is_empty() {
            continue;
        }
        lines.push(format!("{}Base: {}", indent(1), collection.base().len()));
        lines.push(format!(
            "{}Overrides: {}",
            indent(1),
            collection.overrides().len()
        ));
        let superseded = collection.superseded_ids();
        if !superseded.is_empty() {
            lines.push(format!("{}Superseded: {}", indent(1), superseded.join(", ")));
        }
        lines.push(format!(
            "{}Tags: {}",
            indent(1),
            repo.all_tags(content_type).len()
        ));
        lines.push(format!("{}Titles: {}", indent(1), title_coverage(&merged)));
    }

    lines.push(String::new());
    lines.push(format!("Authors ({})", repo.authors().len()));
    lines
}

pub fn print_inventory(repo: &Repository) {
    for line in format_inventory(repo) {
        println!("{}", line);
    }
}

// ============================================================================
// list / search / related
// ============================================================================

/// One header plus context lines per item, numbered from 1.
pub fn format_item_list(items: &[&ContentItem], lang: Language) -> Vec<String> {
    if items.is_empty() {
        return vec!["No items".to_string()];
    }

    let mut lines = Vec::new();
    for (i, item) in items.iter().enumerate() {
        lines.push(item_header(i + 1, item, lang));
        lines.push(format!(
            "{}{} · {} · {}",
            indent(1),
            item.id,
            item.slug,
            item.date
        ));
        if !item.tags.is_empty() {
            lines.push(format!("{}Tags: {}", indent(1), join_tags(&item.tags)));
        }
    }
    lines
}

pub fn print_item_list(items: &[&ContentItem], lang: Language) {
    for line in format_item_list(items, lang) {
        println!("{}", line);
    }
}

// ============================================================================
// show
// ============================================================================

/// Full view of one item with every text resolved in `lang`.
pub fn format_item_detail(
    item: &ContentItem,
    author: Option<&Author>,
    lang: Language,
) -> Vec<String> {
    let pad = indent(1);
    let mut lines = vec![item.title.resolve(lang).to_string()];

    lines.push(format!("{pad}Id: {}", item.id));
    lines.push(format!("{pad}Slug: {}", item.slug));
    let languages: Vec<&str> = item.title.languages().map(Language::native_name).collect();
    lines.push(format!("{pad}Languages: {}", languages.join(", ")));
    match &item.details {
        Details::News(news) => lines.push(format!(
            "{pad}Category: {} ({})",
            item.category(),
            news.news_category
        )),
        _ => lines.push(format!("{pad}Category: {}", item.category())),
    }
    match item.updated_at {
        Some(updated) => lines.push(format!("{pad}Date: {} (updated {updated})", item.date)),
        None => lines.push(format!("{pad}Date: {}", item.date)),
    }
    match author {
        Some(author) => lines.push(format!(
            "{pad}Author: {}, {}",
            author.name,
            author.role.resolve(lang)
        )),
        None => lines.push(format!("{pad}Author: {} (unresolved)", item.author.id())),
    }
    lines.push(format!("{pad}Read time: {} min", item.read_time));
    if !item.tags.is_empty() {
        lines.push(format!("{pad}Tags: {}", join_tags(&item.tags)));
    }
    if item.featured {
        lines.push(format!("{pad}Featured: yes"));
    }
    if let Some(url) = &item.custom_url {
        lines.push(format!("{pad}URL: {url}"));
    }
    lines.push(format!("{pad}Image: {}", item.image));
    if item.thumbnail() != item.image {
        lines.push(format!("{pad}Thumbnail: {}", item.thumbnail()));
    }

    match &item.details {
        Details::News(news) => {
            if let Some(source) = &news.source {
                lines.push(format!("{pad}Source: {source}"));
            }
            if let Some(location) = &news.location {
                lines.push(format!("{pad}Location: {location}"));
            }
            if news.urgent {
                lines.push(format!("{pad}Urgent: yes"));
            }
        }
        Details::CaseStudy(case_study) => {
            lines.push(format!("{pad}Client: {}", case_study.client));
            if let Some(industry) = &case_study.industry {
                lines.push(format!("{pad}Industry: {industry}"));
            }
            if !case_study.results.is_empty() {
                lines.push(format!("{pad}Results:"));
                for result in &case_study.results {
                    lines.push(format!("{}- {}", indent(2), result.resolve(lang)));
                }
            }
        }
        Details::Article | Details::Update => {}
    }

    lines.push(format!(
        "{pad}Description: {}",
        truncate_desc(item.description.resolve(lang), DESCRIPTION_WIDTH)
    ));
    if let Some(excerpt) = &item.excerpt {
        lines.push(format!(
            "{pad}Excerpt: {}",
            truncate_desc(excerpt.resolve(lang), DESCRIPTION_WIDTH)
        ));
    }
    lines
}

pub fn print_item_detail(item: &ContentItem, author: Option<&Author>, lang: Language) {
    for line in format_item_detail(item, author, lang) {
        println!("{}", line);
    }
}

// ============================================================================
// tags
// ============================================================================

pub fn format_tags(tags: &[&str]) -> Vec<String> {
    if tags.is_empty() {
        return vec!["No tags".to_string()];
    }
    tags.iter().map(|tag| tag.to_string()).collect()
}

pub fn print_tags(tags: &[&str]) {
    for line in format_tags(tags) {
        println!("{}", line);
    }
}
