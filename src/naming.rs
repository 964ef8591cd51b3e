//! File naming and slug conventions.
//!
//! Content records follow the `NNN-name` convention for their file names:
//! an optional numeric prefix that fixes the record's position in its
//! collection, followed by a name that doubles as the default slug.
//!
//! - `010-lean-production.json` → position 10, slug `lean-production`
//! - `lean-production.json` → unnumbered (sorted after numbered files), slug `lean-production`
//!
//! Slugs end up in URLs, so they are restricted to lowercase ASCII
//! alphanumerics separated by single dashes.

/// Result of parsing a file stem like `010-lean-production`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Number prefix if present (e.g., `10` from `010-lean-production`)
    pub number: Option<u32>,
    /// Name part after `NNN-`. Empty if number-only.
    /// For unnumbered entries, this is the full input.
    pub name: String,
}

impl ParsedName {
    /// Sort key placing numbered entries first, in numeric order.
    pub fn sort_key(&self) -> (u32, &str) {
        (self.number.unwrap_or(u32::MAX), &self.name)
    }
}

/// Parse an entry name following the `NNN-name` convention.
///
/// - `"010-lean-production"` → number=Some(10), name="lean-production"
/// - `"001"` → number=Some(1), name=""
/// - `"001-"` → number=Some(1), name=""
/// - `"press-kit"` → number=None, name="press-kit"
pub fn parse_entry_name(name: &str) -> ParsedName {
    if let Some((prefix, rest)) = name.split_once('-')
        && let Ok(num) = prefix.parse::<u32>()
    {
        return ParsedName {
            number: Some(num),
            name: rest.to_string(),
        };
    }
    if let Ok(num) = name.parse::<u32>() {
        return ParsedName {
            number: Some(num),
            name: String::new(),
        };
    }
    ParsedName {
        number: None,
        name: name.to_string(),
    }
}

pub const MAX_SLUG_LEN: usize = 80;

/// Check that `slug` is usable as a URL path segment.
///
/// Accepts `[a-z0-9]+(-[a-z0-9]+)*` up to [`MAX_SLUG_LEN`] characters.
pub fn is_url_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= MAX_SLUG_LEN
        && slug.split('-').all(|part| {
            !part.is_empty()
                && part
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        })
}
