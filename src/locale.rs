//! Languages and localized text.
//!
//! Every user-facing text field in the content model is a [`LocalizedText`]:
//! one string per supported [`Language`], with English always present. Text is
//! read through exactly one rule, implemented in [`LocalizedText::resolve`]:
//!
//! ```text
//! requested language present  →  that value, verbatim
//! otherwise                   →  the English value
//! ```
//!
//! There is no per-field or per-language special casing anywhere else in the
//! crate. Callers that need text for display go through [`resolve_text`] or
//! [`LocalizedText::resolve`]; search is the only consumer that looks at all
//! variants at once (via [`LocalizedText::variants`]).
//!
//! ## Language codes
//!
//! Codes are ISO 639-1 (`en`, `hu`, `de`). Parsing is case-insensitive and
//! ignores region tags, so `hu-HU`, `HU` and `hu_hu` all mean Hungarian.
//! Unknown codes are rejected: a typo in a fixture key fails the load instead
//! of silently producing text nobody can request.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocaleError {
    #[error("Unknown language code: '{0}'")]
    UnknownLanguage(String),
    #[error("Localized text has no English value")]
    MissingEnglish,
    #[error("Localized text has an empty English value")]
    EmptyEnglish,
}

/// A supported site language.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    En,
    Hu,
    De,
}

impl Language {
    /// All supported languages, canonical first.
    pub const ALL: [Language; 3] = [Language::En, Language::Hu, Language::De];

    /// The fallback language every [`LocalizedText`] must carry.
    pub const fn canonical() -> Language {
        Language::En
    }

    /// ISO 639-1 code (e.g. `"hu"`).
    pub const fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hu => "hu",
            Language::De => "de",
        }
    }

    /// English name of the language.
    pub const fn name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hu => "Hungarian",
            Language::De => "German",
        }
    }

    /// Name of the language in the language itself.
    pub const fn native_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hu => "Magyar",
            Language::De => "Deutsch",
        }
    }

    pub const fn is_canonical(self) -> bool {
        matches!(self, Language::En)
    }

    /// Parse a language code, tolerating case and region tags.
    ///
    /// ```
    /// use site_content::locale::Language;
    ///
    /// assert_eq!(Language::from_code("hu-HU").unwrap(), Language::Hu);
    /// assert!(Language::from_code("fr").is_err());
    /// ```
    pub fn from_code(code: &str) -> Result<Language, LocaleError> {
        let normalized = code.trim().to_ascii_lowercase();
        let primary = normalized.split(['-', '_']).next().unwrap_or("");
        Language::ALL
            .into_iter()
            .find(|lang| lang.code() == primary)
            .ok_or_else(|| LocaleError::UnknownLanguage(code.to_string()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_code(s)
    }
}

impl TryFrom<String> for Language {
    type Error = LocaleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Language::from_code(&value)
    }
}

impl From<Language> for String {
    fn from(lang: Language) -> Self {
        lang.code().to_string()
    }
}

/// One semantic text field in every language it has been written in.
///
/// Construction always goes through validation, so a `LocalizedText` value
/// is guaranteed to hold a non-empty English string. Deserialization from a
/// JSON object like `{"en": "Hello", "hu": "Szia"}` applies the same check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<Language, String>",
    into = "BTreeMap<Language, String>"
)]
pub struct LocalizedText {
    values: BTreeMap<Language, String>,
}

impl LocalizedText {
    /// Create a text with only its English value.
    pub fn new(english: impl Into<String>) -> Result<Self, LocaleError> {
        let mut values = BTreeMap::new();
        values.insert(Language::En, english.into());
        Self::try_from(values)
    }

    /// Add (or replace) a translation. Replacing English with an empty
    /// string is ignored so the invariant holds.
    pub fn with(mut self, language: Language, text: impl Into<String>) -> Self {
        let text = text.into();
        if language.is_canonical() && text.trim().is_empty() {
            return self;
        }
        self.values.insert(language, text);
        self
    }

    /// The English value. Never empty.
    pub fn english(&self) -> &str {
        self.values
            .get(&Language::canonical())
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// The value for exactly `language`, without fallback.
    pub fn get(&self, language: Language) -> Option<&str> {
        self.values.get(&language).map(String::as_str)
    }

    /// Resolve this text for `language`, falling back to English.
    pub fn resolve(&self, language: Language) -> &str {
        self.get(language).unwrap_or_else(|| self.english())
    }

    /// Languages this text has a value for, in [`Language::ALL`] order.
    pub fn languages(&self) -> impl Iterator<Item = Language> + '_ {
        self.values.keys().copied()
    }

    /// Every `(language, value)` pair present.
    pub fn variants(&self) -> impl Iterator<Item = (Language, &str)> + '_ {
        self.values.iter().map(|(lang, text)| (*lang, text.as_str()))
    }
}

impl TryFrom<BTreeMap<Language, String>> for LocalizedText {
    type Error = LocaleError;

    fn try_from(values: BTreeMap<Language, String>) -> Result<Self, Self::Error> {
        match values.get(&Language::canonical()) {
            None => Err(LocaleError::MissingEnglish),
            Some(english) if english.trim().is_empty() => Err(LocaleError::EmptyEnglish),
            Some(_) => Ok(Self { values }),
        }
    }
}

impl From<LocalizedText> for BTreeMap<Language, String> {
    fn from(text: LocalizedText) -> Self {
        text.values
    }
}

/// Resolve `text` for `language` with the site-wide English fallback.
pub fn resolve_text(text: &LocalizedText, language: Language) -> &str {
    text.resolve(language)
}
