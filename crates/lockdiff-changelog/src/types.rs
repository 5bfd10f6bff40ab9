//! Release notes types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::sections::{self, SectionKind};
use crate::version;

/// One published or documented release
///
/// Section lists (`changes`, `fixes`, ...) are extracted from the body on
/// every call rather than stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseEntry {
    /// Identifier as found in the source (e.g. `v2.3.0`)
    pub tag_name: String,
    /// Display name
    pub title: String,
    /// Raw Markdown body
    pub body: String,
    /// Release date, best effort
    pub date: DateTime<Utc>,
    /// Canonical URL, absent for parsed changelogs
    pub url: Option<String>,
}

impl ReleaseEntry {
    /// Create a new entry titled after its tag
    pub fn new(tag_name: impl Into<String>) -> Self {
        let tag_name = tag_name.into();
        Self {
            title: tag_name.clone(),
            tag_name,
            body: String::new(),
            date: Utc::now(),
            url: None,
        }
    }

    /// Set the display title; blank titles keep the tag name
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        if !title.trim().is_empty() {
            self.title = title;
        }
        self
    }

    /// Set the body
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Set the date
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    /// Set the URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Tag name without its `v` prefix
    pub fn version(&self) -> &str {
        version::strip_prefix(&self.tag_name)
    }

    /// Whether this entry's tag normalizes to the same version as `other`
    pub fn is_version(&self, other: &str) -> bool {
        matches!(
            (version::normalize(&self.tag_name), version::normalize(other)),
            (Ok(a), Ok(b)) if a == b
        )
    }

    /// Whether the body contains at least one recognized section heading
    pub fn is_structured(&self) -> bool {
        sections::has_sections(&self.body)
    }

    /// Bullet points of one section kind
    pub fn section(&self, kind: SectionKind) -> Vec<String> {
        sections::extract(&self.body, kind)
    }

    /// Added / changed items
    pub fn changes(&self) -> Vec<String> {
        self.section(SectionKind::Added)
    }

    /// Fixed items
    pub fn fixes(&self) -> Vec<String> {
        self.section(SectionKind::Fixed)
    }

    /// Breaking changes
    pub fn breaking_changes(&self) -> Vec<String> {
        self.section(SectionKind::Breaking)
    }

    /// Deprecations
    pub fn deprecated(&self) -> Vec<String> {
        self.section(SectionKind::Deprecated)
    }

    /// Removals
    pub fn removed(&self) -> Vec<String> {
        self.section(SectionKind::Removed)
    }

    /// Security fixes
    pub fn security(&self) -> Vec<String> {
        self.section(SectionKind::Security)
    }
}

/// Parse a date, falling back to now
///
/// Accepts `YYYY-MM-DD` (midnight UTC) and RFC 3339 timestamps.
pub fn parse_date_or_now(value: Option<&str>) -> DateTime<Utc> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Utc::now();
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return dt.with_timezone(&Utc);
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_else(Utc::now)
}

/// Ordered, immutable collection of release entries
///
/// Order is the source's order: newest first from release APIs, document
/// order from changelogs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReleaseCollection {
    entries: Vec<ReleaseEntry>,
}

impl ReleaseCollection {
    /// Create a collection from entries in source order
    pub fn new(entries: Vec<ReleaseEntry>) -> Self {
        Self { entries }
    }

    /// Create an empty collection
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the collection has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over entries in source order
    pub fn iter(&self) -> std::slice::Iter<'_, ReleaseEntry> {
        self.entries.iter()
    }

    /// All entries
    pub fn entries(&self) -> &[ReleaseEntry] {
        &self.entries
    }

    /// Whether any entry's tag normalizes to `version`
    pub fn contains_version(&self, version: &str) -> bool {
        self.entries.iter().any(|e| e.is_version(version))
    }

    /// Whether any entry has a recognized section heading
    ///
    /// When false, every body is treated as unstructured free text.
    pub fn is_structured(&self) -> bool {
        self.entries.iter().any(ReleaseEntry::is_structured)
    }

    /// One section concatenated across all entries, in entry order
    pub fn section(&self, kind: SectionKind) -> Vec<String> {
        self.entries.iter().flat_map(|e| e.section(kind)).collect()
    }

    /// Added / changed items across all entries
    pub fn changes(&self) -> Vec<String> {
        self.section(SectionKind::Added)
    }

    /// Fixed items across all entries
    pub fn fixes(&self) -> Vec<String> {
        self.section(SectionKind::Fixed)
    }

    /// Breaking changes across all entries
    pub fn breaking_changes(&self) -> Vec<String> {
        self.section(SectionKind::Breaking)
    }

    /// Deprecations across all entries
    pub fn deprecated(&self) -> Vec<String> {
        self.section(SectionKind::Deprecated)
    }

    /// Removals across all entries
    pub fn removed(&self) -> Vec<String> {
        self.section(SectionKind::Removed)
    }

    /// Security fixes across all entries
    pub fn security(&self) -> Vec<String> {
        self.section(SectionKind::Security)
    }
}

impl<'a> IntoIterator for &'a ReleaseCollection {
    type Item = &'a ReleaseEntry;
    type IntoIter = std::slice::Iter<'a, ReleaseEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for ReleaseCollection {
    type Item = ReleaseEntry;
    type IntoIter = std::vec::IntoIter<ReleaseEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<ReleaseEntry> for ReleaseCollection {
    fn from_iter<I: IntoIterator<Item = ReleaseEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
