//! Changelog parsing
//!
//! Turns a Markdown changelog into release entries restricted to a version
//! range. The document is scanned line by line with two states: outside a
//! release section, or inside one accumulating body lines. Lines inside
//! fenced code blocks are body text and never end a section.

mod headers;
mod types;

pub use headers::{heading_level, match_release_header, ReleaseHeader};
pub use types::*;

use tracing::{debug, instrument};

use crate::sections::{heading_label, FenceTracker, SectionKind};
use crate::types::{parse_date_or_now, ReleaseCollection, ReleaseEntry};
use crate::version::{self, VersionRange};

/// Parser for Markdown changelogs (Keep a Changelog and similar layouts)
pub struct ChangelogParser {
    config: ParserConfig,
}

/// A release section being accumulated
struct OpenSection<'a> {
    header: ReleaseHeader,
    lines: Vec<&'a str>,
}

impl ChangelogParser {
    /// Create a new parser with default configuration
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a changelog, keeping releases inside `range`
    #[instrument(skip(self, content), fields(range = %range, content_len = content.len()))]
    pub fn parse(&self, content: &str, range: &VersionRange) -> ReleaseCollection {
        let mut entries: Vec<ReleaseEntry> = Vec::new();
        let mut open: Option<OpenSection<'_>> = None;
        let mut fences = FenceTracker::new();

        for line in content.lines() {
            if !fences.is_code(line) {
                if let Some(header) = match_release_header(line) {
                    if let Some(section) = open.take() {
                        self.flush(section, range, &mut entries);
                    }
                    open = Some(OpenSection {
                        header,
                        lines: Vec::new(),
                    });
                    continue;
                }

                if open.as_ref().is_some_and(|s| ends_release(&s.header, line)) {
                    if let Some(section) = open.take() {
                        self.flush(section, range, &mut entries);
                    }
                    continue;
                }
            }

            if let Some(section) = open.as_mut() {
                if !line.trim().is_empty() {
                    section.lines.push(line.trim_end());
                }
            }
        }

        if let Some(section) = open.take() {
            self.flush(section, range, &mut entries);
        }

        debug!(entries = entries.len(), "changelog parsed");
        ReleaseCollection::new(entries)
    }

    /// Close a section, keeping it only if it has content and passes the filters
    fn flush(&self, section: OpenSection<'_>, range: &VersionRange, entries: &mut Vec<ReleaseEntry>) {
        let tag = section.header.version;

        if section.lines.is_empty() {
            debug!(version = %tag, "skipping release without content");
            return;
        }

        if let Err(e) = version::normalize(&tag) {
            debug!(version = %tag, error = %e, "skipping release with unparsable version");
            return;
        }

        if !range.accepts(&tag, self.config.include_prerelease) {
            return;
        }

        let entry = ReleaseEntry::new(tag.clone())
            .with_body(section.lines.join("\n"))
            .with_date(parse_date_or_now(section.header.date.as_deref()));

        // Duplicate headers for the same version: the later one wins
        let before = entries.len();
        entries.retain(|e| !e.is_version(&tag));
        if entries.len() != before {
            debug!(version = %tag, "duplicate release header, keeping the later section");
        }

        entries.push(entry);
    }
}

/// Whether a non-release heading ends the release opened by `header`
///
/// Any heading above the release level does, e.g. "## [Unreleased]" under
/// "### 1.0.1". At the same level only headings that do not name a section
/// do, since some generators put "### Bug Fixes" directly under "### 1.0.1".
fn ends_release(header: &ReleaseHeader, line: &str) -> bool {
    match heading_level(line) {
        Some(level) if level < header.level => true,
        Some(level) if level == header.level => heading_label(line)
            .and_then(SectionKind::from_heading)
            .is_none(),
        _ => false,
    }
}

impl Default for ChangelogParser {
    fn default() -> Self {
        Self::new()
    }
}
