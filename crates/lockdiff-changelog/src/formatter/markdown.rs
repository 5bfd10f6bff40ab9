//! Per-release Markdown formatter

use tracing::{debug, instrument};

use super::{push_list, ReleaseFormatter};
use crate::sections::SectionKind;
use crate::types::{ReleaseCollection, ReleaseEntry};

/// Renders each release under its own header, in collection order
pub struct MarkdownFormatter {
    /// Include release dates in headers
    pub include_dates: bool,
    /// Include a link to the release page when known
    pub include_links: bool,
}

impl MarkdownFormatter {
    /// Create a new markdown formatter
    pub fn new() -> Self {
        Self {
            include_dates: true,
            include_links: true,
        }
    }

    /// Set whether dates are shown
    pub fn with_dates(mut self, include: bool) -> Self {
        self.include_dates = include;
        self
    }

    fn format_entry(&self, output: &mut String, entry: &ReleaseEntry, structured: bool) {
        output.push_str(&format!("## {}", entry.tag_name));
        if self.include_dates {
            output.push_str(&format!(" - {}", entry.date.format("%Y-%m-%d")));
        }
        output.push_str("\n\n");

        if entry.title != entry.tag_name {
            output.push_str(&format!("**{}**\n\n", entry.title));
        }

        if structured && entry.is_structured() {
            for kind in SectionKind::DISPLAY {
                push_list(output, kind.title(), &entry.section(kind));
            }
        } else if !entry.body.trim().is_empty() {
            output.push_str(entry.body.trim());
            output.push_str("\n\n");
        }

        if self.include_links {
            if let Some(url) = &entry.url {
                output.push_str(&format!("[Release page]({})\n\n", url));
            }
        }
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReleaseFormatter for MarkdownFormatter {
    #[instrument(skip(self, collection), fields(entries = collection.len()))]
    fn format(&self, collection: &ReleaseCollection) -> String {
        let structured = collection.is_structured();
        let mut output = String::new();

        for entry in collection {
            self.format_entry(&mut output, entry, structured);
        }

        debug!(output_len = output.len(), structured, "markdown release notes formatted");
        output
    }

    fn name(&self) -> &'static str {
        "markdown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::parse_date_or_now;

    fn entry(tag: &str, body: &str) -> ReleaseEntry {
        ReleaseEntry::new(tag)
            .with_body(body)
            .with_date(parse_date_or_now(Some("2023-06-01")))
    }

    #[test]
    fn test_format_structured() {
        let collection = ReleaseCollection::new(vec![entry(
            "2.0.0",
            "### Fixed\n- bug\n### Added\n- feature",
        )]);
        let output = MarkdownFormatter::new().format(&collection);

        assert!(output.starts_with("## 2.0.0 - 2023-06-01\n"));
        assert!(output.contains("### Changes\n\n- feature\n"));
        assert!(output.contains("### Fixed\n\n- bug\n"));
        assert!(output.find("### Changes").unwrap() < output.find("### Fixed").unwrap());
    }

    #[test]
    fn test_format_unstructured_keeps_body() {
        let collection = ReleaseCollection::new(vec![entry("1.0.1", "Minor tweaks.")]);
        let output = MarkdownFormatter::new().format(&collection);
        assert!(output.contains("Minor tweaks."));
    }

    #[test]
    fn test_format_title_and_link() {
        let collection = ReleaseCollection::new(vec![entry("v3.0.0", "text")
            .with_title("The big one")
            .with_url("https://github.com/acme/widget/releases/tag/v3.0.0")]);
        let output = MarkdownFormatter::new().with_dates(false).format(&collection);

        assert!(output.starts_with("## v3.0.0\n"));
        assert!(output.contains("**The big one**"));
        assert!(output.contains("(https://github.com/acme/widget/releases/tag/v3.0.0)"));
    }

    #[test]
    fn test_format_preserves_order() {
        let collection = ReleaseCollection::new(vec![entry("2.0.0", "a"), entry("1.0.0", "b")]);
        let output = MarkdownFormatter::new().format(&collection);
        assert!(output.find("## 2.0.0").unwrap() < output.find("## 1.0.0").unwrap());
    }
}
