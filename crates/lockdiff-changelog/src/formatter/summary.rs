//! Merged summary formatter

use tracing::{debug, instrument};

use super::{push_list, ReleaseFormatter};
use crate::sections::SectionKind;
use crate::types::ReleaseCollection;

/// Merges every release's sections into one document
///
/// Items are concatenated in entry order; identical items from different
/// releases are kept, one per position.
pub struct SummaryFormatter {
    /// Optional top-level heading
    pub heading: Option<String>,
}

impl SummaryFormatter {
    /// Create a new summary formatter
    pub fn new() -> Self {
        Self { heading: None }
    }

    /// Set a heading
    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }
}

impl Default for SummaryFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReleaseFormatter for SummaryFormatter {
    #[instrument(skip(self, collection), fields(entries = collection.len()))]
    fn format(&self, collection: &ReleaseCollection) -> String {
        let mut output = String::new();

        if let Some(heading) = &self.heading {
            output.push_str(&format!("## {}\n\n", heading));
        }

        if collection.is_empty() {
            return output;
        }

        let tags: Vec<&str> = collection.iter().map(|e| e.tag_name.as_str()).collect();
        output.push_str(&format!("_Releases: {}_\n\n", tags.join(", ")));

        if collection.is_structured() {
            for kind in SectionKind::DISPLAY {
                push_list(&mut output, kind.title(), &collection.section(kind));
            }
        } else {
            for entry in collection {
                let body = entry.body.trim();
                if body.is_empty() {
                    continue;
                }
                output.push_str(&format!("### {}\n\n{}\n\n", entry.tag_name, body));
            }
        }

        debug!(output_len = output.len(), "summary formatted");
        output
    }

    fn name(&self) -> &'static str {
        "summary"
    }
}
