//! Release notes formatters

mod json;
mod markdown;
mod registry;
mod summary;

pub use json::{JsonFormatter, ReleaseRecord};
pub use markdown::MarkdownFormatter;
pub use registry::FormatterRegistry;
pub use summary::SummaryFormatter;

use crate::types::ReleaseCollection;

/// Trait for release collection formatters
pub trait ReleaseFormatter: Send + Sync {
    /// Format a collection to string
    fn format(&self, collection: &ReleaseCollection) -> String;

    /// Name used to select this formatter
    fn name(&self) -> &'static str;
}

pub(crate) fn push_list(output: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    output.push_str(&format!("### {}\n\n", title));
    for item in items {
        output.push_str(&format!("- {}\n", item));
    }
    output.push('\n');
}
