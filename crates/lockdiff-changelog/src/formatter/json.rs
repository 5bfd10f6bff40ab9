//! Structured JSON formatter

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ReleaseFormatter;
use crate::types::{ReleaseCollection, ReleaseEntry};

/// Machine-readable view of one release
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseRecord {
    /// Version tag exactly as written in the source
    pub tag_name: String,
    /// Release title; the tag when the source gave none
    pub title: String,
    /// Release date, or the time of parsing when unknown
    pub date: DateTime<Utc>,
    /// Link to the release page, if the source had one
    pub url: Option<String>,
    /// Raw release notes text
    pub body: String,
    /// Whether the body has at least one recognized section heading
    pub structured: bool,
    /// Bullets under added or changed headings
    pub changes: Vec<String>,
    /// Bullets under fixed headings
    pub fixes: Vec<String>,
    /// Bullets under breaking change headings
    pub breaking_changes: Vec<String>,
    /// Bullets under deprecated headings
    pub deprecated: Vec<String>,
    /// Bullets under removed headings
    pub removed: Vec<String>,
    /// Bullets under security headings
    pub security: Vec<String>,
}

impl From<&ReleaseEntry> for ReleaseRecord {
    fn from(entry: &ReleaseEntry) -> Self {
        Self {
            tag_name: entry.tag_name.clone(),
            title: entry.title.clone(),
            date: entry.date,
            url: entry.url.clone(),
            body: entry.body.clone(),
            structured: entry.is_structured(),
            changes: entry.changes(),
            fixes: entry.fixes(),
            breaking_changes: entry.breaking_changes(),
            deprecated: entry.deprecated(),
            removed: entry.removed(),
            security: entry.security(),
        }
    }
}

/// Renders the collection as a JSON array of release records
#[derive(Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }

    /// Records for every entry, in collection order
    pub fn records(collection: &ReleaseCollection) -> Vec<ReleaseRecord> {
        collection.iter().map(ReleaseRecord::from).collect()
    }
}

impl ReleaseFormatter for JsonFormatter {
    fn format(&self, collection: &ReleaseCollection) -> String {
        serde_json::to_string_pretty(&Self::records(collection))
            .unwrap_or_else(|_| "[]".to_string())
    }

    fn name(&self) -> &'static str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_records() {
        let collection = ReleaseCollection::new(vec![ReleaseEntry::new("v1.1.0")
            .with_body("## Fixed\n- crash")
            .with_url("https://example.com/r/1")]);
        let output = JsonFormatter::new().format(&collection);
        let parsed: Vec<ReleaseRecord> = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].tag_name, "v1.1.0");
        assert!(parsed[0].structured);
        assert_eq!(parsed[0].fixes, vec!["crash"]);
        assert_eq!(parsed[0].url.as_deref(), Some("https://example.com/r/1"));
    }

    #[test]
    fn test_json_empty() {
        assert_eq!(JsonFormatter::new().format(&ReleaseCollection::empty()), "[]");
    }
}
