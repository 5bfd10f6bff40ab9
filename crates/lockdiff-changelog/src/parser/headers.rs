//! Release header recognition
//!
//! Four header shapes are recognized, tried in a fixed priority order. The
//! first match wins for a given line. A bracketed version may be followed by
//! a link target, as conventional-changelog writes `## [1.2.0](url) (date)`.

use regex::Regex;
use std::sync::LazyLock;

/// `## [1.2.0] - 2023-06-01`
static BRACKETED_DASH_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<level>#{1,3})\s*\[[vV]?(?P<version>\d+\.\d+[0-9A-Za-z.+\-]*)\](?:\([^)\s]+\))?\s*[-–—]\s*(?P<date>\d{4}-\d{2}-\d{2})",
    )
    .expect("Invalid regex")
});

/// `## v1.2.0 - 2023-06-01`
static DASH_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<level>#{1,3})\s*[vV]?(?P<version>\d+\.\d+[0-9A-Za-z.+\-]*?)\s+[-–—]\s*(?P<date>\d{4}-\d{2}-\d{2})",
    )
    .expect("Invalid regex")
});

/// `## 1.2.0 (2023-06-01)`, `## [1.2.0] (2023-06-01)` or `## [1.2.0](url) (2023-06-01)`
static PAREN_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<level>#{1,3})\s*\[?[vV]?(?P<version>\d+\.\d+[0-9A-Za-z.+\-]*?)(?:\](?:\([^)\s]+\))?)?\s*\((?P<date>\d{4}-\d{2}-\d{2})\)",
    )
    .expect("Invalid regex")
});

/// `## 1.2.0` or `## [v1.2.0]`
static NO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<level>#{1,3})\s*\[?[vV]?(?P<version>\d+\.\d+[0-9A-Za-z.+\-]*?)(?:\](?:\([^)\s]+\))?)?\s*$",
    )
    .expect("Invalid regex")
});

/// Any Markdown heading
static ANY_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<level>#{1,6})\s").expect("Invalid regex"));

/// A recognized release header line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseHeader {
    /// Version text as written, without brackets or `v`
    pub version: String,
    /// Date text, when the header carries one
    pub date: Option<String>,
    /// Number of `#` characters
    pub level: usize,
}

/// Match a line against the release header shapes, in priority order
pub fn match_release_header(line: &str) -> Option<ReleaseHeader> {
    let line = line.trim_end();
    [&*BRACKETED_DASH_DATE, &*DASH_DATE, &*PAREN_DATE, &*NO_DATE]
        .into_iter()
        .find_map(|re| {
            let caps = re.captures(line)?;
            Some(ReleaseHeader {
                version: caps.name("version")?.as_str().to_string(),
                date: caps.name("date").map(|m| m.as_str().to_string()),
                level: caps.name("level")?.as_str().len(),
            })
        })
}

/// Level of a Markdown heading line, if it is one
pub fn heading_level(line: &str) -> Option<usize> {
    ANY_HEADING
        .captures(line)
        .and_then(|caps| caps.name("level"))
        .map(|m| m.as_str().len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(line: &str) -> (String, Option<String>) {
        let h = match_release_header(line).unwrap();
        (h.version, h.date)
    }

    #[test]
    fn test_bracketed_dash_date() {
        assert_eq!(
            header("## [1.2.0] - 2023-06-01"),
            ("1.2.0".to_string(), Some("2023-06-01".to_string()))
        );
        assert_eq!(
            header("## [v2.0.0-beta.1] – 2024-01-15 [YANKED]"),
            ("2.0.0-beta.1".to_string(), Some("2024-01-15".to_string()))
        );
    }

    #[test]
    fn test_dash_date() {
        assert_eq!(
            header("## v1.2.0 - 2023-06-01"),
            ("1.2.0".to_string(), Some("2023-06-01".to_string()))
        );
        assert_eq!(
            header("# 3.0.0-RC1 - 2023-06-01"),
            ("3.0.0-RC1".to_string(), Some("2023-06-01".to_string()))
        );
    }

    #[test]
    fn test_paren_date() {
        assert_eq!(
            header("### 1.2.0 (2023-06-01)"),
            ("1.2.0".to_string(), Some("2023-06-01".to_string()))
        );
        assert_eq!(
            header("## [1.2.0] (2023-06-01)"),
            ("1.2.0".to_string(), Some("2023-06-01".to_string()))
        );
    }

    #[test]
    fn test_linked_version() {
        assert_eq!(
            header("## [1.2.0](https://github.com/a/b/compare/v1.1.0...v1.2.0) (2023-06-01)"),
            ("1.2.0".to_string(), Some("2023-06-01".to_string()))
        );
        assert_eq!(
            header("# [2.0.0](https://github.com/a/b/compare/v1.2.0...v2.0.0) (2023-07-01)"),
            ("2.0.0".to_string(), Some("2023-07-01".to_string()))
        );
        assert_eq!(
            header("## [1.2.0](https://github.com/a/b/releases/tag/v1.2.0) - 2023-06-01"),
            ("1.2.0".to_string(), Some("2023-06-01".to_string()))
        );
        assert_eq!(
            header("### [1.1.1](https://github.com/a/b/compare/v1.1.0...v1.1.1)"),
            ("1.1.1".to_string(), None)
        );
        assert_eq!(match_release_header("# [2.0.0](https://x/y) (2023-07-01)").unwrap().level, 1);
    }

    #[test]
    fn test_no_date() {
        assert_eq!(header("## 1.2.0"), ("1.2.0".to_string(), None));
        assert_eq!(header("## [v1.2.0]"), ("1.2.0".to_string(), None));
        assert_eq!(header("## V1.2.0.3  "), ("1.2.0.3".to_string(), None));
    }

    #[test]
    fn test_level() {
        assert_eq!(match_release_header("# 1.0.0").unwrap().level, 1);
        assert_eq!(match_release_header("### 1.0.0").unwrap().level, 3);
    }

    #[test]
    fn test_non_headers() {
        assert!(match_release_header("### Added").is_none());
        assert!(match_release_header("## [Unreleased]").is_none());
        assert!(match_release_header("#### 1.0.0").is_none());
        assert!(match_release_header("- 1.0.0").is_none());
        assert!(match_release_header("## Version 1.0.0 is great").is_none());
        assert!(match_release_header("## [1.0.0](not a link) (2023-01-01)").is_none());
    }

    #[test]
    fn test_heading_level() {
        assert_eq!(heading_level("## [Unreleased]"), Some(2));
        assert_eq!(heading_level("### Added"), Some(3));
        assert_eq!(heading_level("#123 fixed"), None);
        assert_eq!(heading_level("text"), None);
    }
}
