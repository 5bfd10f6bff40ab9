//! Section detection in free-form release bodies
//!
//! Release bodies have no fixed schema. Headings are matched against a static
//! table of phrases; kinds are tried in priority order so that
//! "Breaking Changes" is classified as [`SectionKind::Breaking`] and never as
//! [`SectionKind::Added`] via "Changes".

use serde::{Deserialize, Serialize};

/// Kind of section recognized inside a release body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    /// Backwards-incompatible changes
    Breaking,
    /// Security fixes
    Security,
    /// Deprecations
    Deprecated,
    /// Removed functionality
    Removed,
    /// Bug fixes
    Fixed,
    /// New features and other changes
    Added,
}

impl SectionKind {
    /// All kinds, in heading-match priority order. Do not reorder.
    pub const PRIORITY: [SectionKind; 6] = [
        Self::Breaking,
        Self::Security,
        Self::Deprecated,
        Self::Removed,
        Self::Fixed,
        Self::Added,
    ];

    /// Order in which sections are rendered
    pub const DISPLAY: [SectionKind; 6] = [
        Self::Breaking,
        Self::Added,
        Self::Fixed,
        Self::Deprecated,
        Self::Removed,
        Self::Security,
    ];

    /// Heading phrases recognized for this kind, matched as lowercase prefixes
    pub fn phrases(&self) -> &'static [&'static str] {
        match self {
            Self::Breaking => &[
                "breaking changes",
                "breaking change",
                "breaking",
                "bc breaks",
                "bc break",
                "backwards incompatible",
                "backward incompatible",
            ],
            Self::Security => &["security"],
            Self::Deprecated => &["deprecated", "deprecations", "deprecation"],
            Self::Removed => &["removed", "removals", "removal"],
            Self::Fixed => &["fixed", "fixes", "fix", "bug fixes", "bugfixes", "bugfix", "bugs"],
            Self::Added => &[
                "added",
                "what's changed",
                "what's new",
                "new features",
                "features",
                "feature",
                "changed",
                "changes",
                "enhancements",
                "improvements",
                "improved",
                "updated",
            ],
        }
    }

    /// Section title used when rendering
    pub fn title(&self) -> &'static str {
        match self {
            Self::Breaking => "Breaking Changes",
            Self::Security => "Security",
            Self::Deprecated => "Deprecated",
            Self::Removed => "Removed",
            Self::Fixed => "Fixed",
            Self::Added => "Changes",
        }
    }

    /// Classify a heading label, if it names a known section
    pub fn from_heading(label: &str) -> Option<SectionKind> {
        let normalized = label
            .trim_start_matches(|c: char| !c.is_alphanumeric())
            .trim()
            .to_lowercase();

        if normalized.is_empty() {
            return None;
        }

        Self::PRIORITY.into_iter().find(|kind| {
            kind.phrases()
                .iter()
                .any(|phrase| normalized.starts_with(phrase))
        })
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Label of a heading line (`### Fixed`) or a whole-line bold label (`**Fixed:**`)
pub fn heading_label(line: &str) -> Option<&str> {
    let trimmed = line.trim();

    if trimmed.starts_with('#') {
        // `#123` is an issue reference, not a heading
        let rest = trimmed.trim_start_matches('#');
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        return Some(rest.trim());
    }

    let inner = trimmed.strip_prefix("**")?;
    let inner = inner
        .strip_suffix(":**")
        .or_else(|| inner.strip_suffix("**:"))
        .or_else(|| inner.strip_suffix("**"))?;
    if inner.contains("**") {
        return None;
    }
    Some(inner.trim().trim_end_matches(':'))
}

/// Text of a bullet-point line
pub fn bullet_text(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let rest = ["- ", "* ", "+ ", "-\t", "*\t"]
        .iter()
        .find_map(|marker| trimmed.strip_prefix(marker))?;
    let rest = rest.trim();
    if rest.is_empty() {
        None
    } else {
        Some(rest)
    }
}

/// Tracks fenced code blocks while lines are scanned in order
///
/// A block opened with a backtick fence is only closed by a backtick fence,
/// and likewise for tildes.
#[derive(Debug, Default)]
pub struct FenceTracker {
    open: Option<&'static str>,
}

impl FenceTracker {
    /// Create a tracker positioned outside any block
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next line; true if it is a fence delimiter or sits inside a block
    pub fn is_code(&mut self, line: &str) -> bool {
        let marker = ["```", "~~~"]
            .into_iter()
            .find(|marker| line.trim_start().starts_with(marker));

        match (self.open, marker) {
            (Some(open), Some(marker)) if open == marker => {
                self.open = None;
                true
            }
            (Some(_), _) => true,
            (None, Some(marker)) => {
                self.open = Some(marker);
                true
            }
            (None, None) => false,
        }
    }
}

/// Lines of a body outside fenced code blocks
fn prose_lines(body: &str) -> impl Iterator<Item = &str> {
    let mut fences = FenceTracker::new();
    body.lines().filter(move |line| !fences.is_code(line))
}

/// Whether the body contains at least one recognized section heading
pub fn has_sections(body: &str) -> bool {
    prose_lines(body)
        .filter_map(heading_label)
        .any(|label| SectionKind::from_heading(label).is_some())
}

/// Bullet points found under headings of the given kind
pub fn extract(body: &str, kind: SectionKind) -> Vec<String> {
    let mut items = Vec::new();
    let mut current: Option<SectionKind> = None;

    for line in prose_lines(body) {
        if let Some(label) = heading_label(line) {
            current = SectionKind::from_heading(label);
            continue;
        }

        if current == Some(kind) {
            if let Some(text) = bullet_text(line) {
                items.push(text.to_string());
            }
        }
    }

    items
}
