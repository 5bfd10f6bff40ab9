//! Lockdiff Changelog - Changelog parsing and release notes model
//!
//! This crate provides version range utilities, the Markdown changelog
//! parser, the release entry/collection model and its renderers.

pub mod formatter;
pub mod parser;
pub mod sections;
pub mod types;
pub mod version;

pub use formatter::{
    FormatterRegistry, JsonFormatter, MarkdownFormatter, ReleaseFormatter, SummaryFormatter,
};
pub use parser::{ChangelogParser, ParserConfig};
pub use sections::SectionKind;
pub use types::{ReleaseCollection, ReleaseEntry};
pub use version::{in_range, is_prerelease, normalize, strip_prefix, NormalizedVersion, VersionRange};
