//! Release notes fetcher trait

use std::path::Path;

use lockdiff_changelog::ReleaseCollection;
use lockdiff_core::SourceKind;

use crate::types::ReleaseNotesRequest;

/// Trait for release notes sources
///
/// Implementations never fail: every problem (unsupported input, missing
/// files, network errors, undecodable payloads, incomplete changelogs) is
/// reported as `None` and logged at debug level.
#[async_trait::async_trait]
pub trait ReleaseNotesFetcher: Send + Sync {
    /// Get the fetcher name
    fn name(&self) -> &'static str;

    /// Get the source kind
    fn kind(&self) -> SourceKind;

    /// Whether this fetcher can work with the given inputs
    fn supports(&self, repository_url: Option<&str>, local_path: Option<&Path>) -> bool;

    /// Fetch release notes for the request's version range
    async fn fetch(&self, request: &ReleaseNotesRequest) -> Option<ReleaseCollection>;
}
