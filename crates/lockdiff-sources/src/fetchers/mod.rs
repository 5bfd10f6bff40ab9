//! Release notes fetcher implementations

mod local;
mod releases_api;
mod remote;

pub use local::LocalChangelogFetcher;
pub use releases_api::ReleasesApiFetcher;
pub use remote::RemoteChangelogFetcher;

use lockdiff_changelog::{ChangelogParser, ParserConfig, ReleaseCollection};
use tracing::debug;

use crate::types::ReleaseNotesRequest;

/// Parse a changelog and keep it only if it documents the target version
///
/// A changelog that stops short of `to_version` is incomplete for this
/// update, so the next source in the chain gets a chance instead.
pub(crate) fn parse_changelog(
    source: &str,
    content: &str,
    request: &ReleaseNotesRequest,
) -> Option<ReleaseCollection> {
    let config = ParserConfig::default().with_prerelease(request.include_prerelease);
    let collection = ChangelogParser::with_config(config).parse(content, &request.range());

    if collection.is_empty() {
        debug!(source, package = %request.package, "changelog has no releases in range");
        return None;
    }

    if !collection.contains_version(&request.to_version) {
        debug!(
            source,
            package = %request.package,
            to = %request.to_version,
            entries = collection.len(),
            "changelog does not cover target version"
        );
        return None;
    }

    Some(collection)
}
