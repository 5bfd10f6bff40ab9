//! Release notes resolution chain

use std::sync::Arc;
use std::time::Instant;

use lockdiff_changelog::ReleaseCollection;
use lockdiff_core::{Config, SourceKind};
use tracing::{debug, info, instrument};

use crate::fetchers::{LocalChangelogFetcher, ReleasesApiFetcher, RemoteChangelogFetcher};
use crate::http::HttpClient;
use crate::traits::ReleaseNotesFetcher;
use crate::types::ReleaseNotesRequest;

/// Ordered chain of release notes fetchers
///
/// Fetchers are consulted in registration order and the first non-empty
/// collection wins. The order is part of the contract: with the default
/// chain a package's own changelog is preferred over remote sources.
pub struct ReleaseNotesResolver {
    fetchers: Vec<Arc<dyn ReleaseNotesFetcher>>,
}

impl ReleaseNotesResolver {
    /// Create a new resolver with no fetchers
    pub fn new() -> Self {
        Self {
            fetchers: Vec::new(),
        }
    }

    /// Build the chain described by `config.sources.order`
    pub fn from_config(config: &Config, http: Arc<dyn HttpClient>) -> Self {
        let mut resolver = Self::new();
        for kind in &config.sources.order {
            match kind {
                SourceKind::Local => {
                    resolver.register(LocalChangelogFetcher::from_config(&config.changelog))
                }
                SourceKind::RemoteChangelog => resolver.register(RemoteChangelogFetcher::from_config(
                    http.clone(),
                    &config.changelog,
                    &config.providers,
                )),
                SourceKind::ReleasesApi => resolver.register(ReleasesApiFetcher::from_config(
                    http.clone(),
                    &config.providers,
                )),
            }
        }
        debug!(sources = ?resolver.names(), "resolver configured");
        resolver
    }

    /// Append a fetcher to the chain
    pub fn register<F: ReleaseNotesFetcher + 'static>(&mut self, fetcher: F) {
        self.fetchers.push(Arc::new(fetcher));
    }

    /// Append a fetcher, builder style
    pub fn with_fetcher<F: ReleaseNotesFetcher + 'static>(mut self, fetcher: F) -> Self {
        self.register(fetcher);
        self
    }

    /// All fetchers in chain order
    pub fn fetchers(&self) -> &[Arc<dyn ReleaseNotesFetcher>] {
        &self.fetchers
    }

    /// Names of all fetchers in chain order
    pub fn names(&self) -> Vec<&'static str> {
        self.fetchers.iter().map(|f| f.name()).collect()
    }

    /// Resolve release notes for a package update
    ///
    /// Each supporting fetcher is tried once, in order. Returns `None` when
    /// every fetcher came back empty.
    #[instrument(skip(self, request), fields(
        package = %request.package,
        from = %request.from_version,
        to = %request.to_version
    ))]
    pub async fn resolve(&self, request: &ReleaseNotesRequest) -> Option<ReleaseCollection> {
        let start = Instant::now();

        for fetcher in &self.fetchers {
            let source = fetcher.name();
            if !fetcher.supports(request.repository_url.as_deref(), request.local_path.as_deref()) {
                debug!(source, "source does not support request, skipping");
                continue;
            }

            match fetcher.fetch(request).await {
                Some(collection) if !collection.is_empty() => {
                    info!(
                        source,
                        entries = collection.len(),
                        duration_ms = start.elapsed().as_millis() as u64,
                        "release notes resolved"
                    );
                    return Some(collection);
                }
                Some(_) => debug!(source, "source returned no releases in range"),
                None => debug!(source, "source returned nothing"),
            }
        }

        info!(
            duration_ms = start.elapsed().as_millis() as u64,
            "no release notes found"
        );
        None
    }
}

impl Default for ReleaseNotesResolver {
    fn default() -> Self {
        Self::new()
    }
}
