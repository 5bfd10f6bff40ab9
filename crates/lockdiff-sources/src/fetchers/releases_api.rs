//! Provider releases API (GitHub / GitLab)

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use lockdiff_changelog::types::parse_date_or_now;
use lockdiff_changelog::{version, ReleaseCollection, ReleaseEntry};
use lockdiff_core::config::ProvidersConfig;
use lockdiff_core::{ParseError, SourceKind};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::http::HttpClient;
use crate::repository::RepositoryRef;
use crate::traits::ReleaseNotesFetcher;
use crate::types::ReleaseNotesRequest;

/// Release object as returned by the GitHub or GitLab API
///
/// Field names differ between the two providers; aliases cover both.
#[derive(Debug, Deserialize)]
struct ApiRelease {
    tag_name: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, alias = "description")]
    body: Option<String>,
    #[serde(default)]
    draft: bool,
    #[serde(default)]
    prerelease: bool,
    #[serde(default)]
    upcoming_release: bool,
    #[serde(default)]
    published_at: Option<String>,
    #[serde(default)]
    released_at: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    html_url: Option<String>,
    #[serde(default, rename = "_links")]
    links: Option<ApiLinks>,
}

#[derive(Debug, Deserialize)]
struct ApiLinks {
    #[serde(default, rename = "self")]
    self_url: Option<String>,
}

impl ApiRelease {
    /// Version carried by the tag; monorepo tags like `pkg@1.2.0` keep the part after `@`
    fn version(&self) -> &str {
        let tag = self.tag_name.rsplit('@').next().unwrap_or(&self.tag_name);
        version::strip_prefix(tag)
    }

    fn is_prerelease(&self) -> bool {
        self.prerelease || self.upcoming_release || version::is_prerelease(self.version())
    }

    fn into_entry(self) -> ReleaseEntry {
        let date = self
            .published_at
            .as_deref()
            .or(self.released_at.as_deref())
            .or(self.created_at.as_deref());
        let url = self
            .html_url
            .or_else(|| self.links.and_then(|l| l.self_url));

        let mut entry = ReleaseEntry::new(self.tag_name)
            .with_title(self.name.unwrap_or_default())
            .with_body(self.body.unwrap_or_default())
            .with_date(parse_date_or_now(date));
        if let Some(url) = url {
            entry = entry.with_url(url);
        }
        entry
    }
}

/// Lists releases through the hosting provider's API
pub struct ReleasesApiFetcher {
    http: Arc<dyn HttpClient>,
    providers: ProvidersConfig,
}

impl ReleasesApiFetcher {
    /// Create a new fetcher with default provider endpoints
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self::from_config(http, &ProvidersConfig::default())
    }

    /// Create a fetcher from provider configuration
    pub fn from_config(http: Arc<dyn HttpClient>, providers: &ProvidersConfig) -> Self {
        Self {
            http,
            providers: providers.clone(),
        }
    }

    fn repository(&self, url: &str) -> Option<RepositoryRef> {
        RepositoryRef::parse(url, &self.providers.gitlab_hosts)
    }

    /// Keep published releases inside the request's range
    fn select(releases: Vec<ApiRelease>, request: &ReleaseNotesRequest) -> ReleaseCollection {
        let range = request.range();
        releases
            .into_iter()
            .filter(|r| {
                if r.draft {
                    return false;
                }
                if r.is_prerelease() && !request.include_prerelease {
                    return false;
                }
                range.contains(r.version())
            })
            .map(ApiRelease::into_entry)
            .collect()
    }
}

#[async_trait]
impl ReleaseNotesFetcher for ReleasesApiFetcher {
    fn name(&self) -> &'static str {
        "releases_api"
    }

    fn kind(&self) -> SourceKind {
        SourceKind::ReleasesApi
    }

    fn supports(&self, repository_url: Option<&str>, _local_path: Option<&Path>) -> bool {
        repository_url.is_some_and(|url| self.repository(url).is_some())
    }

    #[instrument(skip(self, request), fields(package = %request.package))]
    async fn fetch(&self, request: &ReleaseNotesRequest) -> Option<ReleaseCollection> {
        let repo = request
            .repository_url
            .as_deref()
            .and_then(|url| self.repository(url))?;
        let url = repo.releases_api_url(&self.providers);

        let body = match self.http.get(&url).await {
            Ok(body) => body,
            Err(e) if e.is_not_found() => {
                debug!(repository = %repo, "no releases published");
                return None;
            }
            Err(e) => {
                debug!(url = %url, error = %e, "releases request failed");
                return None;
            }
        };

        let releases: Vec<ApiRelease> = match serde_json::from_str(&body).map_err(ParseError::from) {
            Ok(releases) => releases,
            Err(e) => {
                debug!(url = %url, error = %e, "failed to decode releases");
                return None;
            }
        };

        let total = releases.len();
        let collection = Self::select(releases, request);
        debug!(repository = %repo, total, selected = collection.len(), "releases filtered");
        Some(collection)
    }
}
