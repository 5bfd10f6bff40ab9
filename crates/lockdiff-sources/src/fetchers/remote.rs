//! Changelog file in the hosted repository

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use lockdiff_changelog::ReleaseCollection;
use lockdiff_core::config::{ChangelogConfig, ProvidersConfig};
use lockdiff_core::{FetchError, SourceKind};
use tracing::{debug, instrument};

use super::parse_changelog;
use crate::http::HttpClient;
use crate::repository::RepositoryRef;
use crate::traits::ReleaseNotesFetcher;
use crate::types::ReleaseNotesRequest;

/// Downloads a changelog file from GitHub or GitLab raw content
///
/// Refs are tried in order: the target version as given, the target
/// version with its `v` prefix toggled, then each default branch. For each
/// ref every configured file name is tried before moving on.
pub struct RemoteChangelogFetcher {
    http: Arc<dyn HttpClient>,
    providers: ProvidersConfig,
    file_names: Vec<String>,
    default_branches: Vec<String>,
}

impl RemoteChangelogFetcher {
    /// Create a new fetcher with default configuration
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self::from_config(http, &ChangelogConfig::default(), &ProvidersConfig::default())
    }

    /// Create a fetcher from configuration sections
    pub fn from_config(
        http: Arc<dyn HttpClient>,
        changelog: &ChangelogConfig,
        providers: &ProvidersConfig,
    ) -> Self {
        Self {
            http,
            providers: providers.clone(),
            file_names: changelog.file_names.clone(),
            default_branches: changelog.default_branches.clone(),
        }
    }

    fn repository(&self, url: &str) -> Option<RepositoryRef> {
        RepositoryRef::parse(url, &self.providers.gitlab_hosts)
    }

    /// Whether a failed candidate still lets the next one be tried
    ///
    /// Client errors mean this particular path is unusable. Throttling,
    /// server and transport failures would repeat for every candidate.
    fn is_skippable(error: &FetchError) -> bool {
        match error {
            FetchError::Status { status, .. } => {
                (400..500).contains(status) && !matches!(status, 403 | 429)
            }
            other => other.is_not_found(),
        }
    }

    /// Git refs to try, deduplicated, in priority order
    fn candidate_refs(&self, to_version: &str) -> Vec<String> {
        let toggled = match to_version.strip_prefix(['v', 'V']) {
            Some(stripped) => stripped.to_string(),
            None => format!("v{}", to_version),
        };

        let mut refs: Vec<String> = Vec::new();
        for candidate in [to_version.to_string(), toggled]
            .into_iter()
            .chain(self.default_branches.iter().cloned())
        {
            if !candidate.is_empty() && !refs.contains(&candidate) {
                refs.push(candidate);
            }
        }
        refs
    }
}

#[async_trait]
impl ReleaseNotesFetcher for RemoteChangelogFetcher {
    fn name(&self) -> &'static str {
        "remote_changelog"
    }

    fn kind(&self) -> SourceKind {
        SourceKind::RemoteChangelog
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

        for git_ref in self.candidate_refs(&request.to_version) {
            for file in &self.file_names {
                let url = repo.raw_file_url(&self.providers, &git_ref, file);
                match self.http.get(&url).await {
                    Ok(content) => {
                        debug!(repository = %repo, git_ref = %git_ref, file = %file, "found remote changelog");
                        return parse_changelog(self.name(), &content, request);
                    }
                    Err(e) if Self::is_skippable(&e) => {
                        if !e.is_not_found() {
                            debug!(url = %url, error = %e, "skipping remote changelog candidate");
                        }
                        continue;
                    }
                    Err(e) => {
                        debug!(url = %url, error = %e, "remote changelog request failed");
                        return None;
                    }
                }
            }
        }

        debug!(repository = %repo, "no remote changelog found");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeHttpClient;

    const RAW: &str = "https://raw.githubusercontent.com/acme/widget";

    fn request(to: &str) -> ReleaseNotesRequest {
        ReleaseNotesRequest::new("acme/widget", "1.0.0", to)
            .with_repository("git@github.com:acme/widget.git")
    }

    #[test]
    fn test_candidate_refs() {
        let fetcher = RemoteChangelogFetcher::new(Arc::new(FakeHttpClient::new()));
        assert_eq!(fetcher.candidate_refs("1.1.0"), vec!["1.1.0", "v1.1.0", "main", "master"]);
        assert_eq!(fetcher.candidate_refs("v1.1.0"), vec!["v1.1.0", "1.1.0", "main", "master"]);
    }

    #[test]
    fn test_supports_known_hosts_only() {
        let fetcher = RemoteChangelogFetcher::new(Arc::new(FakeHttpClient::new()));
        assert!(fetcher.supports(Some("https://github.com/acme/widget"), None));
        assert!(fetcher.supports(Some("https://gitlab.com/acme/widget"), None));
        assert!(!fetcher.supports(Some("https://example.com/acme/widget"), None));
        assert!(!fetcher.supports(None, Some(Path::new("/tmp"))));
    }

    #[tokio::test]
    async fn test_tag_before_branches() {
        let http = Arc::new(
            FakeHttpClient::new()
                .with_body(&format!("{}/v1.1.0/CHANGELOG.md", RAW), "## 1.1.0\n- from tag\n")
                .with_body(&format!("{}/main/CHANGELOG.md", RAW), "## 1.1.0\n- from main\n"),
        );
        let fetcher = RemoteChangelogFetcher::new(http.clone());

        let collection = fetcher.fetch(&request("1.1.0")).await.unwrap();
        assert_eq!(collection.entries()[0].body, "- from tag");

        // Every file name under the bare tag is tried before the v-prefixed tag
        let requests = http.requests();
        assert!(requests[0].ends_with("/1.1.0/CHANGELOG.md"));
        assert!(requests.iter().position(|u| u.contains("/v1.1.0/")).unwrap() > 1);
        assert!(!requests.iter().any(|u| u.contains("/main/")));
    }

    #[tokio::test]
    async fn test_falls_back_to_default_branch() {
        let http = Arc::new(
            FakeHttpClient::new().with_body(&format!("{}/master/CHANGES.md", RAW), "## 1.1.0\n- b\n"),
        );
        let fetcher = RemoteChangelogFetcher::new(http);

        let collection = fetcher.fetch(&request("1.1.0")).await.unwrap();
        assert_eq!(collection.len(), 1);
    }

    #[tokio::test]
    async fn test_first_body_wins_even_if_incomplete() {
        let http = Arc::new(
            FakeHttpClient::new()
                .with_body(&format!("{}/main/CHANGELOG.md", RAW), "## 1.0.5\n- old\n")
                .with_body(&format!("{}/master/CHANGELOG.md", RAW), "## 2.0.0\n- new\n"),
        );
        let fetcher = RemoteChangelogFetcher::new(http);

        assert!(fetcher.fetch(&request("2.0.0")).await.is_none());
    }

    #[tokio::test]
    async fn test_server_error_stops_fetcher() {
        let http = Arc::new(
            FakeHttpClient::new()
                .with_status(&format!("{}/1.1.0/CHANGELOG.md", RAW), 500)
                .with_body(&format!("{}/main/CHANGELOG.md", RAW), "## 1.1.0\n- b\n"),
        );
        let fetcher = RemoteChangelogFetcher::new(http.clone());

        assert!(fetcher.fetch(&request("1.1.0")).await.is_none());
        assert_eq!(http.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_client_error_moves_to_next_candidate() {
        let http = Arc::new(
            FakeHttpClient::new()
                .with_status(&format!("{}/1.1.0/CHANGELOG.md", RAW), 400)
                .with_status(&format!("{}/1.1.0/CHANGELOG", RAW), 410)
                .with_body(&format!("{}/main/CHANGELOG.md", RAW), "## 1.1.0\n- b\n"),
        );
        let fetcher = RemoteChangelogFetcher::new(http.clone());

        let collection = fetcher.fetch(&request("1.1.0")).await.unwrap();
        assert_eq!(collection.entries()[0].body, "- b");
        assert!(http.requests().len() > 2);
    }

    #[tokio::test]
    async fn test_throttling_stops_fetcher() {
        for status in [403, 429] {
            let http = Arc::new(
                FakeHttpClient::new()
                    .with_status(&format!("{}/1.1.0/CHANGELOG.md", RAW), status)
                    .with_body(&format!("{}/main/CHANGELOG.md", RAW), "## 1.1.0\n- b\n"),
            );
            let fetcher = RemoteChangelogFetcher::new(http.clone());

            assert!(fetcher.fetch(&request("1.1.0")).await.is_none());
            assert_eq!(http.requests().len(), 1);
        }
    }

    #[test]
    fn test_skippable_errors() {
        let status = |status| FetchError::Status {
            status,
            url: RAW.to_string(),
        };
        assert!(RemoteChangelogFetcher::is_skippable(&FetchError::NotFound(RAW.to_string())));
        assert!(RemoteChangelogFetcher::is_skippable(&status(400)));
        assert!(RemoteChangelogFetcher::is_skippable(&status(451)));
        assert!(!RemoteChangelogFetcher::is_skippable(&status(403)));
        assert!(!RemoteChangelogFetcher::is_skippable(&status(429)));
        assert!(!RemoteChangelogFetcher::is_skippable(&status(503)));
        assert!(!RemoteChangelogFetcher::is_skippable(&FetchError::Transport("reset".to_string())));
    }

    #[tokio::test]
    async fn test_nothing_found() {
        let http = Arc::new(FakeHttpClient::new());
        let fetcher = RemoteChangelogFetcher::new(http.clone());

        assert!(fetcher.fetch(&request("1.1.0")).await.is_none());
        // 4 refs x 9 default file names
        assert_eq!(http.requests().len(), 36);
    }
}
