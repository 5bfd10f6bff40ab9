//! Repository URL recognition
//!
//! Package manifests record repository URLs in many shapes. This module
//! reduces them to a host, an owner path and a repository name, and builds
//! the provider-specific URLs the remote fetchers need.

use lockdiff_core::config::ProvidersConfig;
use serde::{Deserialize, Serialize};

/// Supported repository hosting providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    GitHub,
    GitLab,
}

impl Provider {
    /// Get the provider name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GitHub => "github",
            Self::GitLab => "gitlab",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A repository on a known provider
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryRef {
    /// Hosting provider
    pub provider: Provider,
    /// Lowercased hostname
    pub host: String,
    /// Owner path; may contain `/` for GitLab subgroups
    pub owner: String,
    /// Repository name without `.git`
    pub repo: String,
}

impl RepositoryRef {
    /// Recognize a repository URL
    ///
    /// Accepts `https://host/owner/repo[.git]`, `git+https://`, `git://`,
    /// `ssh://git@host/...`, scp-style `git@host:owner/repo.git` and bare
    /// `host/owner/repo`. `gitlab_hosts` lists self-hosted GitLab instances
    /// in addition to `gitlab.com`.
    pub fn parse(url: &str, gitlab_hosts: &[String]) -> Option<Self> {
        let (host, path) = split_host_and_path(url.trim())?;
        let host = host.to_lowercase();
        let provider = provider_for(&host, gitlab_hosts)?;

        let mut segments: Vec<&str> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match provider {
            // Only owner/repo; anything after is a tree/blob path
            Provider::GitHub => segments.truncate(2),
            // Subgroups are allowed; `/-/` starts a sub-page
            Provider::GitLab => {
                if let Some(pos) = segments.iter().position(|s| *s == "-") {
                    segments.truncate(pos);
                }
            }
        }

        if segments.len() < 2 {
            return None;
        }

        let repo = segments.pop()?;
        let repo = repo.strip_suffix(".git").unwrap_or(repo);
        if repo.is_empty() {
            return None;
        }

        Some(Self {
            provider,
            host,
            owner: segments.join("/"),
            repo: repo.to_string(),
        })
    }

    /// `owner/repo`
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// URL of a file's raw content at a git ref
    pub fn raw_file_url(&self, providers: &ProvidersConfig, git_ref: &str, path: &str) -> String {
        match self.provider {
            Provider::GitHub => format!(
                "{}/{}/{}/{}/{}",
                providers.github_raw_url.trim_end_matches('/'),
                self.owner,
                self.repo,
                git_ref,
                path
            ),
            Provider::GitLab => format!(
                "{}/{}/{}/-/raw/{}/{}",
                self.gitlab_base(providers),
                self.owner,
                self.repo,
                git_ref,
                path
            ),
        }
    }

    /// URL of the provider's list-releases endpoint
    pub fn releases_api_url(&self, providers: &ProvidersConfig) -> String {
        match self.provider {
            Provider::GitHub => format!(
                "{}/repos/{}/{}/releases?per_page=100",
                providers.github_api_url.trim_end_matches('/'),
                self.owner,
                self.repo
            ),
            Provider::GitLab => {
                let project: String =
                    url::form_urlencoded::byte_serialize(self.slug().as_bytes()).collect();
                format!(
                    "{}/api/v4/projects/{}/releases?per_page=100",
                    self.gitlab_base(providers),
                    project
                )
            }
        }
    }

    /// Configured base URL for gitlab.com, the repository's own host otherwise
    fn gitlab_base(&self, providers: &ProvidersConfig) -> String {
        if self.host == "gitlab.com" {
            providers.gitlab_url.trim_end_matches('/').to_string()
        } else {
            format!("https://{}", self.host)
        }
    }
}

impl std::fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}/{}", self.provider, self.owner, self.repo)
    }
}

fn provider_for(host: &str, gitlab_hosts: &[String]) -> Option<Provider> {
    let bare = host.strip_prefix("www.").unwrap_or(host);
    if bare == "github.com" {
        Some(Provider::GitHub)
    } else if bare == "gitlab.com" || gitlab_hosts.iter().any(|h| h.eq_ignore_ascii_case(bare)) {
        Some(Provider::GitLab)
    } else {
        None
    }
}

/// Split a repository URL into host and path
fn split_host_and_path(url: &str) -> Option<(String, String)> {
    let url = url.strip_prefix("git+").unwrap_or(url);

    if url.contains("://") {
        let parsed = url::Url::parse(url).ok()?;
        let host = parsed.host_str()?.to_string();
        return Some((host, parsed.path().to_string()));
    }

    // scp-style: git@host:owner/repo.git
    if let Some((user_host, path)) = url.split_once(':') {
        if let Some((_, host)) = user_host.split_once('@') {
            if !host.is_empty() && !host.contains('/') {
                return Some((host.to_string(), path.to_string()));
            }
        }
    }

    // bare: host/owner/repo
    let (host, path) = url.split_once('/')?;
    if host.contains('.') && !host.contains('@') {
        Some((host.to_string(), path.to_string()))
    } else {
        None
    }
}
