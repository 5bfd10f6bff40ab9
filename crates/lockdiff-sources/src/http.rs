//! HTTP access for remote sources
//!
//! Fetchers depend on the [`HttpClient`] trait rather than on reqwest
//! directly so they can be driven by canned responses in tests.

use std::time::Duration;

use async_trait::async_trait;
use lockdiff_core::config::{HttpConfig, ProvidersConfig};
use lockdiff_core::FetchError;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};

/// Minimal HTTP GET capability
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Fetch a URL and return its body as text
    ///
    /// A 404 maps to [`FetchError::NotFound`] and an empty body to
    /// [`FetchError::EmptyBody`].
    async fn get(&self, url: &str) -> Result<String, FetchError>;
}

/// Settings for [`ReqwestClient`]
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// User-Agent header
    pub user_agent: String,
    /// Token sent to GitHub hosts
    pub github_token: Option<String>,
    /// Token sent to GitLab hosts
    pub gitlab_token: Option<String>,
    /// Hostnames treated as GitLab for authentication
    pub gitlab_hosts: Vec<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self::from_config(&HttpConfig::default(), &ProvidersConfig::default())
    }
}

impl HttpClientConfig {
    /// Build client settings from configuration sections
    pub fn from_config(http: &HttpConfig, providers: &ProvidersConfig) -> Self {
        let mut gitlab_hosts = vec!["gitlab.com".to_string()];
        if let Some(host) = host_of(&providers.gitlab_url) {
            if !gitlab_hosts.contains(&host) {
                gitlab_hosts.push(host);
            }
        }
        for host in &providers.gitlab_hosts {
            let host = host.to_lowercase();
            if !gitlab_hosts.contains(&host) {
                gitlab_hosts.push(host);
            }
        }

        Self {
            timeout: Duration::from_secs(http.timeout_secs),
            user_agent: http.user_agent.clone(),
            github_token: None,
            gitlab_token: None,
            gitlab_hosts,
        }
    }

    /// Set the GitHub token; blank tokens are ignored
    pub fn with_github_token(mut self, token: Option<String>) -> Self {
        self.github_token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// Set the GitLab token; blank tokens are ignored
    pub fn with_gitlab_token(mut self, token: Option<String>) -> Self {
        self.gitlab_token = token.filter(|t| !t.trim().is_empty());
        self
    }
}

/// [`HttpClient`] backed by reqwest
pub struct ReqwestClient {
    config: HttpClientConfig,
    client: Client,
}

/// Which credential a request should carry
#[derive(Debug, PartialEq, Eq)]
enum Auth<'a> {
    GitHub(&'a str),
    GitLab(&'a str),
    None,
}

impl ReqwestClient {
    /// Create a new client
    pub fn new(config: HttpClientConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self { config, client })
    }

    fn auth_for(&self, url: &str) -> Auth<'_> {
        let Some(host) = host_of(url) else {
            return Auth::None;
        };

        if host == "github.com" || host.ends_with(".github.com") || host.ends_with("githubusercontent.com") {
            if let Some(token) = &self.config.github_token {
                return Auth::GitHub(token);
            }
        } else if self.config.gitlab_hosts.iter().any(|h| *h == host) {
            if let Some(token) = &self.config.gitlab_token {
                return Auth::GitLab(token);
            }
        }

        Auth::None
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    #[instrument(skip(self))]
    async fn get(&self, url: &str) -> Result<String, FetchError> {
        let mut request = self.client.get(url);
        request = match self.auth_for(url) {
            Auth::GitHub(token) => request.header("Authorization", format!("Bearer {}", token)),
            Auth::GitLab(token) => request.header("PRIVATE-TOKEN", token),
            Auth::None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if body.trim().is_empty() {
            return Err(FetchError::EmptyBody(url.to_string()));
        }

        debug!(bytes = body.len(), "response received");
        Ok(body)
    }
}

/// Lowercased host of an absolute URL
fn host_of(url: &str) -> Option<String> {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_lowercase))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(github: Option<&str>, gitlab: Option<&str>) -> ReqwestClient {
        let providers = ProvidersConfig {
            gitlab_hosts: vec!["git.example.org".to_string()],
            ..Default::default()
        };
        let config = HttpClientConfig::from_config(&HttpConfig::default(), &providers)
            .with_github_token(github.map(String::from))
            .with_gitlab_token(gitlab.map(String::from));
        ReqwestClient::new(config).unwrap()
    }

    #[test]
    fn test_auth_selected_by_host() {
        let c = client(Some("gh"), Some("gl"));
        assert_eq!(c.auth_for("https://api.github.com/repos/a/b/releases"), Auth::GitHub("gh"));
        assert_eq!(
            c.auth_for("https://raw.githubusercontent.com/a/b/main/CHANGELOG.md"),
            Auth::GitHub("gh")
        );
        assert_eq!(c.auth_for("https://gitlab.com/api/v4/projects/a%2Fb"), Auth::GitLab("gl"));
        assert_eq!(c.auth_for("https://git.example.org/a/b/-/raw/main/CHANGELOG.md"), Auth::GitLab("gl"));
        assert_eq!(c.auth_for("https://example.com/a"), Auth::None);
        assert_eq!(c.auth_for("not a url"), Auth::None);
    }

    #[test]
    fn test_no_token_means_no_auth() {
        let c = client(None, Some("  "));
        assert_eq!(c.auth_for("https://api.github.com/x"), Auth::None);
        assert_eq!(c.auth_for("https://gitlab.com/x"), Auth::None);
    }

    #[test]
    fn test_config_from_sections() {
        let http = HttpConfig {
            timeout_secs: 3,
            user_agent: "test-agent".to_string(),
        };
        let providers = ProvidersConfig {
            gitlab_url: "https://gitlab.internal".to_string(),
            ..Default::default()
        };
        let config = HttpClientConfig::from_config(&http, &providers);
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.user_agent, "test-agent");
        assert!(config.gitlab_hosts.contains(&"gitlab.internal".to_string()));
        assert!(config.gitlab_hosts.contains(&"gitlab.com".to_string()));
    }
}
