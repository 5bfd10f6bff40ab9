//! Configuration types

use serde::{Deserialize, Serialize};

use crate::types::SourceKind;

/// Main configuration for lockdiff
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Release notes source chain
    pub sources: SourcesConfig,

    /// Changelog file discovery
    pub changelog: ChangelogConfig,

    /// Whether pre-release versions are in scope by default
    pub include_prerelease: bool,

    /// HTTP client settings
    pub http: HttpConfig,

    /// Repository hosting providers
    pub providers: ProvidersConfig,
}

/// Release notes source chain configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Sources tried in order; the first non-empty result wins
    pub order: Vec<SourceKind>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            order: SourceKind::default_order(),
        }
    }
}

/// Changelog file discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// File names tried in order, locally and remotely
    pub file_names: Vec<String>,

    /// Branches tried after the version tag when fetching remotely
    pub default_branches: Vec<String>,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            file_names: super::defaults::changelog_file_names()
                .into_iter()
                .map(String::from)
                .collect(),
            default_branches: vec!["main".to_string(), "master".to_string()],
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            user_agent: super::defaults::DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Repository hosting provider endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// GitHub REST API base URL
    pub github_api_url: String,

    /// GitHub raw content base URL
    pub github_raw_url: String,

    /// GitLab base URL (API and raw content)
    pub gitlab_url: String,

    /// Additional self-hosted GitLab hostnames
    #[serde(default)]
    pub gitlab_hosts: Vec<String>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            github_api_url: "https://api.github.com".to_string(),
            github_raw_url: "https://raw.githubusercontent.com".to_string(),
            gitlab_url: "https://gitlab.com".to_string(),
            gitlab_hosts: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.sources.order.len(), 3);
        assert_eq!(config.sources.order[0], SourceKind::Local);
        assert_eq!(config.changelog.file_names[0], "CHANGELOG.md");
        assert!(!config.include_prerelease);
        assert_eq!(config.http.timeout_secs, 15);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("remote_changelog"));
        assert!(yaml.contains("github_api_url"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_yaml::from_str("include_prerelease: true\n").unwrap();
        assert!(config.include_prerelease);
        assert_eq!(config.sources.order, SourceKind::default_order());
        assert_eq!(config.changelog.default_branches, vec!["main", "master"]);
    }
}
