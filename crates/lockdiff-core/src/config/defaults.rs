//! Default configuration values

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "lockdiff.yaml";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "lockdiff.toml";

/// Alternative configuration file name
pub const ALT_CONFIG_FILE: &str = ".lockdiff.yaml";

/// User-Agent sent to repository hosts
pub const DEFAULT_USER_AGENT: &str = concat!("lockdiff/", env!("CARGO_PKG_VERSION"));

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_YAML,
        DEFAULT_CONFIG_TOML,
        ALT_CONFIG_FILE,
        ".lockdiff.toml",
    ]
}

/// Changelog file names, most common first
pub fn changelog_file_names() -> Vec<&'static str> {
    vec![
        "CHANGELOG.md",
        "CHANGELOG",
        "changelog.md",
        "CHANGES.md",
        "CHANGES",
        "HISTORY.md",
        "History.md",
        "RELEASE_NOTES.md",
        "NEWS.md",
    ]
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# lockdiff configuration

# Sources are tried in order; the first one returning release notes wins.
sources:
  order:
    - local
    - remote_changelog
    - releases_api

changelog:
  file_names:
    - CHANGELOG.md
    - CHANGELOG
    - changelog.md
    - CHANGES.md
    - CHANGES
    - HISTORY.md
    - History.md
    - RELEASE_NOTES.md
    - NEWS.md
  default_branches:
    - main
    - master

include_prerelease: false

http:
  timeout_secs: 15

providers:
  github_api_url: https://api.github.com
  github_raw_url: https://raw.githubusercontent.com
  gitlab_url: https://gitlab.com
  gitlab_hosts: []
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_template_parses() {
        let config: Config = serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.sources.order.len(), 3);
        assert_eq!(config.changelog.file_names.len(), changelog_file_names().len());
    }
}
