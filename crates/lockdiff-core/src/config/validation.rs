//! Configuration validation

use std::collections::HashSet;

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_sources(config)?;
    validate_changelog(config)?;
    validate_http(config)?;
    validate_providers(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_sources(config: &Config) -> Result<()> {
    if config.sources.order.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "sources.order".to_string(),
            message: "at least one source is required".to_string(),
        }
        .into());
    }

    let mut seen = HashSet::new();
    for source in &config.sources.order {
        if !seen.insert(source) {
            return Err(ConfigError::InvalidValue {
                field: "sources.order".to_string(),
                message: format!("source '{}' listed more than once", source),
            }
            .into());
        }
    }

    Ok(())
}

fn validate_changelog(config: &Config) -> Result<()> {
    if config.changelog.file_names.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "changelog.file_names".to_string(),
            message: "at least one file name is required".to_string(),
        }
        .into());
    }

    if let Some(name) = config
        .changelog
        .file_names
        .iter()
        .find(|n| n.trim().is_empty() || n.contains(".."))
    {
        return Err(ConfigError::InvalidValue {
            field: "changelog.file_names".to_string(),
            message: format!("invalid file name '{}'", name),
        }
        .into());
    }

    if config.changelog.default_branches.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "changelog.default_branches".to_string(),
            message: "at least one branch is required".to_string(),
        }
        .into());
    }

    Ok(())
}

fn validate_http(config: &Config) -> Result<()> {
    if config.http.timeout_secs == 0 {
        return Err(ConfigError::InvalidValue {
            field: "http.timeout_secs".to_string(),
            message: "must be greater than zero".to_string(),
        }
        .into());
    }

    Ok(())
}

fn validate_providers(config: &Config) -> Result<()> {
    let urls = [
        ("providers.github_api_url", &config.providers.github_api_url),
        ("providers.github_raw_url", &config.providers.github_raw_url),
        ("providers.gitlab_url", &config.providers.gitlab_url),
    ];

    for (field, url) in urls {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                field: field.to_string(),
                message: "must be an http(s) URL".to_string(),
            }
            .into());
        }
    }

    Ok(())
}
