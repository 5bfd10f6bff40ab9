//! Release notes request types

use std::path::PathBuf;

use lockdiff_changelog::VersionRange;
use lockdiff_core::Ecosystem;
use serde::{Deserialize, Serialize};

/// Everything a fetcher needs to look up release notes for one package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseNotesRequest {
    /// Package name (e.g. `symfony/console`)
    pub package: String,
    /// Version before the update
    pub from_version: String,
    /// Version after the update
    pub to_version: String,
    /// Source repository URL
    pub repository_url: Option<String>,
    /// Package ecosystem
    pub ecosystem: Ecosystem,
    /// Installed package directory
    pub local_path: Option<PathBuf>,
    /// Whether pre-release versions are in scope
    pub include_prerelease: bool,
}

impl ReleaseNotesRequest {
    /// Create a new request
    pub fn new(
        package: impl Into<String>,
        from_version: impl Into<String>,
        to_version: impl Into<String>,
    ) -> Self {
        Self {
            package: package.into(),
            from_version: from_version.into(),
            to_version: to_version.into(),
            repository_url: None,
            ecosystem: Ecosystem::default(),
            local_path: None,
            include_prerelease: false,
        }
    }

    /// Set the repository URL
    pub fn with_repository(mut self, url: impl Into<String>) -> Self {
        self.repository_url = Some(url.into());
        self
    }

    /// Set the local package directory
    pub fn with_local_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.local_path = Some(path.into());
        self
    }

    /// Set the ecosystem
    pub fn with_ecosystem(mut self, ecosystem: Ecosystem) -> Self {
        self.ecosystem = ecosystem;
        self
    }

    /// Set whether pre-releases are in scope
    pub fn with_prerelease(mut self, include: bool) -> Self {
        self.include_prerelease = include;
        self
    }

    /// The requested version window
    pub fn range(&self) -> VersionRange {
        VersionRange::new(&self.from_version, &self.to_version)
    }
}
