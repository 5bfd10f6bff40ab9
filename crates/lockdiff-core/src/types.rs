//! Core types for lockdiff

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Package manager domain a package belongs to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    /// PHP Composer (`composer.lock`)
    #[default]
    Composer,
    /// Node npm (`package-lock.json`)
    Npm,
}

impl Ecosystem {
    /// Returns the string representation of the ecosystem
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Composer => "composer",
            Self::Npm => "npm",
        }
    }

    /// Directory packages are installed into, relative to the project root
    pub fn install_dir(&self) -> &'static str {
        match self {
            Self::Composer => "vendor",
            Self::Npm => "node_modules",
        }
    }

    /// Where a package would live on disk inside a project
    ///
    /// Package names may contain a vendor/scope segment (`symfony/console`,
    /// `@babel/core`); each segment becomes a path component.
    pub fn package_dir(&self, project_root: &Path, package: &str) -> PathBuf {
        package
            .split('/')
            .filter(|segment| !segment.is_empty())
            .fold(project_root.join(self.install_dir()), |dir, segment| {
                dir.join(segment)
            })
    }
}

impl std::fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Ecosystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "composer" | "php" => Ok(Self::Composer),
            "npm" | "node" => Ok(Self::Npm),
            _ => Err(format!("Unknown ecosystem: {}", s)),
        }
    }
}

/// A kind of release notes source, used to order the resolution chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Changelog file inside the installed package
    Local,
    /// Changelog file in the hosted repository
    RemoteChangelog,
    /// Structured releases API of the repository host
    ReleasesApi,
}

impl SourceKind {
    /// Returns the string representation of the source kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::RemoteChangelog => "remote_changelog",
            Self::ReleasesApi => "releases_api",
        }
    }

    /// Default fallback priority: fastest source first
    pub fn default_order() -> Vec<SourceKind> {
        vec![Self::Local, Self::RemoteChangelog, Self::ReleasesApi]
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "local" => Ok(Self::Local),
            "remote_changelog" | "remote" => Ok(Self::RemoteChangelog),
            "releases_api" | "api" | "releases" => Ok(Self::ReleasesApi),
            _ => Err(format!("Unknown source: {}", s)),
        }
    }
}
