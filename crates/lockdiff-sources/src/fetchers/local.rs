//! Changelog shipped inside the installed package

use std::path::Path;

use async_trait::async_trait;
use lockdiff_changelog::ReleaseCollection;
use lockdiff_core::config::ChangelogConfig;
use lockdiff_core::{FetchError, SourceKind};
use tracing::{debug, instrument};

use super::parse_changelog;
use crate::traits::ReleaseNotesFetcher;
use crate::types::ReleaseNotesRequest;

/// Reads the first changelog file found in the package directory
pub struct LocalChangelogFetcher {
    file_names: Vec<String>,
}

impl LocalChangelogFetcher {
    /// Create a new fetcher with the default file names
    pub fn new() -> Self {
        Self::from_config(&ChangelogConfig::default())
    }

    /// Create a fetcher from changelog configuration
    pub fn from_config(config: &ChangelogConfig) -> Self {
        Self {
            file_names: config.file_names.clone(),
        }
    }

    /// Replace the file names tried, in order
    pub fn with_file_names(mut self, names: Vec<String>) -> Self {
        self.file_names = names;
        self
    }

    /// Read the first candidate file that exists
    async fn read_first(&self, dir: &Path) -> Option<(String, String)> {
        for name in &self.file_names {
            let path = dir.join(name);
            match tokio::fs::read_to_string(&path).await.map_err(FetchError::from) {
                Ok(content) => return Some((name.clone(), content)),
                Err(e) if e.is_not_found() => continue,
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "failed to read changelog");
                    return None;
                }
            }
        }

        debug!(dir = %dir.display(), "no changelog file found");
        None
    }
}

impl Default for LocalChangelogFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReleaseNotesFetcher for LocalChangelogFetcher {
    fn name(&self) -> &'static str {
        "local"
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Local
    }

    fn supports(&self, _repository_url: Option<&str>, local_path: Option<&Path>) -> bool {
        local_path.is_some_and(Path::is_dir)
    }

    #[instrument(skip(self, request), fields(package = %request.package))]
    async fn fetch(&self, request: &ReleaseNotesRequest) -> Option<ReleaseCollection> {
        let dir = request.local_path.as_deref()?;
        let (file, content) = self.read_first(dir).await?;
        debug!(file = %file, bytes = content.len(), "found local changelog");
        parse_changelog(self.name(), &content, request)
    }
}
