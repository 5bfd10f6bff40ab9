//! Release notes sources for lockdiff
//!
//! This crate locates release notes for a package version range. Three
//! interchangeable fetchers read from different places:
//!
//! - **Local**: a changelog file inside the installed package directory
//! - **Remote changelog**: a changelog file in the hosted repository
//! - **Releases API**: the repository host's structured releases endpoint
//!
//! A [`ReleaseNotesResolver`] chains them in a caller-chosen order and
//! returns the first non-empty result.
//!
//! ## Usage
//!
//! ```ignore
//! use lockdiff_sources::{ReleaseNotesRequest, ReleaseNotesResolver, ReqwestClient};
//!
//! let http = Arc::new(ReqwestClient::new(HttpClientConfig::default())?);
//! let resolver = ReleaseNotesResolver::from_config(&config, http);
//! let request = ReleaseNotesRequest::new("symfony/console", "6.3.0", "6.4.0")
//!     .with_repository("https://github.com/symfony/console.git");
//! if let Some(notes) = resolver.resolve(&request).await {
//!     println!("{} releases", notes.len());
//! }
//! ```

pub mod fetchers;
pub mod http;
pub mod repository;
pub mod resolver;
pub mod traits;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use fetchers::{LocalChangelogFetcher, ReleasesApiFetcher, RemoteChangelogFetcher};
pub use http::{HttpClient, HttpClientConfig, ReqwestClient};
pub use repository::{Provider, RepositoryRef};
pub use resolver::ReleaseNotesResolver;
pub use traits::ReleaseNotesFetcher;
pub use types::ReleaseNotesRequest;
