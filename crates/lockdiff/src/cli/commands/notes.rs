//! Notes command

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;
use tracing::info;

use lockdiff_core::config::{load_config_or_default, validate_config};
use lockdiff_core::{Config, Ecosystem, SourceKind};
use lockdiff_sources::{
    HttpClient, HttpClientConfig, ReleaseNotesRequest, ReleaseNotesResolver, ReqwestClient,
};

use super::render;
use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// Resolve release notes for a package update
#[derive(Debug, Args)]
pub struct NotesCommand {
    /// Package name (e.g. symfony/console, @babel/core)
    pub package: String,

    /// Version before the update (exclusive)
    #[arg(long, value_name = "VERSION")]
    pub from: String,

    /// Version after the update (inclusive)
    #[arg(long, value_name = "VERSION")]
    pub to: String,

    /// Source repository URL
    #[arg(long, value_name = "URL")]
    pub repository: Option<String>,

    /// Installed package directory (defaults to vendor/<package> or node_modules/<package>)
    #[arg(long, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Package ecosystem (composer, npm)
    #[arg(long, default_value = "composer")]
    pub ecosystem: Ecosystem,

    /// Include alpha, beta, RC and dev releases
    #[arg(long)]
    pub prerelease: bool,

    /// Merge all releases into a single summary
    #[arg(long)]
    pub summary: bool,

    /// Sources to try, in order (local, remote_changelog, releases_api)
    #[arg(long, value_delimiter = ',')]
    pub sources: Vec<SourceKind>,

    /// GitHub API token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// GitLab API token
    #[arg(long, env = "GITLAB_TOKEN", hide_env_values = true)]
    pub gitlab_token: Option<String>,
}

impl NotesCommand {
    /// Execute the notes command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(package = %self.package, from = %self.from, to = %self.to, "executing notes command");
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(self.execute_async(cli))
    }

    async fn execute_async(&self, cli: &Cli) -> anyhow::Result<()> {
        let cwd = std::env::current_dir()?;
        let (config, _) = load_config_or_default(&cwd);
        let config = self.apply_overrides(config)?;

        let http_config = HttpClientConfig::from_config(&config.http, &config.providers)
            .with_github_token(self.github_token.clone())
            .with_gitlab_token(self.gitlab_token.clone());
        let http: Arc<dyn HttpClient> = Arc::new(ReqwestClient::new(http_config)?);
        let resolver = ReleaseNotesResolver::from_config(&config, http);
        let request = self.request(&config, &cwd);

        if cli.verbose && cli.format == OutputFormat::Text {
            println!("{}", output::header("Resolving"));
            println!("{}", output::key_value("package", &request.package));
            println!(
                "{}",
                output::key_value(
                    "versions",
                    &format!(
                        "{} → {}",
                        request.from_version,
                        output::version_style().apply_to(&request.to_version)
                    )
                )
            );
            println!("{}", output::key_value("sources", &resolver.names().join(", ")));
            if let Some(path) = &request.local_path {
                println!(
                    "{}",
                    output::key_value("path", &output::path_style().apply_to(path.display()).to_string())
                );
            }
        }

        let spinner = (cli.format == OutputFormat::Text && !cli.quiet)
            .then(|| output::spinner(format!("Resolving release notes for {}", self.package)));
        let result = resolver.resolve(&request).await;
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }

        match (result, cli.format) {
            (Some(collection), _) => {
                let heading = format!("{} ({} → {})", self.package, self.from, self.to);
                println!("{}", render(&collection, cli, self.summary, &heading)?);
            }
            (None, OutputFormat::Json) => println!("[]"),
            (None, OutputFormat::Text) => output::warning("No release notes found"),
        }

        Ok(())
    }

    /// Apply command-line settings on top of the loaded configuration
    fn apply_overrides(&self, mut config: Config) -> anyhow::Result<Config> {
        if !self.sources.is_empty() {
            config.sources.order = self.sources.clone();
            validate_config(&config)?;
        }
        if self.prerelease {
            config.include_prerelease = true;
        }
        Ok(config)
    }

    fn request(&self, config: &Config, cwd: &Path) -> ReleaseNotesRequest {
        let mut request = ReleaseNotesRequest::new(&self.package, &self.from, &self.to)
            .with_ecosystem(self.ecosystem)
            .with_prerelease(config.include_prerelease);

        if let Some(url) = &self.repository {
            request = request.with_repository(url);
        }
        if let Some(path) = self.local_path(cwd) {
            request = request.with_local_path(path);
        }
        request
    }

    /// Explicit `--path`, else the ecosystem's install directory if present
    fn local_path(&self, cwd: &Path) -> Option<PathBuf> {
        match &self.path {
            Some(path) => Some(cwd.join(path)),
            None => {
                let dir = self.ecosystem.package_dir(cwd, &self.package);
                dir.is_dir().then_some(dir)
            }
        }
    }
}
