//! Parse command

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use lockdiff_changelog::{ChangelogParser, ParserConfig, ReleaseCollection, VersionRange};

use super::render;
use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// Parse a local changelog file
#[derive(Debug, Args)]
pub struct ParseCommand {
    /// Changelog file to parse
    pub file: PathBuf,

    /// Version before the update (exclusive)
    #[arg(long, value_name = "VERSION")]
    pub from: String,

    /// Version after the update (inclusive)
    #[arg(long, value_name = "VERSION")]
    pub to: String,

    /// Include alpha, beta, RC and dev releases
    #[arg(long)]
    pub prerelease: bool,

    /// Merge all releases into a single summary
    #[arg(long)]
    pub summary: bool,
}

impl ParseCommand {
    /// Execute the parse command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(file = %self.file.display(), from = %self.from, to = %self.to, "executing parse command");
        let collection = self.parse_file()?;

        if collection.is_empty() && cli.format == OutputFormat::Text {
            output::warning(&format!(
                "No releases between {} and {} in {}",
                self.from,
                self.to,
                self.file.display()
            ));
            return Ok(());
        }

        let heading = format!("{} ({} → {})", self.file.display(), self.from, self.to);
        println!("{}", render(&collection, cli, self.summary, &heading)?);

        if !cli.quiet && cli.format == OutputFormat::Text && !collection.contains_version(&self.to) {
            output::info(&format!("{} is not documented in this file", self.to));
        }

        Ok(())
    }

    fn parse_file(&self) -> anyhow::Result<ReleaseCollection> {
        let content = std::fs::read_to_string(&self.file)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", self.file.display(), e))?;

        let parser = ChangelogParser::with_config(ParserConfig::default().with_prerelease(self.prerelease));
        Ok(parser.parse(&content, &VersionRange::new(&self.from, &self.to)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn command(file: PathBuf, from: &str, to: &str, prerelease: bool) -> ParseCommand {
        ParseCommand {
            file,
            from: from.to_string(),
            to: to.to_string(),
            prerelease,
            summary: false,
        }
    }

    #[test]
    fn test_parse_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("CHANGELOG.md");
        std::fs::write(&file, "## 2.0.0-rc1\n- rc\n## 1.1.0 - 2023-01-01\n### Fixed\n- bug\n").unwrap();

        let collection = command(file.clone(), "1.0.0", "2.0.0", false).parse_file().unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.fixes(), vec!["bug"]);

        let collection = command(file, "1.0.0", "2.0.0", true).parse_file().unwrap();
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn test_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = command(temp.path().join("nope.md"), "1.0.0", "2.0.0", false)
            .parse_file()
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
