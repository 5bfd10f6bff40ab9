//! CLI commands

mod init;
mod notes;
mod parse;

pub use init::InitCommand;
pub use notes::NotesCommand;
pub use parse::ParseCommand;

use std::sync::Arc;

use lockdiff_changelog::{FormatterRegistry, ReleaseCollection, ReleaseFormatter, SummaryFormatter};

use crate::cli::{Cli, OutputFormat};

/// Render a collection according to the global output format
///
/// `summary` merges all releases under `heading`; JSON output ignores both.
pub(crate) fn render(
    collection: &ReleaseCollection,
    cli: &Cli,
    summary: bool,
    heading: &str,
) -> anyhow::Result<String> {
    let registry = FormatterRegistry::new();
    let formatter: Arc<dyn ReleaseFormatter> = match (cli.format, summary) {
        (OutputFormat::Json, _) => lookup(&registry, "json")?,
        (OutputFormat::Text, true) => Arc::new(SummaryFormatter::new().with_heading(heading)),
        (OutputFormat::Text, false) => lookup(&registry, "markdown")?,
    };
    Ok(formatter.format(collection))
}

fn lookup(registry: &FormatterRegistry, name: &str) -> anyhow::Result<Arc<dyn ReleaseFormatter>> {
    registry
        .get(name)
        .ok_or_else(|| anyhow::anyhow!("Unknown formatter: {}", name))
}
