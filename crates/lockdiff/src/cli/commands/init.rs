//! Init command

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::info;

use lockdiff_core::config::defaults::{DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_YAML};

use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// Initialize a new lockdiff configuration
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, "executing init command");
        let cwd = std::env::current_dir()?;
        let config_path = self.write_config(&cwd)?;

        match cli.format {
            OutputFormat::Json => {
                let result = serde_json::json!({ "path": config_path });
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
            OutputFormat::Text if !cli.quiet => {
                output::success(&format!(
                    "Created {}",
                    output::path_style().apply_to(config_path.display())
                ));
            }
            OutputFormat::Text => {}
        }

        Ok(())
    }

    /// Write the default configuration, refusing to overwrite unless forced
    fn write_config(&self, dir: &Path) -> anyhow::Result<PathBuf> {
        let config_path = match &self.output {
            Some(path) => dir.join(path),
            None => dir.join(DEFAULT_CONFIG_YAML),
        };

        if config_path.exists() && !self.force {
            anyhow::bail!(
                "Configuration file already exists at {}. Use --force to overwrite.",
                config_path.display()
            );
        }

        std::fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE)?;
        Ok(config_path)
    }
}
