//! CLI for the BDM batch PDF downloader.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use bdm_core::config;

use commands::{run_completions, run_man, run_pipeline, run_validate};

/// Top-level CLI for the BDM batch PDF downloader.
#[derive(Debug, Parser)]
#[command(name = "bdm")]
#[command(about = "BDM: browser-driven batch PDF downloader", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download every PDF named in a URL list file.
    Run {
        /// Newline-separated file of URLs, one per line.
        #[arg(default_value = "valid_urls.txt")]
        urls_file: PathBuf,

        /// Place completed PDFs here instead of the configured directory.
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Per-download completion timeout in seconds.
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,

        /// Show the browser window instead of running headless.
        #[arg(long)]
        headful: bool,
    },

    /// Check which lines of a URL list parse as downloadable URLs.
    Validate {
        /// Newline-separated file of URLs, one per line.
        #[arg(default_value = "valid_urls.txt")]
        urls_file: PathBuf,
    },

    /// Generate shell completions to stdout.
    Completions {
        /// Target shell.
        shell: clap_complete::Shell,
    },

    /// Generate man pages into a directory.
    Man {
        /// Output directory for the generated pages.
        #[arg(default_value = "man")]
        out_dir: PathBuf,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Run {
                urls_file,
                output_dir,
                timeout,
                headful,
            } => {
                let mut cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                if let Some(dir) = output_dir {
                    cfg.output_dir = dir;
                }
                if let Some(secs) = timeout {
                    cfg.download_timeout_secs = secs;
                }
                if headful {
                    cfg.browser.headless = false;
                }
                run_pipeline(&cfg, &urls_file).await?;
            }
            CliCommand::Validate { urls_file } => run_validate(&urls_file)?,
            CliCommand::Completions { shell } => run_completions(shell),
            CliCommand::Man { out_dir } => run_man(&out_dir)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
