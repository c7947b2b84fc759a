//! Configuration loading and defaults.
//!
//! Config lives at `~/.config/bdm/config.toml` (XDG). A default file is
//! written on first use so users have something to edit.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// How the browser process is launched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserLaunchConfig {
    /// Explicit Chrome/Chromium binary; autodetected when absent.
    #[serde(default)]
    pub chrome_executable: Option<PathBuf>,
    #[serde(default = "default_headless")]
    pub headless: bool,
    /// Extra command-line flags passed to the browser.
    #[serde(default)]
    pub extra_args: Vec<String>,
}

impl Default for BrowserLaunchConfig {
    fn default() -> Self {
        Self {
            chrome_executable: None,
            headless: default_headless(),
            extra_args: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BdmConfig {
    /// Where completed PDFs end up.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Subdirectory of `output_dir` the browser downloads into before placement.
    #[serde(default = "default_incoming_subdir")]
    pub incoming_subdir: String,
    /// How long to wait for a download to complete.
    #[serde(default = "default_download_timeout_secs")]
    pub download_timeout_secs: u64,
    /// How often to poll the download directory while waiting.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Upper bound on a single page navigation.
    #[serde(default = "default_navigation_timeout_secs")]
    pub navigation_timeout_secs: u64,
    #[serde(default)]
    pub browser: BrowserLaunchConfig,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("PDFs")
}

fn default_incoming_subdir() -> String {
    ".incoming".to_string()
}

fn default_download_timeout_secs() -> u64 {
    60
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_navigation_timeout_secs() -> u64 {
    30
}

fn default_headless() -> bool {
    true
}

impl Default for BdmConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            incoming_subdir: default_incoming_subdir(),
            download_timeout_secs: default_download_timeout_secs(),
            poll_interval_ms: default_poll_interval_ms(),
            navigation_timeout_secs: default_navigation_timeout_secs(),
            browser: BrowserLaunchConfig::default(),
        }
    }
}

impl BdmConfig {
    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }
}

/// Path to the config file, creating parent directories as needed.
pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs =
        xdg::BaseDirectories::with_prefix("bdm").context("failed to resolve XDG directories")?;
    xdg_dirs
        .place_config_file("config.toml")
        .context("failed to create config directory")
}

/// Loads the config, writing a default file first if none exists.
pub fn load_or_init() -> Result<BdmConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default = BdmConfig::default();
        let contents =
            toml::to_string_pretty(&default).context("failed to serialize default config")?;
        std::fs::write(&path, contents)
            .with_context(|| format!("failed to write default config to {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default);
    }
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config from {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("failed to parse config at {}", path.display()))
}
