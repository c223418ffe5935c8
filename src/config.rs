//! Configuration file loading with environment variable overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Generation backend selection and limits.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Artifact persistence settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Prompt style-rewrite settings.
    #[serde(default)]
    pub style: StyleConfig,
}

/// Which backend serves generation calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// Deterministic synthetic backend, no external dependencies.
    #[default]
    Mock,
    /// Remote diffusion inference server reached over HTTP.
    Remote,
}

/// Generation backend configuration.
#[derive(Debug, Deserialize)]
pub struct BackendConfig {
    /// Backend mode: `mock` or `remote`.
    #[serde(default)]
    pub mode: BackendMode,

    /// Base URL of the remote diffusion server (required in remote mode).
    pub base_url: Option<String>,

    /// Per-call timeout in seconds. A call exceeding this is treated as a
    /// backend failure for that unit of work.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Artifact persistence configuration.
#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    /// Whether artifacts are written to disk at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Output directory for persisted artifacts.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

/// Prompt style-rewrite configuration.
#[derive(Debug, Deserialize)]
pub struct StyleConfig {
    /// Rewrite template; must contain a `{prompt}` placeholder.
    #[serde(default = "default_template")]
    pub template: String,
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_true() -> bool {
    true
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_template() -> String {
    crate::style::DEFAULT_TEMPLATE.to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self { mode: BackendMode::default(), base_url: None, timeout_secs: default_timeout_secs() }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { enabled: true, output_dir: default_output_dir() }
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self { template: default_template() }
    }
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    /// Get the remote backend base URL, preferring the environment variable.
    #[must_use]
    pub fn backend_base_url(&self) -> Option<String> {
        std::env::var("MEDIAGEN_BACKEND_URL").ok().or_else(|| self.backend.base_url.clone())
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `MEDIAGEN_CONFIG` environment variable
/// 3. `~/.config/mediagen/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("MEDIAGEN_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

/// Default config path: `~/.config/mediagen/config.toml`.
fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/mediagen/config.toml")
    } else {
        PathBuf::from("mediagen.toml")
    }
}
