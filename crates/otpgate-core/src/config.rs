//! Configuration management for otpgate.
//!
//! Loads configuration from ${OTPGATE_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Environment variable overriding `service.base_url`.
pub const BASE_URL_ENV: &str = "OTPGATE_BASE_URL";

pub mod paths {
    //! Path resolution for otpgate configuration and data files.
    //!
    //! OTPGATE_HOME resolution order:
    //! 1. OTPGATE_HOME environment variable (if set)
    //! 2. ~/.config/otpgate (default)

    use std::path::PathBuf;

    use anyhow::{Context, Result};

    /// Returns the otpgate home directory.
    ///
    /// # Errors
    /// Returns an error if OTPGATE_HOME is unset and no home directory is known.
    pub fn otpgate_home() -> Result<PathBuf> {
        if let Ok(home) = std::env::var("OTPGATE_HOME") {
            return Ok(PathBuf::from(home));
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("otpgate"))
            .context("Could not determine home directory (set OTPGATE_HOME)")
    }

    /// Returns the path to the config.toml file.
    ///
    /// # Errors
    /// See [`otpgate_home`].
    pub fn config_path() -> Result<PathBuf> {
        Ok(otpgate_home()?.join("config.toml"))
    }

    /// Returns the path to the pending-login file.
    ///
    /// # Errors
    /// See [`otpgate_home`].
    pub fn pending_login_path() -> Result<PathBuf> {
        Ok(otpgate_home()?.join("pending_login.json"))
    }

    /// Returns the directory for log files.
    ///
    /// # Errors
    /// See [`otpgate_home`].
    pub fn logs_dir() -> Result<PathBuf> {
        Ok(otpgate_home()?.join("logs"))
    }
}

/// Remote verification service settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub base_url: String,
    /// JSON field carrying the identifier in the credential request.
    pub identifier_field: String,
    /// JSON field carrying the secret in the credential request.
    pub secret_field: String,
    /// Per-request timeout; 0 disables it.
    pub request_timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: Config::DEFAULT_BASE_URL.to_string(),
            identifier_field: "email".to_string(),
            secret_field: "password".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl ServiceConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    /// Parses and validates `base_url`.
    ///
    /// # Errors
    /// Returns an error if the URL is malformed or not http(s).
    pub fn parsed_base_url(&self) -> Result<Url> {
        parse_base_url(&self.base_url)
    }
}

/// Sign-in flow behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Route navigated to after the code is accepted.
    pub success_route: String,
    pub clear_pending_on_success: bool,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            success_route: "/otp".to_string(),
            clear_pending_on_success: true,
        }
    }
}

/// Pending-login persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub pending_login_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            pending_login_key: "userEmail".to_string(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub flow: FlowConfig,
    pub storage: StorageConfig,
}

/// Returns the commented default config written by `config init`.
pub fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

impl Config {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:3000";

    /// Loads configuration from the default path.
    /// Returns defaults if the file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path()?)
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Replaces `service.base_url` when `value` is non-blank.
    #[must_use]
    pub fn with_base_url_override(mut self, value: Option<&str>) -> Self {
        if let Some(url) = value.map(str::trim).filter(|v| !v.is_empty()) {
            self.service.base_url = url.to_string();
        }
        self
    }

    /// Creates a new config file with the default template.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

/// Parses a service base URL, accepting only http and https.
///
/// # Errors
/// Returns an error if the URL is malformed or uses another scheme.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("Invalid base URL '{raw}'"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => anyhow::bail!("Invalid base URL '{raw}': unsupported scheme '{other}'"),
    }
}
