//! Application configuration loaded from a TOML file.
//!
//! The default configuration matches the values shown in `config/default.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::remote::dropbox::{DropboxConfig, DEFAULT_API_URL, DEFAULT_CONTENT_URL};

/// Environment variable holding the Dropbox access token.
pub const TOKEN_VAR: &str = "DROPBOX_ACCESS_TOKEN";

/// Top-level application configuration.
///
/// All fields have sensible defaults so dbox works without a config file.
/// Call [`Config::load`] to read from a TOML path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CoreError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => CoreError::PermissionDenied(path.to_path_buf()),
            _ => CoreError::Io(e),
        })?;
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> CoreResult<Self> {
        match Self::load(path) {
            Err(CoreError::NotFound(_)) => Ok(Self::default()),
            other => other,
        }
    }

    /// Builds the Dropbox client configuration for `token`.
    pub fn dropbox(&self, token: String) -> DropboxConfig {
        DropboxConfig {
            token,
            api_url: self.remote.api_url.clone(),
            content_url: self.remote.content_url.clone(),
            timeout: Duration::from_secs(self.remote.timeout_secs),
        }
    }
}

/// Directory holding `default.toml`, `keymap.toml` and `theme.toml`.
///
/// `./config` wins when it exists, otherwise `$HOME/.config/dbox`.
pub fn config_dir() -> PathBuf {
    if Path::new("config").exists() {
        PathBuf::from("config")
    } else {
        home_dir().join(".config").join("dbox")
    }
}

fn home_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

/// Expands a leading `~` to `home`.
fn expand_home(path: &str, home: &Path) -> PathBuf {
    if path == "~" {
        home.to_path_buf()
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}

/// Reads the access token from the environment.
///
/// # Errors
///
/// [`CoreError::MissingCredential`] if the variable is unset or blank.
pub fn access_token() -> CoreResult<String> {
    token_from(std::env::var(TOKEN_VAR).ok())
}

fn token_from(value: Option<String>) -> CoreResult<String> {
    match value {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(CoreError::MissingCredential(TOKEN_VAR)),
    }
}

/// Local download preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_download_path")]
    pub download_path: String,
}

impl GeneralConfig {
    /// The download root with `~` expanded.
    pub fn download_root(&self) -> PathBuf {
        expand_home(&self.download_path, &home_dir())
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            download_path: default_download_path(),
        }
    }
}

/// Remote endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_content_url")]
    pub content_url: String,
    #[serde(default = "default_web_url")]
    pub web_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            content_url: default_content_url(),
            web_url: default_web_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// UI layout and display preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_icons: bool,
    #[serde(default = "default_status_secs")]
    pub status_secs: u64,
    #[serde(default = "default_error_secs")]
    pub error_secs: u64,
}

impl UiConfig {
    pub fn status_duration(&self) -> Duration {
        Duration::from_secs(self.status_secs)
    }

    pub fn error_duration(&self) -> Duration {
        Duration::from_secs(self.error_secs)
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_icons: true,
            status_secs: default_status_secs(),
            error_secs: default_error_secs(),
        }
    }
}

/// Log file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_download_path() -> String {
    "~/.dbox".to_string()
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_content_url() -> String {
    DEFAULT_CONTENT_URL.to_string()
}

fn default_web_url() -> String {
    "https://www.dropbox.com/home".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_status_secs() -> u64 {
    3
}

fn default_error_secs() -> u64 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}
