//! Configuration module for stash.

use serde::Deserialize;
use std::path::Path;

use crate::{Result, StashError};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origins. Empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
        }
    }
}

/// Blob storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Path to the blob storage directory.
    #[serde(default = "default_storage_path")]
    pub path: String,
    /// Maximum upload size in megabytes.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size_mb: u64,
}

fn default_storage_path() -> String {
    "uploads".to_string()
}

fn default_max_upload_size() -> u64 {
    10
}

impl StorageConfig {
    /// Maximum upload size in bytes.
    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_size_mb * 1024 * 1024
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            max_upload_size_mb: default_max_upload_size(),
        }
    }
}

/// Preview configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewConfig {
    /// Maximum number of characters in a text snippet.
    #[serde(default = "default_snippet_limit")]
    pub snippet_limit: usize,
    /// Path prefix of the image byte-stream endpoint.
    #[serde(default = "default_image_url_prefix")]
    pub image_url_prefix: String,
}

fn default_snippet_limit() -> usize {
    500
}

fn default_image_url_prefix() -> String {
    "/preview/image".to_string()
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            snippet_limit: default_snippet_limit(),
            image_url_prefix: default_image_url_prefix(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/stash.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Preview configuration.
    #[serde(default)]
    pub preview: PreviewConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(StashError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| StashError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `STASH_STORAGE_PATH`: Override the storage directory
    /// - `STASH_PORT`: Override the listening port
    ///
    /// An unparsable `STASH_PORT` is a configuration error.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(path) = std::env::var("STASH_STORAGE_PATH") {
            if !path.is_empty() {
                self.storage.path = path;
            }
        }

        if let Ok(port) = std::env::var("STASH_PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| StashError::Config(format!("invalid STASH_PORT {port:?}: {e}")))?;
        }

        Ok(())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.preview.snippet_limit == 0 {
            return Err(StashError::Config(
                "preview.snippet_limit must be greater than zero".to_string(),
            ));
        }
        let prefix = self.preview.image_url_prefix.trim_end_matches('/');
        if !is_plain_path_prefix(prefix) {
            return Err(StashError::Config(format!(
                "preview.image_url_prefix must be an absolute path of plain segments, got {:?}",
                self.preview.image_url_prefix
            )));
        }
        if prefix == "/download" {
            return Err(StashError::Config(
                "preview.image_url_prefix collides with the download route".to_string(),
            ));
        }
        if self.storage.max_upload_size_mb == 0 {
            return Err(StashError::Config(
                "storage.max_upload_size_mb must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Whether `prefix` is `/seg/seg...` where each segment is non-empty and
/// made of characters that need no percent-encoding and carry no route
/// syntax (`:` and `*` are excluded). Dot segments are rejected.
fn is_plain_path_prefix(prefix: &str) -> bool {
    let Some(rest) = prefix.strip_prefix('/') else {
        return false;
    };

    !rest.is_empty()
        && rest.split('/').all(|segment| {
            !segment.is_empty()
                && segment != "."
                && segment != ".."
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || "-._~!$&'()+,;=@".contains(c))
        })
}
