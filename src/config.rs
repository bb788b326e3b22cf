//! Configuration management for the spotydown client.
//!
//! This module handles loading configuration values from environment variables
//! and `.env` files. Every setting has a default, so a missing `.env` file or an
//! empty environment yields a working client.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Command-line flags (applied by the binary on top of [`Config`])
//! 2. Environment variables
//! 3. `.env` file in the local data directory
//! 4. Application defaults

use std::{env, path::PathBuf, time::Duration};

pub const DEFAULT_API_URL: &str = "https://spotydown.com";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 15;
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECONDS: u64 = 300;
pub const DEFAULT_OUTPUT_DIR: &str = "downloads";
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;
pub const DEFAULT_SIZE_TOLERANCE: f64 = 0.05;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/spotydown/.env`
/// - macOS: `~/Library/Application Support/spotydown/.env`
/// - Windows: `%LOCALAPPDATA%/spotydown/.env`
///
/// A missing file is not an error. Variables already present in the process
/// environment take precedence over the file.
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or the file
/// exists but cannot be parsed.
pub fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotydown/.env");
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Runtime settings for the API client, the file streamer and the CLI.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Scheme and host of the spotydown API, without a trailing slash.
    pub api_base_url: String,
    /// Bound for the metadata, resolve and size-probe requests.
    pub timeout_seconds: u64,
    /// Bound for a whole audio transfer.
    pub download_timeout_seconds: u64,
    /// Directory that receives audio and track info files.
    pub output_dir: PathBuf,
    /// Read size in bytes while streaming audio to disk.
    pub chunk_size: usize,
    /// Fraction of the announced size a download may fall short by before a
    /// warning is raised.
    pub size_tolerance: f64,
    /// Issue a HEAD request before downloading to learn the expected size.
    pub probe_size: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            download_timeout_seconds: DEFAULT_DOWNLOAD_TIMEOUT_SECONDS,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            chunk_size: DEFAULT_CHUNK_SIZE,
            size_tolerance: DEFAULT_SIZE_TOLERANCE,
            probe_size: true,
        }
    }
}

impl Config {
    /// Builds a configuration from the `SPOTYDOWN_*` environment variables.
    ///
    /// # Example
    ///
    /// ```
    /// config::load_env()?;
    /// let config = Config::from_env()?;
    /// ```
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    ///
    /// Unset or empty keys keep their default. Values that fail to parse or
    /// fall outside their valid range are reported with the offending key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Config::default();

        if let Some(url) = get("SPOTYDOWN_API_URL") {
            config.api_base_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(v) = get("SPOTYDOWN_TIMEOUT_SECONDS") {
            config.timeout_seconds = parse_value("SPOTYDOWN_TIMEOUT_SECONDS", &v)?;
        }
        if let Some(v) = get("SPOTYDOWN_DOWNLOAD_TIMEOUT_SECONDS") {
            config.download_timeout_seconds =
                parse_value("SPOTYDOWN_DOWNLOAD_TIMEOUT_SECONDS", &v)?;
        }
        if let Some(v) = get("SPOTYDOWN_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(v.trim());
        }
        if let Some(v) = get("SPOTYDOWN_CHUNK_SIZE") {
            config.chunk_size = parse_value("SPOTYDOWN_CHUNK_SIZE", &v)?;
        }
        if let Some(v) = get("SPOTYDOWN_SIZE_TOLERANCE") {
            config.size_tolerance = parse_value("SPOTYDOWN_SIZE_TOLERANCE", &v)?;
        }
        if let Some(v) = get("SPOTYDOWN_PROBE_SIZE") {
            config.probe_size = parse_flag("SPOTYDOWN_PROBE_SIZE", &v)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.api_base_url.is_empty() {
            return Err("SPOTYDOWN_API_URL must not be empty".to_string());
        }
        if self.timeout_seconds == 0 {
            return Err("SPOTYDOWN_TIMEOUT_SECONDS must be greater than 0".to_string());
        }
        if self.download_timeout_seconds == 0 {
            return Err("SPOTYDOWN_DOWNLOAD_TIMEOUT_SECONDS must be greater than 0".to_string());
        }
        if self.chunk_size == 0 {
            return Err("SPOTYDOWN_CHUNK_SIZE must be greater than 0".to_string());
        }
        if !(0.0..1.0).contains(&self.size_tolerance) {
            return Err(format!(
                "SPOTYDOWN_SIZE_TOLERANCE must be in [0, 1), got {}",
                self.size_tolerance
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_seconds)
    }

    pub fn metadata_endpoint(&self) -> String {
        format!("{}/api/get-metadata", self.api_base_url)
    }

    pub fn resolve_endpoint(&self) -> String {
        format!("{}/api/download-track", self.api_base_url)
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, String>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| format!("Invalid value {:?} for {}: {}", value, key, e))
}

fn parse_flag(key: &str, value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(format!("Invalid value {:?} for {}: expected a boolean", other, key)),
    }
}
