//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `DATA_FILE` - JSON snapshot path (default: `data.json`; empty disables persistence)
//! - `BASE_URL` - Public origin used in returned short URLs (default: derived from `Host`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `COLLISION_WARN_THRESHOLD` - Collisions per allocation before warning (default: 16)

use anyhow::Result;
use std::env;
use std::path::PathBuf;

use crate::application::services::link_service::DEFAULT_COLLISION_WARN_THRESHOLD;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    /// `None` keeps the mapping in memory only.
    pub data_file: Option<PathBuf>,
    pub base_url: Option<String>,
    pub log_level: String,
    pub log_format: String,
    pub collision_warn_threshold: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Currently infallible; kept fallible so new required variables do not
    /// change the signature.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let data_file = Self::load_data_file();

        let base_url = env::var("BASE_URL")
            .ok()
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty());

        let collision_warn_threshold = env::var("COLLISION_WARN_THRESHOLD")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_COLLISION_WARN_THRESHOLD);

        Ok(Self {
            listen_addr,
            data_file,
            base_url,
            log_level,
            log_format,
            collision_warn_threshold,
        })
    }

    /// Resolves the snapshot path.
    ///
    /// Priority:
    /// 1. `DATA_FILE` set to an empty string disables persistence
    /// 2. `DATA_FILE` set to a path uses that path
    /// 3. Unset falls back to `data.json`
    fn load_data_file() -> Option<PathBuf> {
        match env::var("DATA_FILE") {
            Ok(path) if path.trim().is_empty() => None,
            Ok(path) => Some(PathBuf::from(path.trim())),
            Err(_) => Some(PathBuf::from("data.json")),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `base_url` does not start with `http://` or `https://`
    /// - `collision_warn_threshold` is 0
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if let Some(ref base_url) = self.base_url
            && !base_url.starts_with("http://")
            && !base_url.starts_with("https://")
        {
            anyhow::bail!(
                "BASE_URL must start with 'http://' or 'https://', got '{}'",
                base_url
            );
        }

        if self.collision_warn_threshold == 0 {
            anyhow::bail!("COLLISION_WARN_THRESHOLD must be at least 1");
        }

        Ok(())
    }

    /// Returns whether snapshots are written to disk.
    pub fn is_persistence_enabled(&self) -> bool {
        self.data_file.is_some()
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);

        match self.data_file {
            Some(ref path) => tracing::info!("  Data file: {}", path.display()),
            None => tracing::info!("  Data file: disabled (memory only)"),
        }

        match self.base_url {
            Some(ref url) => tracing::info!("  Base URL: {}", url),
            None => tracing::info!("  Base URL: from Host header"),
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn valid_config() -> Config {
        Config {
            listen_addr: "0.0.0.0:3000".to_string(),
            data_file: Some(PathBuf::from("data.json")),
            base_url: None,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            collision_warn_threshold: 16,
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = valid_config();
        assert!(config.validate().is_ok());

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "3000".to_string();
        assert!(config.validate().is_err());

        config.listen_addr = "127.0.0.1:3000".to_string();
        config.base_url = Some("s.example.com".to_string());
        assert!(config.validate().is_err());

        config.base_url = Some("https://s.example.com".to_string());
        assert!(config.validate().is_ok());

        config.collision_warn_threshold = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_data_file_defaults() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::remove_var("DATA_FILE");
        }
        assert_eq!(Config::load_data_file(), Some(PathBuf::from("data.json")));

        unsafe {
            env::set_var("DATA_FILE", "/var/lib/tinylink/links.json");
        }
        assert_eq!(
            Config::load_data_file(),
            Some(PathBuf::from("/var/lib/tinylink/links.json"))
        );

        unsafe {
            env::set_var("DATA_FILE", "");
        }
        assert_eq!(Config::load_data_file(), None);

        // Cleanup
        unsafe {
            env::remove_var("DATA_FILE");
        }
    }

    #[test]
    #[serial]
    fn test_from_env() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("LISTEN", "127.0.0.1:8080");
            env::set_var("BASE_URL", "https://s.example.com/");
            env::set_var("COLLISION_WARN_THRESHOLD", "4");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.listen_addr, "127.0.0.1:8080");
        assert_eq!(config.base_url.as_deref(), Some("https://s.example.com"));
        assert_eq!(config.collision_warn_threshold, 4);
        assert!(config.validate().is_ok());

        // Cleanup
        unsafe {
            env::remove_var("LISTEN");
            env::remove_var("BASE_URL");
            env::remove_var("COLLISION_WARN_THRESHOLD");
        }
    }
}
