//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts. The shared secret is never logged.
//!
//! ## Required Variables
//!
//! - `SHORTENER_SECRET` - HMAC key clients sign API requests with
//!
//! ## Optional Variables
//!
//! - `DATA_DIR` - Directory holding `shortener.sqlite` (default: `./data`)
//! - `DATABASE_URL` - Explicit `sqlite:` URL, overrides `DATA_DIR`
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `BASE_URL` - Public base for short URLs (default: derived from `Host`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `DB_BUSY_TIMEOUT` - Seconds to wait for the write lock (default: 5)
//! - `MAX_BODY_BYTES` - Largest accepted API request body (default: 65536)

use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use url::Url;

/// File name of the database inside `DATA_DIR`.
pub const DATABASE_FILE: &str = "shortener.sqlite";

/// Service configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    pub secret: String,
    pub data_dir: PathBuf,
    /// Explicit database URL; `None` means `DATA_DIR/shortener.sqlite`.
    pub database_url: Option<String>,
    pub listen_addr: String,
    pub base_url: Option<String>,
    pub log_level: String,
    pub log_format: String,
    pub db_max_connections: u32,
    pub db_busy_timeout: u64,
    pub max_body_bytes: usize,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("secret", &"***")
            .field("data_dir", &self.data_dir)
            .field("database_url", &self.database_url)
            .field("listen_addr", &self.listen_addr)
            .field("base_url", &self.base_url)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_busy_timeout", &self.db_busy_timeout)
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `SHORTENER_SECRET` is not set.
    pub fn from_env() -> Result<Self> {
        let secret = env::var("SHORTENER_SECRET")
            .context("SHORTENER_SECRET environment variable is not configured")?;

        let (data_dir, database_url) = storage_from_env();

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let base_url = env::var("BASE_URL").ok().filter(|v| !v.is_empty());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let db_busy_timeout = env::var("DB_BUSY_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let max_body_bytes = env::var("MAX_BODY_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(64 * 1024);

        Ok(Self {
            secret,
            data_dir,
            database_url,
            listen_addr,
            base_url,
            log_level,
            log_format,
            db_max_connections,
            db_busy_timeout,
            max_body_bytes,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the secret is empty
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `DATABASE_URL` is not an `sqlite:` URL
    /// - `BASE_URL` is not an absolute http(s) URL
    /// - pool, timeout or body limits are out of range
    pub fn validate(&self) -> Result<()> {
        if self.secret.is_empty() {
            anyhow::bail!("SHORTENER_SECRET environment variable is not configured");
        }

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

        if let Some(ref database_url) = self.database_url
            && !database_url.starts_with("sqlite:")
        {
            anyhow::bail!(
                "DATABASE_URL must start with 'sqlite:', got '{}'",
                database_url
            );
        }

        if let Some(ref base_url) = self.base_url {
            let parsed = Url::parse(base_url)
                .with_context(|| format!("BASE_URL is not a valid URL: '{base_url}'"))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                anyhow::bail!("BASE_URL must use http or https, got '{}'", base_url);
            }
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        if self.db_busy_timeout == 0 {
            anyhow::bail!("DB_BUSY_TIMEOUT must be greater than 0");
        }
        if self.max_body_bytes < 1024 {
            anyhow::bail!(
                "MAX_BODY_BYTES must be at least 1024, got {}",
                self.max_body_bytes
            );
        }

        Ok(())
    }

    /// Path of the SQLite file when no explicit `DATABASE_URL` is set.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE)
    }

    /// Connection URL for the SQLite database.
    pub fn resolved_database_url(&self) -> String {
        match self.database_url {
            Some(ref url) => url.clone(),
            None => sqlite_url(&self.database_path()),
        }
    }

    /// Prints configuration summary (without the secret).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Database: {}", self.resolved_database_url());
        match self.base_url {
            Some(ref base) => tracing::info!("  Base URL: {}", base),
            None => tracing::info!("  Base URL: from Host header"),
        }
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Reads `DATA_DIR` and `DATABASE_URL` without requiring the rest of the
/// configuration.
pub fn storage_from_env() -> (PathBuf, Option<String>) {
    let data_dir = env::var("DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"));
    let database_url = env::var("DATABASE_URL").ok().filter(|v| !v.is_empty());

    (data_dir, database_url)
}

/// Builds an `sqlite://` URL for a database file.
pub fn sqlite_url(path: &Path) -> String {
    format!("sqlite://{}", path.display())
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
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
            secret: "s3cr3t".to_string(),
            data_dir: PathBuf::from("data"),
            database_url: None,
            listen_addr: "0.0.0.0:3000".to_string(),
            base_url: None,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            db_max_connections: 5,
            db_busy_timeout: 5,
            max_body_bytes: 65_536,
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = valid_config();
        assert!(config.validate().is_ok());

        config.secret = String::new();
        assert!(config.validate().is_err());
        config.secret = "s3cr3t".to_string();

        config.log_format = "xml".to_string();
        assert!(config.validate().is_err());
        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "3000".to_string();
        assert!(config.validate().is_err());
        config.listen_addr = "127.0.0.1:3000".to_string();

        config.database_url = Some("postgres://localhost/db".to_string());
        assert!(config.validate().is_err());
        config.database_url = Some("sqlite::memory:".to_string());
        assert!(config.validate().is_ok());

        config.base_url = Some("ftp://files.example.com".to_string());
        assert!(config.validate().is_err());
        config.base_url = Some("not a url".to_string());
        assert!(config.validate().is_err());
        config.base_url = Some("https://go.example.com".to_string());
        assert!(config.validate().is_ok());

        config.db_max_connections = 0;
        assert!(config.validate().is_err());
        config.db_max_connections = 1;

        config.max_body_bytes = 10;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_database_url_resolution() {
        let mut config = valid_config();
        config.data_dir = PathBuf::from("/var/lib/shortener");
        assert_eq!(
            config.resolved_database_url(),
            "sqlite:///var/lib/shortener/shortener.sqlite"
        );

        config.database_url = Some("sqlite::memory:".to_string());
        assert_eq!(config.resolved_database_url(), "sqlite::memory:");
    }

    #[test]
    fn test_debug_masks_secret() {
        let rendered = format!("{:?}", valid_config());
        assert!(!rendered.contains("s3cr3t"));
        assert!(rendered.contains("***"));
    }

    #[test]
    #[serial]
    fn test_missing_secret_is_fatal() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::remove_var("SHORTENER_SECRET");
        }

        let err = load_from_env().unwrap_err();
        assert!(err.to_string().contains("SHORTENER_SECRET"));
    }

    #[test]
    #[serial]
    fn test_empty_secret_is_fatal() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("SHORTENER_SECRET", "");
        }

        assert!(load_from_env().is_err());

        unsafe {
            env::remove_var("SHORTENER_SECRET");
        }
    }

    #[test]
    #[serial]
    fn test_load_from_env_defaults() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("SHORTENER_SECRET", "s3cr3t");
            env::remove_var("DATA_DIR");
            env::remove_var("DATABASE_URL");
            env::remove_var("LISTEN");
            env::remove_var("BASE_URL");
            env::remove_var("LOG_FORMAT");
        }

        let config = load_from_env().unwrap();

        assert_eq!(config.secret, "s3cr3t");
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.listen_addr, "0.0.0.0:3000");
        assert!(config.base_url.is_none());
        assert_eq!(config.log_format, "text");

        // Cleanup
        unsafe {
            env::remove_var("SHORTENER_SECRET");
        }
    }
}
