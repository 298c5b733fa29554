//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Result, ShortenerError};
use crate::shortcode::{DEFAULT_ALPHABET, DEFAULT_CODE_LENGTH};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Public prefix used to build `short_url` in responses
    pub base_url: String,
    /// Number of characters in a short code
    pub code_length: usize,
    /// Characters short codes are drawn from
    pub code_alphabet: String,
    /// TTL in seconds applied when the caller gives none
    pub default_ttl: u64,
    /// Smallest TTL in seconds a caller may request
    pub min_ttl: u64,
    /// Largest TTL in seconds a caller may request
    pub max_ttl: u64,
    /// Allocation attempts before giving up on collisions
    pub max_attempts: u32,
    /// Expiration sweep interval in seconds
    pub sweep_interval: u64,
    /// Grace period in seconds for in-flight requests at shutdown
    pub shutdown_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `BASE_URL` - Public base URL (default: http://localhost:{port})
    /// - `CODE_LENGTH` - Short code length (default: 8)
    /// - `CODE_ALPHABET` - Short code alphabet (default: digits and letters without 0 O 1 I l)
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 86400)
    /// - `MIN_TTL` / `MAX_TTL` - Allowed TTL range in seconds (default: 60 / 31536000)
    /// - `MAX_ATTEMPTS` - Allocation attempts (default: 5)
    /// - `SWEEP_INTERVAL` - Expiration sweep frequency in seconds (default: 3600)
    /// - `SHUTDOWN_TIMEOUT` - Graceful shutdown timeout in seconds (default: 30)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let server_port = env_or("SERVER_PORT", defaults.server_port);

        Self {
            server_port,
            base_url: env::var("BASE_URL")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| format!("http://localhost:{}", server_port)),
            code_length: env_or("CODE_LENGTH", defaults.code_length),
            code_alphabet: env::var("CODE_ALPHABET")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.code_alphabet),
            default_ttl: env_or("DEFAULT_TTL", defaults.default_ttl),
            min_ttl: env_or("MIN_TTL", defaults.min_ttl),
            max_ttl: env_or("MAX_TTL", defaults.max_ttl),
            max_attempts: env_or("MAX_ATTEMPTS", defaults.max_attempts),
            sweep_interval: env_or("SWEEP_INTERVAL", defaults.sweep_interval),
            shutdown_timeout: env_or("SHUTDOWN_TIMEOUT", defaults.shutdown_timeout),
        }
    }

    /// Checks the settings for consistency.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(ShortenerError::InvalidRequest(msg));

        if self.code_length == 0 {
            return invalid("CODE_LENGTH must be at least 1".to_string());
        }
        if self.min_ttl == 0 {
            return invalid("MIN_TTL must be at least 1".to_string());
        }
        if self.min_ttl > self.max_ttl {
            return invalid(format!(
                "MIN_TTL ({}) exceeds MAX_TTL ({})",
                self.min_ttl, self.max_ttl
            ));
        }
        if self.default_ttl < self.min_ttl || self.default_ttl > self.max_ttl {
            return invalid(format!(
                "DEFAULT_TTL ({}) must lie between {} and {}",
                self.default_ttl, self.min_ttl, self.max_ttl
            ));
        }
        if self.max_attempts == 0 {
            return invalid("MAX_ATTEMPTS must be at least 1".to_string());
        }
        if self.sweep_interval == 0 {
            return invalid("SWEEP_INTERVAL must be at least 1".to_string());
        }
        Ok(())
    }

    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            base_url: "http://localhost:8080".to_string(),
            code_length: DEFAULT_CODE_LENGTH,
            code_alphabet: DEFAULT_ALPHABET.to_string(),
            default_ttl: 24 * 60 * 60,
            min_ttl: 60,
            max_ttl: 365 * 24 * 60 * 60,
            max_attempts: 5,
            sweep_interval: 60 * 60,
            shutdown_timeout: 30,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
