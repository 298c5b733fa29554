//! Request DTOs for the shortener API
//!
//! Defines the structure of incoming HTTP request bodies.

use std::time::Duration;

use axum::http::Uri;
use serde::Deserialize;

/// Maximum accepted length of `long_url` in bytes
pub const MAX_URL_LENGTH: usize = 2048;

/// Request body for POST /shorten
///
/// # Fields
/// - `long_url`: Absolute http(s) URL to shorten
/// - `ttl_seconds`: Optional lifetime in seconds (uses default if not specified)
#[derive(Debug, Clone, Deserialize)]
pub struct ShortenRequest {
    /// The URL to shorten
    pub long_url: String,
    /// Optional TTL in seconds
    #[serde(default)]
    pub ttl_seconds: Option<u64>,
}

impl ShortenRequest {
    /// Validates the request against the allowed TTL range.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self, min_ttl: u64, max_ttl: u64) -> Option<String> {
        if let Some(msg) = validate_url(&self.long_url) {
            return Some(msg);
        }
        match self.ttl_seconds {
            Some(ttl) if ttl < min_ttl => Some(format!("ttl_seconds must be at least {}", min_ttl)),
            Some(ttl) if ttl > max_ttl => {
                Some(format!("ttl_seconds must not exceed {}", max_ttl))
            }
            _ => None,
        }
    }

    /// Requested TTL, zero when absent so the default applies.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds.unwrap_or(0))
    }
}

fn validate_url(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return Some("long_url is required".to_string());
    }
    if raw.len() > MAX_URL_LENGTH {
        return Some(format!(
            "long_url exceeds maximum length of {} characters",
            MAX_URL_LENGTH
        ));
    }

    let uri: Uri = match raw.parse() {
        Ok(uri) => uri,
        Err(_) => return Some("invalid URL format".to_string()),
    };
    match uri.scheme_str() {
        Some("http") | Some("https") => {}
        _ => return Some("URL scheme must be http or https".to_string()),
    }
    match uri.host() {
        Some(host) if !host.is_empty() => None,
        _ => Some("URL must have a host".to_string()),
    }
}
