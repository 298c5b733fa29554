//! Response DTOs for the shortener API
//!
//! Defines the structure of outgoing HTTP response bodies. Instants are
//! rendered as RFC 3339 strings.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::store::Entry;

fn rfc3339(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Response body for POST /shorten
#[derive(Debug, Clone, Serialize)]
pub struct ShortenResponse {
    /// The allocated short code
    pub short_code: String,
    /// Public URL that redirects to `long_url`
    pub short_url: String,
    /// The shortened URL
    pub long_url: String,
    /// Expiry instant
    pub expires_at: String,
}

impl ShortenResponse {
    /// Creates a new ShortenResponse for `entry` served under `base_url`
    pub fn new(entry: &Entry, base_url: &str) -> Self {
        Self {
            short_code: entry.key.clone(),
            short_url: format!("{}/s/{}", base_url.trim_end_matches('/'), entry.key),
            long_url: entry.value.clone(),
            expires_at: rfc3339(entry.expires_at),
        }
    }
}

/// Response body for GET /stats/:code
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub short_code: String,
    pub long_url: String,
    pub created_at: String,
    pub expires_at: String,
    /// Number of successful redirects
    pub click_count: u64,
    /// Last redirect instant, null until the first one
    pub last_accessed_at: Option<String>,
}

impl From<Entry> for StatsResponse {
    fn from(entry: Entry) -> Self {
        Self {
            short_code: entry.key,
            long_url: entry.value,
            created_at: rfc3339(entry.created_at),
            expires_at: rfc3339(entry.expires_at),
            click_count: entry.access_count,
            last_accessed_at: entry.last_accessed_at.map(rfc3339),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse stamped at `now`
    pub fn healthy(now: DateTime<Utc>) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: rfc3339(now),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub error: String,
    /// Human-readable description
    pub message: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn sample() -> Entry {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        Entry::new("Ab3dEf7h", "https://example.com", t0, Duration::hours(24))
    }

    #[test]
    fn test_shorten_response_serialize() {
        let resp = ShortenResponse::new(&sample(), "http://localhost:8080/");
        assert_eq!(resp.short_url, "http://localhost:8080/s/Ab3dEf7h");

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["short_code"], "Ab3dEf7h");
        assert_eq!(json["long_url"], "https://example.com");
        assert_eq!(json["expires_at"], "2024-01-16T12:00:00Z");
    }

    #[test]
    fn test_stats_response_never_accessed() {
        let json = serde_json::to_value(StatsResponse::from(sample())).unwrap();
        assert_eq!(json["click_count"], 0);
        assert_eq!(json["created_at"], "2024-01-15T12:00:00Z");
        assert!(json["last_accessed_at"].is_null());
    }

    #[test]
    fn test_stats_response_accessed() {
        let mut entry = sample();
        entry.access_count = 7;
        entry.last_accessed_at = Some(entry.created_at + Duration::minutes(30));

        let resp = StatsResponse::from(entry);
        assert_eq!(resp.click_count, 7);
        assert_eq!(resp.last_accessed_at.as_deref(), Some("2024-01-15T12:30:00Z"));
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy(Utc::now());
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("not_found", "short code not found or expired");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["error"], "not_found");
        assert_eq!(json["message"], "short code not found or expired");
    }
}
