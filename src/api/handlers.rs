//! API Handlers
//!
//! HTTP request handlers for each shortener endpoint.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error::{Result, ShortenerError};
use crate::models::{HealthResponse, ShortenRequest, ShortenResponse, StatsResponse};
use crate::service::ShortenerService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Allocation and resolution logic
    pub service: Arc<ShortenerService>,
    /// Prefix for `short_url`
    pub base_url: String,
    /// Accepted TTL range in seconds
    pub min_ttl: u64,
    pub max_ttl: u64,
    /// Cancelled when the server shuts down
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Creates a new AppState around `service` with TTL limits from `config`.
    pub fn new(service: Arc<ShortenerService>, config: &Config) -> Self {
        Self {
            service,
            base_url: config.base_url.clone(),
            min_ttl: config.min_ttl,
            max_ttl: config.max_ttl,
            shutdown: CancellationToken::new(),
        }
    }

    fn request_token(&self) -> CancellationToken {
        self.shutdown.child_token()
    }
}

/// Handler for POST /shorten
///
/// Allocates a short code for the given URL.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>)> {
    let Json(req) =
        payload.map_err(|_| ShortenerError::InvalidRequest("invalid JSON body".to_string()))?;

    // Validate request
    if let Some(error_msg) = req.validate(state.min_ttl, state.max_ttl) {
        return Err(ShortenerError::InvalidRequest(error_msg));
    }

    let entry = state
        .service
        .allocate(&state.request_token(), &req.long_url, req.ttl())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse::new(&entry, &state.base_url)),
    ))
}

/// Handler for GET /s/:code
///
/// Redirects to the stored URL with 302 Found.
pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Response> {
    let long_url = state
        .service
        .resolve(&state.request_token(), &code)
        .await?;

    let location = HeaderValue::from_str(&long_url)
        .map_err(|_| ShortenerError::Internal(format!("stored URL for {code} is not a header value")))?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// Handler for GET /stats/:code
///
/// Returns creation, expiry and access statistics for a live code.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<StatsResponse>> {
    let entry = state.service.stats(&state.request_token(), &code).await?;
    Ok(Json(StatsResponse::from(entry)))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.service.clock().now()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;
    use crate::shortcode::RandomCodeGenerator;
    use crate::store::MemoryStore;

    fn test_state() -> AppState {
        let service = ShortenerService::new(
            Arc::new(MemoryStore::new()),
            Arc::new(RandomCodeGenerator::default()),
            Arc::new(SystemClock),
        );
        AppState::new(Arc::new(service), &Config::default())
    }

    fn shorten(url: &str, ttl: Option<u64>) -> Json<ShortenRequest> {
        Json(ShortenRequest {
            long_url: url.to_string(),
            ttl_seconds: ttl,
        })
    }

    #[tokio::test]
    async fn test_shorten_and_stats_handler() {
        let state = test_state();

        let (status, Json(created)) =
            shorten_handler(State(state.clone()), Ok(shorten("https://example.com", None)))
                .await
                .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert!(created.short_url.ends_with(&created.short_code));

        let Json(stats) = stats_handler(State(state), Path(created.short_code.clone()))
            .await
            .unwrap();
        assert_eq!(stats.long_url, "https://example.com");
        assert_eq!(stats.click_count, 0);
    }

    #[tokio::test]
    async fn test_redirect_handler() {
        let state = test_state();
        let (_, Json(created)) =
            shorten_handler(State(state.clone()), Ok(shorten("https://example.com/x", None)))
                .await
                .unwrap();

        let response = redirect_handler(State(state), Path(created.short_code))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "https://example.com/x"
        );
    }

    #[tokio::test]
    async fn test_redirect_unknown_code() {
        let result = redirect_handler(State(test_state()), Path("nope".to_string())).await;
        assert!(matches!(result, Err(ShortenerError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_shorten_invalid_request() {
        let result = shorten_handler(State(test_state()), Ok(shorten("ftp://x", None))).await;
        assert!(matches!(result, Err(ShortenerError::InvalidRequest(_))));

        let result =
            shorten_handler(State(test_state()), Ok(shorten("https://x.io", Some(1)))).await;
        assert!(matches!(result, Err(ShortenerError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_handlers_fail_after_shutdown() {
        let state = test_state();
        state.shutdown.cancel();

        let result = shorten_handler(State(state), Ok(shorten("https://example.com", None))).await;
        assert_eq!(result.err(), Some(ShortenerError::Canceled));
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler(State(test_state())).await;
        assert_eq!(response.status, "healthy");
    }
}
