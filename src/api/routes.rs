//! API Routes
//!
//! Configures the Axum router with all shortener endpoints.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    health_handler, redirect_handler, shorten_handler, stats_handler, AppState,
};
use super::timing::timing_middleware;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /shorten` - Allocate a short code for a URL
/// - `GET /s/:code` - Redirect to the stored URL
/// - `GET /stats/:code` - Get access statistics for a code
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - Timing: `X-Processing-Time-Micros` on every response
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/s/:code", get(redirect_handler))
        .route("/stats/:code", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(middleware::from_fn(timing_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::timing::PROCESSING_TIME_HEADER;
    use crate::config::Config;
    use crate::service::ShortenerService;
    use crate::shortcode::RandomCodeGenerator;
    use crate::store::MemoryStore;
    use crate::clock::SystemClock;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let service = ShortenerService::new(
            Arc::new(MemoryStore::new()),
            Arc::new(RandomCodeGenerator::default()),
            Arc::new(SystemClock),
        );
        create_router(AppState::new(Arc::new(service), &Config::default()))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(PROCESSING_TIME_HEADER));
    }

    #[tokio::test]
    async fn test_shorten_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/shorten")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"long_url":"https://example.com"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_stats_not_found() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/stats/nonexistent")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key(PROCESSING_TIME_HEADER));
    }
}
