//! Timing Middleware
//!
//! Stamps every response with the time spent inside the handler stack.

use std::time::Instant;

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};

/// Response header carrying the processing time in microseconds
pub const PROCESSING_TIME_HEADER: &str = "x-processing-time-micros";

/// Adds `X-Processing-Time-Micros` to the response.
pub async fn timing_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let mut response = next.run(req).await;

    let micros = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
    response
        .headers_mut()
        .insert(PROCESSING_TIME_HEADER, HeaderValue::from(micros));
    response
}
