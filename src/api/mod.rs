//! API Module
//!
//! HTTP handlers and routing for the shortener REST API.
//!
//! # Endpoints
//! - `POST /shorten` - Allocate a short code
//! - `GET /s/:code` - Redirect to the stored URL
//! - `GET /stats/:code` - Access statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;
pub mod timing;

pub use handlers::*;
pub use routes::create_router;
