//! Short Store - An in-memory short code allocator
//!
//! Binds values to short random codes with TTL expiration, lazy expiry on
//! read, per-code access counting and a periodic expiration sweep.

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod shortcode;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::{Result, ShortenerError};
pub use service::ShortenerService;
pub use tasks::spawn_expiration_sweeper;
