//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Expiration sweep: removes entries whose TTL has passed at configured intervals

mod sweeper;

pub use sweeper::{run_expiration_sweep, spawn_expiration_sweeper, sweep_once};
