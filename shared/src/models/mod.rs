//! Data models
//!
//! Shared between the reservation server and its clients (via API).

pub mod reservation;
pub mod role;

// Re-exports
pub use reservation::*;
pub use role::*;
