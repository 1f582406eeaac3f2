//! Shared types for RestoBook
//!
//! Domain models, error types and response structures used by the
//! reservation server and any client talking to it.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{Reservation, ReservationCreate, Role, TOTAL_TABLES};
