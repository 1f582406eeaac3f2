//! Availability API 模块 (公共)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/availability", get(handler::for_date))
        .route("/api/availability/week", get(handler::week))
}
