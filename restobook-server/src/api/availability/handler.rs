//! Availability API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::models::{DayAvailability, TOTAL_TABLES};

use crate::core::ServerState;
use crate::utils::time::parse_date;
use crate::utils::{ApiResponse, AppResult, ok};

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    /// 缺省为今天
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub date: NaiveDate,
    pub available: u8,
    pub assigned: usize,
    pub total: u8,
}

/// GET /api/availability?date=YYYY-MM-DD - 指定日期空桌数
pub async fn for_date(
    State(state): State<ServerState>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<ApiResponse<AvailabilityResponse>>> {
    let manager = &state.reservations;
    let date = match query.date.as_deref().map(str::trim) {
        Some("") | None => manager.today(),
        Some(raw) => parse_date(raw)?,
    };

    ok(AvailabilityResponse {
        date,
        available: manager.available(date),
        assigned: manager.assigned_count(date),
        total: TOTAL_TABLES,
    })
}

/// GET /api/availability/week - 今天起 7 天空桌数
pub async fn week(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<DayAvailability>>>> {
    ok(state.reservations.week_availability())
}
