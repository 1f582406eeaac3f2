//! Reservation API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use shared::models::{Reservation, ReservationCreate, TableNumber};

use crate::core::ServerState;
use crate::reservations::{AssignOutcome, ExportOutcome};
use crate::utils::time::parse_date;
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode, ok, ok_with_message};

/// 顾客确认信息
pub fn confirmation_message(reservation: &Reservation) -> String {
    format!(
        "Please arrive on {} at {}. Party size: {}",
        reservation.date, reservation.time, reservation.party_size
    )
}

/// POST /api/reservations - 提交预订
pub async fn submit(
    State(state): State<ServerState>,
    Json(payload): Json<ReservationCreate>,
) -> AppResult<Json<ApiResponse<Reservation>>> {
    let reservation = state.reservations.submit(&payload)?;
    ok_with_message(confirmation_message(&reservation), reservation)
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub date: Option<String>,
}

/// GET /api/reservations - 获取预订列表 (按插入顺序)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<Reservation>>>> {
    let date = match query.date.as_deref().map(str::trim) {
        Some("") | None => None,
        Some(raw) => Some(parse_date(raw)?),
    };
    ok(state.reservations.list(date))
}

/// GET /api/reservations/today - 今日预订
pub async fn list_today(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<Reservation>>>> {
    ok(state.reservations.list_today())
}

/// GET /api/reservations/:id - 获取单个预订
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Reservation>>> {
    let reservation = state.reservations.find(&id).ok_or_else(|| {
        AppError::new(ErrorCode::ReservationNotFound).with_detail("id", id.clone())
    })?;
    ok(reservation)
}

#[derive(Debug, Serialize)]
pub struct AssignResponse {
    pub id: String,
    pub table: TableNumber,
    pub already_assigned: bool,
}

/// POST /api/reservations/:id/assign - 自动分桌
///
/// 已分桌的预订返回原桌号 (`already_assigned: true`)，不视为错误。
pub async fn assign_table(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<AssignResponse>>> {
    let outcome = state.reservations.assign_table(&id)?;
    let message = match outcome {
        AssignOutcome::Assigned(table) => format!("Table {table} assigned"),
        AssignOutcome::AlreadyAssigned(table) => format!("Table {table} was already assigned"),
    };
    ok_with_message(
        message,
        AssignResponse {
            id,
            table: outcome.table(),
            already_assigned: matches!(outcome, AssignOutcome::AlreadyAssigned(_)),
        },
    )
}

/// DELETE /api/reservations/:id - 删除预订 (幂等)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let removed = state.reservations.delete(&id)?;
    ok(removed)
}

#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub path: String,
    pub rows: usize,
}

/// POST /api/reservations/export - 导出 CSV 到 EXPORT_FILE
pub async fn export(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<ExportResponse>>> {
    let path = state.config.export_file_path();
    match state.reservations.export_csv(&path)? {
        ExportOutcome::Written { rows } => ok_with_message(
            format!("Exported {rows} reservations"),
            ExportResponse {
                path: path.display().to_string(),
                rows,
            },
        ),
        ExportOutcome::Empty => Err(AppError::new(ErrorCode::NothingToExport)),
    }
}
