//! Reservation API 模块
//!
//! | 路径 | 方法 | 说明 | 角色 |
//! |------|------|------|------|
//! | /api/reservations | POST | 提交预订 | 任意 |
//! | /api/reservations | GET | 列表 (?date=YYYY-MM-DD) | 员工 |
//! | /api/reservations/today | GET | 今日预订 | 员工 |
//! | /api/reservations/export | POST | 导出 CSV | 员工 |
//! | /api/reservations/{id} | GET | 单个预订 | 员工 |
//! | /api/reservations/{id} | DELETE | 删除预订 | 员工 |
//! | /api/reservations/{id}/assign | POST | 自动分桌 | 员工 |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_staff;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reservations", routes())
}

fn routes() -> Router<ServerState> {
    let public_routes = Router::new().route("/", post(handler::submit));

    let staff_routes = Router::new()
        .route("/", get(handler::list))
        .route("/today", get(handler::list_today))
        .route("/export", post(handler::export))
        .route("/{id}", get(handler::get_by_id).delete(handler::delete))
        .route("/{id}/assign", post(handler::assign_table))
        .layer(middleware::from_fn(require_staff));

    public_routes.merge(staff_routes)
}
