//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 员工登录校验
//! - [`reservations`] - 预订提交与员工管理
//! - [`availability`] - 空桌查询

pub mod auth;
pub mod availability;
pub mod health;
pub mod reservations;

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::resolve_role;
use crate::core::ServerState;
use crate::utils::AppError;

/// HTTP 请求日志中间件
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    tracing::info!(target: "http_access", "{} {} {}", method, uri, response.status());

    response
}

/// 未匹配路由 - 统一 JSON 404
async fn route_not_found(uri: http::Uri) -> AppError {
    AppError::not_found(format!("Route {}", uri.path()))
}

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(reservations::router())
        .merge(availability::router())
        .fallback(route_not_found)
}

/// Build the complete router with state and middleware
pub fn build_router(state: ServerState) -> Router {
    build_app()
        // 角色解析中间件 - 在 Router 级别应用，员工路由再由 require_staff 检查
        .layer(middleware::from_fn_with_state(state.clone(), resolve_role))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(log_request))
}
