//! Staff Authentication Handlers

use axum::{Json, extract::State};
use serde::Deserialize;
use shared::models::{LoginRequest, LoginResponse, Role};

use crate::core::ServerState;
use crate::utils::{ApiResponse, AppError, AppResult, ok, ok_with_message};

/// POST /api/auth/login - 员工登录校验
///
/// 仅校验凭据并返回角色；后续请求通过 `X-Staff-*` 请求头携带凭据。
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let staff = state.staff.read().clone();

    if !staff.check(&req.username, &req.password) {
        tracing::warn!(username = %req.username.trim(), "Login failed - invalid credentials");
        return Err(AppError::invalid_credentials());
    }

    tracing::info!(username = %staff.username(), "Staff logged in");
    ok_with_message(
        "Login successful",
        LoginResponse {
            username: staff.username().to_string(),
            role: Role::Staff,
        },
    )
}

#[derive(Debug, Deserialize)]
pub struct ChangeUsernameRequest {
    pub username: String,
}

/// PUT /api/auth/username - 修改员工用户名
pub async fn change_username(
    State(state): State<ServerState>,
    Json(req): Json<ChangeUsernameRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let username = {
        let mut staff = state.staff.write();
        staff.set_username(&req.username)?;
        staff.username().to_string()
    };

    tracing::info!(username = %username, "Staff username changed");
    ok(LoginResponse {
        username,
        role: Role::Staff,
    })
}
