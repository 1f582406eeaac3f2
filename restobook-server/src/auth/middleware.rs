//! 角色中间件
//!
//! [`resolve_role`] 从 `X-Staff-Username` / `X-Staff-Password` 请求头解析
//! [`Role`] 并注入请求扩展；[`require_staff`] 拒绝非员工请求。

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::models::Role;

use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

/// 员工用户名请求头
pub const STAFF_USERNAME_HEADER: &str = "x-staff-username";

/// 员工密码请求头
pub const STAFF_PASSWORD_HEADER: &str = "x-staff-password";

fn header<'a>(req: &'a Request, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}

/// 角色解析中间件 - 全局
///
/// 无凭据或凭据错误的请求按顾客处理 (错误凭据会记录安全日志)。
pub async fn resolve_role(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Response {
    let role = match (
        header(&req, STAFF_USERNAME_HEADER),
        header(&req, STAFF_PASSWORD_HEADER),
    ) {
        (Some(username), Some(password)) => {
            if state.staff.read().check(username, password) {
                Role::Staff
            } else {
                security_log!(
                    "WARN",
                    "staff_check_failed",
                    username = username.to_string(),
                    uri = req.uri().path().to_string()
                );
                Role::Customer
            }
        }
        _ => Role::Customer,
    };

    req.extensions_mut().insert(role);
    next.run(req).await
}

/// 员工中间件 - 要求员工角色
///
/// # 错误
///
/// 非员工返回 403 Forbidden
pub async fn require_staff(req: Request, next: Next) -> Result<Response, AppError> {
    if !req.role().is_staff() {
        security_log!(
            "WARN",
            "staff_required",
            method = req.method().to_string(),
            uri = req.uri().path().to_string()
        );
        return Err(AppError::staff_required());
    }

    Ok(next.run(req).await)
}

/// 从请求中读取已解析角色的扩展方法
pub trait RoleExt {
    /// 未经过 [`resolve_role`] 的请求视为顾客
    fn role(&self) -> Role;
}

impl RoleExt for Request {
    fn role(&self) -> Role {
        self.extensions().get::<Role>().copied().unwrap_or_default()
    }
}
