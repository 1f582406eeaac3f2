//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - 应用错误类型 (from shared::error)
//! - [`ApiResponse`] - API 响应结构 (from shared::error)
//! - 日志、业务时区、输入校验

pub mod logger;
pub mod time;
pub mod validation;

// Re-export unified error types from shared
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

/// 成功响应快捷方式
pub fn ok<T>(data: T) -> AppResult<axum::Json<ApiResponse<T>>> {
    Ok(axum::Json(ApiResponse::success(data)))
}

/// 带自定义消息的成功响应
pub fn ok_with_message<T>(
    message: impl Into<String>,
    data: T,
) -> AppResult<axum::Json<ApiResponse<T>>> {
    Ok(axum::Json(ApiResponse::success_with_message(message, data)))
}
