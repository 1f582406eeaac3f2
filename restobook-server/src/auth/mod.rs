//! 员工识别模块
//!
//! 仅用于区分员工与顾客，不是安全边界：
//! - [`StaffAccount`] - 单个员工账号 (明文比较)
//! - [`resolve_role`] - 从请求头解析角色的中间件
//! - [`require_staff`] - 员工专属路由中间件

pub mod middleware;
pub mod staff;

pub use middleware::{
    RoleExt, STAFF_PASSWORD_HEADER, STAFF_USERNAME_HEADER, require_staff, resolve_role,
};
pub use staff::StaffAccount;
