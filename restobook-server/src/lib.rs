//! RestoBook Server - 餐厅订桌服务
//!
//! # 架构概述
//!
//! - **预订簿** (`reservations`): 提交、分桌、删除、容量统计、CSV 导出
//! - **员工识别** (`auth`): 员工/顾客角色区分
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! restobook-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # 员工账号、角色中间件
//! ├── reservations/  # 预订核心逻辑
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 日志、时间、校验
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod reservations;
pub mod utils;

// Re-export 公共类型
pub use auth::StaffAccount;
pub use core::{Config, Server, ServerState};
pub use reservations::{AssignOutcome, ManagerError, ReservationManager};

// Re-export unified error types from shared
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境
///
/// 1. 加载 `.env` (若存在)
/// 2. 创建工作目录与日志目录
/// 3. 初始化日志 (生产环境输出 JSON 到滚动日志文件)
pub fn setup_environment() -> std::io::Result<Config> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    config.ensure_work_dir_structure()?;

    let log_dir = config.log_dir();
    let log_dir = config
        .is_production()
        .then(|| log_dir.to_string_lossy().into_owned());
    init_logger_with_file(
        Some(&config.log_level),
        Some(config.is_production()),
        log_dir.as_deref(),
    );

    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
    ____            __        ____              __
   / __ \___  _____/ /_____  / __ )____  ____  / /__
  / /_/ / _ \/ ___/ __/ __ \/ __  / __ \/ __ \/ //_/
 / _, _/  __(__  ) /_/ /_/ / /_/ / /_/ / /_/ / ,<
/_/ |_|\___/____/\__/\____/_____/\____/\____/_/|_|
    "#
    );
}
