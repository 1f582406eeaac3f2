use chrono_tz::Tz;
use std::path::PathBuf;

use crate::reservations::TableSelection;
use crate::utils::time::parse_timezone;

/// 默认业务时区
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Jakarta;

/// 服务器配置 - 预订服务的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (数据文件、导出、日志) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | DATA_FILE | restobook_data.json | 预订数据文件 (相对 WORK_DIR) |
/// | EXPORT_FILE | restobook_export.csv | CSV 导出文件 (相对 WORK_DIR) |
/// | TIMEZONE | Asia/Jakarta | 业务时区，决定 "今天" |
/// | TABLE_SELECTION | random | 分桌策略: random / first_fit |
/// | STAFF_USERNAME | admin | 员工账号 |
/// | STAFF_PASSWORD | 1234 | 员工密码 |
/// | LOG_LEVEL | info | 日志级别 |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/srv/restobook HTTP_PORT=8080 TABLE_SELECTION=first_fit cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 预订数据文件名
    pub data_file: String,
    /// CSV 导出文件名
    pub export_file: String,
    /// 业务时区
    pub timezone: Tz,
    /// 分桌策略
    pub table_selection: TableSelection,
    /// 员工账号
    pub staff_username: String,
    /// 员工密码
    pub staff_password: String,
    /// 日志级别
    pub log_level: String,
    /// 运行环境: development | staging | production
    pub environment: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        let timezone = match std::env::var("TIMEZONE") {
            Ok(name) => parse_timezone(&name).unwrap_or_else(|| {
                tracing::warn!(timezone = %name, "Unknown TIMEZONE, using {}", DEFAULT_TIMEZONE);
                DEFAULT_TIMEZONE
            }),
            Err(_) => DEFAULT_TIMEZONE,
        };

        let table_selection = match std::env::var("TABLE_SELECTION") {
            Ok(value) => value.parse().unwrap_or_else(|e| {
                tracing::warn!("{}, using random", e);
                TableSelection::Random
            }),
            Err(_) => TableSelection::default(),
        };

        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            data_file: std::env::var("DATA_FILE")
                .unwrap_or_else(|_| "restobook_data.json".into()),
            export_file: std::env::var("EXPORT_FILE")
                .unwrap_or_else(|_| "restobook_export.csv".into()),
            timezone,
            table_selection,
            staff_username: std::env::var("STAFF_USERNAME").unwrap_or_else(|_| "admin".into()),
            staff_password: std::env::var("STAFF_PASSWORD").unwrap_or_else(|_| "1234".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 预订数据文件完整路径
    pub fn data_file_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join(&self.data_file)
    }

    /// CSV 导出文件完整路径
    pub fn export_file_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join(&self.export_file)
    }

    /// 日志目录
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.work_dir)?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
