//! 时间工具函数 (业务时区)
//!
//! "今天" 始终按业务时区计算，而不是服务器所在时区。

use chrono::{Duration, NaiveDate, Utc};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// ISO 日期格式
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// 业务时区的今天
pub fn today(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

/// 业务时区的当前本地时间 (用于 created_at 与 id)
pub fn now_local(tz: Tz) -> chrono::NaiveDateTime {
    Utc::now().with_timezone(&tz).naive_local()
}

/// 从 `start` 开始连续 `days` 天
pub fn days_from(start: NaiveDate, days: u32) -> impl Iterator<Item = NaiveDate> {
    (0..i64::from(days)).map(move |offset| start + Duration::days(offset))
}

/// 解析 IANA 时区名，失败返回 None
pub fn parse_timezone(name: &str) -> Option<Tz> {
    name.trim().parse().ok()
}
