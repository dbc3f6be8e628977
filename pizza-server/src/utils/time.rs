//! 时间工具函数 — 店铺时区转换
//!
//! 时间戳统一使用 `i64` Unix millis 存储；日期边界计算
//! 在店铺时区 (`Config::timezone`) 下完成。

use chrono::NaiveDate;
use chrono_tz::Tz;

/// 当前时间 (Unix millis)
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// 日期零点 (00:00:00) → Unix millis (店铺时区)
///
/// DST gap fallback: 如果本地时间不存在 (夏令时跳跃)，fallback 到 UTC。
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    let naive = date.and_hms_opt(0, 0, 0).unwrap();
    naive
        .and_local_timezone(tz)
        .latest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// 今天零点的 Unix millis (店铺时区)
///
/// 统计口径："今天的订单" = created_at >= 此时间戳。
pub fn today_start_millis(tz: Tz) -> i64 {
    let today = chrono::Utc::now().with_timezone(&tz).date_naive();
    day_start_millis(today, tz)
}
