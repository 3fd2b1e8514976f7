//! 时间工具函数 — 营业时间解析

use chrono::NaiveTime;
use shared::ErrorCode;

use super::{AppError, AppResult};

/// 解析营业时刻字符串 (HH:MM)
///
/// Seconds are accepted too (`HH:MM:SS`) so values echoed back from the
/// API round-trip.
pub fn parse_time_of_day(value: &str) -> AppResult<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| {
            AppError::with_message(
                ErrorCode::InvalidTimeOfDay,
                format!("Invalid time of day: {value} (expected HH:MM)"),
            )
        })
}
