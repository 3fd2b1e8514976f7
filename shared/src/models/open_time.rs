//! Open Time Model

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Opening-hours record of a restaurant (营业时间)
///
/// `day_of_week` is stored as given; no range is enforced.
/// `close_time` is conventionally after `open_time` but that is not checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OpenTime {
    pub id: i64,
    pub restaurant_id: i64,
    pub day_of_week: i32,
    pub open_time: NaiveTime,
    pub close_time: NaiveTime,
    pub created_at: i64,
    pub updated_at: Option<i64>,
}

impl OpenTime {
    /// Whether this record covers `time` on `day_of_week`
    ///
    /// Both boundaries are inclusive. A record whose close time is before
    /// its open time covers nothing.
    pub fn covers(&self, day_of_week: i32, time: NaiveTime) -> bool {
        self.day_of_week == day_of_week && self.open_time <= time && time <= self.close_time
    }
}

/// Create open time payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenTimeCreate {
    pub day_of_week: i32,
    pub open_time: NaiveTime,
    pub close_time: NaiveTime,
}

/// Update open time payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenTimeUpdate {
    pub day_of_week: Option<i32>,
    pub open_time: Option<NaiveTime>,
    pub close_time: Option<NaiveTime>,
}
