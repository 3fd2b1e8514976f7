//! Restaurant Model

use serde::{Deserialize, Serialize};

use super::OpenTime;

/// Restaurant entity (餐厅)
///
/// `open_times` is not a column: it is filled by whoever loads the
/// restaurant (detail endpoint, selector projection) and stays empty
/// otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub phone: Option<String>,
    pub enabled: bool,
    pub created_at: i64,
    pub updated_at: Option<i64>,
    #[serde(default)]
    #[cfg_attr(feature = "db", sqlx(skip))]
    pub open_times: Vec<OpenTime>,
}

impl Restaurant {
    /// Geographic position as `(lat, lng)` degrees
    pub fn position(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

/// Create restaurant payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantCreate {
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub phone: Option<String>,
    /// Defaults to `true`
    pub enabled: Option<bool>,
}

/// Update restaurant payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestaurantUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    /// `None`: keep; `Some(None)`: clear (`"phone": null`); `Some(Some(v))`: set
    #[serde(
        default,
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<Option<String>>,
    pub enabled: Option<bool>,
}

/// Distinguish an absent field from an explicit `null`
fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Random restaurant query (`GET /api/restaurants/random`)
///
/// `day_of_week` and `time` must be supplied together; `time` is a
/// wall-clock `HH:MM` string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomRestaurantQuery {
    pub lat: f64,
    pub lng: f64,
    /// Search radius in kilometres
    pub radius: f64,
    pub limit: Option<usize>,
    pub day_of_week: Option<i32>,
    pub time: Option<String>,
}
