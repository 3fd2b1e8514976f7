//! Restaurant Repository

use super::{RepoError, RepoResult};
use shared::models::{Restaurant, RestaurantCreate, RestaurantUpdate};
use shared::util::now_millis;
use sqlx::SqlitePool;

const RESTAURANT_SELECT: &str =
    "SELECT id, name, address, lat, lng, phone, enabled, created_at, updated_at FROM restaurant";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Restaurant>> {
    let sql = format!("{RESTAURANT_SELECT} ORDER BY id");
    let restaurants = sqlx::query_as::<_, Restaurant>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(restaurants)
}

/// Enabled restaurants only, the candidate set for random selection
pub async fn list_enabled(pool: &SqlitePool) -> RepoResult<Vec<Restaurant>> {
    let sql = format!("{RESTAURANT_SELECT} WHERE enabled = 1 ORDER BY id");
    let restaurants = sqlx::query_as::<_, Restaurant>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(restaurants)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Restaurant>> {
    let sql = format!("{RESTAURANT_SELECT} WHERE id = ?");
    let restaurant = sqlx::query_as::<_, Restaurant>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(restaurant)
}

pub async fn create(pool: &SqlitePool, data: RestaurantCreate) -> RepoResult<Restaurant> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO restaurant (name, address, lat, lng, phone, enabled, created_at) VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.name)
    .bind(&data.address)
    .bind(data.lat)
    .bind(data.lng)
    .bind(&data.phone)
    .bind(data.enabled.unwrap_or(true))
    .bind(now_millis())
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create restaurant".into()))
}

/// Partial update; absent fields keep their value, `phone: Some(None)` clears it
pub async fn update(pool: &SqlitePool, id: i64, data: RestaurantUpdate) -> RepoResult<Restaurant> {
    let rows = sqlx::query(
        "UPDATE restaurant SET name = COALESCE(?1, name), address = COALESCE(?2, address), lat = COALESCE(?3, lat), lng = COALESCE(?4, lng), phone = CASE WHEN ?5 THEN ?6 ELSE phone END, enabled = COALESCE(?7, enabled), updated_at = ?8 WHERE id = ?9",
    )
    .bind(data.name)
    .bind(data.address)
    .bind(data.lat)
    .bind(data.lng)
    .bind(data.phone.is_some())
    .bind(data.phone.flatten())
    .bind(data.enabled)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Restaurant {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Restaurant {id} not found")))
}

/// Delete a restaurant; open times and saved entries cascade
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM restaurant WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Restaurant {id} not found")));
    }
    Ok(true)
}
