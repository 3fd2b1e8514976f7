//! Restaurant API Handlers

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use shared::models::{
    OpenTime, OpenTimeCreate, RandomRestaurantQuery, Restaurant, RestaurantCreate,
    RestaurantUpdate,
};

use super::restaurant_not_found;
use crate::core::ServerState;
use crate::db::repository::{open_time, restaurant};
use crate::selection::GeoPoint;
use crate::utils::time::parse_time_of_day;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_lat, validate_lng,
    validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// GET /api/restaurants - 获取所有餐厅
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Restaurant>>> {
    let restaurants = restaurant::find_all(&state.pool).await?;
    Ok(Json(restaurants))
}

/// GET /api/restaurants/:id - 获取单个餐厅 (含全部营业时间)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Restaurant>> {
    let mut found = restaurant::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| restaurant_not_found(id))?;
    found.open_times = open_time::find_by_restaurant(&state.pool, id).await?;
    Ok(Json(found))
}

/// GET /api/restaurants/random - 随机推荐
///
/// `day_of_week` 与 `time` 必须同时提供或同时省略
pub async fn random(
    State(state): State<ServerState>,
    query: Result<Query<RandomRestaurantQuery>, QueryRejection>,
) -> AppResult<Json<Vec<Restaurant>>> {
    let Query(query) = query.map_err(|e| AppError::validation(e.body_text()))?;

    validate_lat(query.lat)?;
    validate_lng(query.lng)?;
    if !query.radius.is_finite() || query.radius <= 0.0 {
        return Err(AppError::invalid_argument(format!(
            "radius must be a positive number of kilometres, got {}",
            query.radius
        ))
        .with_detail("field", "radius"));
    }

    let max_limit = state.config.max_random_limit;
    let limit = query
        .limit
        .unwrap_or(state.config.default_random_limit.min(max_limit));
    if limit < 1 || limit > max_limit {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("limit must be between 1 and {max_limit}, got {limit}"),
        )
        .with_detail("field", "limit"));
    }

    let center = GeoPoint::new(query.lat, query.lng);
    let selector = state.selector();
    let mut rng = StdRng::from_entropy();

    let picked = match (query.day_of_week, query.time.as_deref()) {
        (None, None) => {
            selector
                .select_random(center, query.radius, limit, &mut rng)
                .await?
        }
        (Some(day_of_week), Some(time)) => {
            let time_of_day = parse_time_of_day(time)?;
            selector
                .select_random_with_open_time(
                    center,
                    query.radius,
                    day_of_week,
                    time_of_day,
                    limit,
                    &mut rng,
                )
                .await?
        }
        _ => {
            return Err(AppError::validation(
                "day_of_week and time must be provided together",
            ));
        }
    };

    Ok(Json(picked))
}

/// POST /api/restaurants - 创建餐厅
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<RestaurantCreate>,
) -> AppResult<Json<Restaurant>> {
    validate_create_payload(&payload)?;

    let created = restaurant::create(&state.pool, payload).await?;
    tracing::info!(restaurant_id = created.id, name = %created.name, "Restaurant created");
    Ok(Json(created))
}

/// PUT /api/restaurants/:id - 更新餐厅
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<RestaurantUpdate>,
) -> AppResult<Json<Restaurant>> {
    validate_update_payload(&payload)?;

    if restaurant::find_by_id(&state.pool, id).await?.is_none() {
        return Err(restaurant_not_found(id));
    }

    let updated = restaurant::update(&state.pool, id, payload).await?;
    tracing::info!(restaurant_id = id, "Restaurant updated");
    Ok(Json(updated))
}

/// DELETE /api/restaurants/:id - 删除餐厅 (营业时间、收藏一并删除)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    if restaurant::find_by_id(&state.pool, id).await?.is_none() {
        return Err(restaurant_not_found(id));
    }

    let result = restaurant::delete(&state.pool, id).await?;
    tracing::info!(restaurant_id = id, "Restaurant deleted");
    Ok(Json(result))
}

/// GET /api/restaurants/:id/open-times - 获取营业时间
pub async fn list_open_times(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<OpenTime>>> {
    if restaurant::find_by_id(&state.pool, id).await?.is_none() {
        return Err(restaurant_not_found(id));
    }
    let open_times = open_time::find_by_restaurant(&state.pool, id).await?;
    Ok(Json(open_times))
}

/// POST /api/restaurants/:id/open-times - 批量添加营业时间
pub async fn create_open_times(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<Vec<OpenTimeCreate>>,
) -> AppResult<Json<Vec<OpenTime>>> {
    if payload.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            "At least one open time is required",
        ));
    }
    if restaurant::find_by_id(&state.pool, id).await?.is_none() {
        return Err(restaurant_not_found(id));
    }

    let created = open_time::create_batch(&state.pool, id, payload).await?;
    tracing::info!(restaurant_id = id, count = created.len(), "Open times created");
    Ok(Json(created))
}

fn validate_create_payload(payload: &RestaurantCreate) -> AppResult<()> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_lat(payload.lat)?;
    validate_lng(payload.lng)?;
    Ok(())
}

fn validate_update_payload(payload: &RestaurantUpdate) -> AppResult<()> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(address) = &payload.address {
        validate_required_text(address, "address", MAX_ADDRESS_LEN)?;
    }
    if let Some(phone) = &payload.phone {
        validate_optional_text(phone, "phone", MAX_SHORT_TEXT_LEN)?;
    }
    if let Some(lat) = payload.lat {
        validate_lat(lat)?;
    }
    if let Some(lng) = payload.lng {
        validate_lng(lng)?;
    }
    Ok(())
}
