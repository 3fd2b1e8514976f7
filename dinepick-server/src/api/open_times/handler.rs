//! Open Time API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{OpenTime, OpenTimeUpdate};

use crate::core::ServerState;
use crate::db::repository::open_time;
use crate::utils::{AppError, AppResult, ErrorCode};

fn open_time_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::OpenTimeNotFound, format!("Open time {id} not found"))
        .with_detail("id", id)
}

/// PUT /api/open-times/:id - 更新营业时间
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<OpenTimeUpdate>,
) -> AppResult<Json<OpenTime>> {
    if open_time::find_by_id(&state.pool, id).await?.is_none() {
        return Err(open_time_not_found(id));
    }

    let updated = open_time::update(&state.pool, id, payload).await?;
    tracing::info!(open_time_id = id, restaurant_id = updated.restaurant_id, "Open time updated");
    Ok(Json(updated))
}

/// DELETE /api/open-times/:id - 删除营业时间
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    if open_time::find_by_id(&state.pool, id).await?.is_none() {
        return Err(open_time_not_found(id));
    }

    let result = open_time::delete(&state.pool, id).await?;
    tracing::info!(open_time_id = id, "Open time deleted");
    Ok(Json(result))
}
