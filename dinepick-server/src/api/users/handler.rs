//! User API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use http::StatusCode;
use shared::models::{LoginRequest, Restaurant, TokenResponse, UserCreate, UserResponse};

use crate::api::restaurants::restaurant_not_found;
use crate::auth::{CurrentUser, hash_password, verify_password};
use crate::core::ServerState;
use crate::db::repository::{restaurant, saved_restaurant, user};
use crate::security_log;
use crate::utils::validation::{MAX_NAME_LEN, validate_email, validate_password, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};

/// POST /api/users - 注册
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let username = payload.username.trim();
    let email = payload.email.trim();

    validate_required_text(username, "username", MAX_NAME_LEN)?;
    validate_email(email)?;
    validate_password(&payload.password)?;

    if user::find_by_username(&state.pool, username).await?.is_some() {
        return Err(AppError::new(ErrorCode::UsernameExists).with_detail("username", username));
    }
    if user::find_by_email(&state.pool, email).await?.is_some() {
        return Err(AppError::new(ErrorCode::EmailExists).with_detail("email", email));
    }

    let hash_pass = hash_password(&payload.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;

    let created = user::create(&state.pool, username, email, &hash_pass).await?;

    tracing::info!(user_id = created.id, username = %created.username, "User registered");

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// POST /api/users/token - 登录
///
/// 用户不存在与密码错误返回相同的错误信息
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let found = user::find_by_username(&state.pool, req.username.trim()).await?;

    let Some(found) = found else {
        security_log!("WARN", "login_failed", username = req.username.clone());
        return Err(AppError::invalid_credentials());
    };

    let password_valid = verify_password(&req.password, &found.hash_pass)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

    if !password_valid {
        security_log!("WARN", "login_failed", username = req.username.clone());
        return Err(AppError::invalid_credentials());
    }

    if !found.enabled {
        security_log!("WARN", "login_disabled", username = found.username.clone());
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    let jwt_service = state.get_jwt_service();
    let token = jwt_service
        .generate_token(found.id, &found.username)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        user_id = found.id,
        username = %found.username,
        "User logged in successfully"
    );

    Ok(Json(TokenResponse::bearer(
        token,
        jwt_service.expires_in_seconds(),
    )))
}

/// GET /api/users/me - 当前用户信息
pub async fn me(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<UserResponse>> {
    let found = user::find_by_id(&state.pool, current_user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
    Ok(Json(found.into()))
}

/// GET /api/users/restaurants - 收藏的餐厅
pub async fn list_saved(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<Restaurant>>> {
    let restaurants = saved_restaurant::find_by_user(&state.pool, current_user.id).await?;
    Ok(Json(restaurants))
}

/// POST /api/users/restaurants/:id - 收藏餐厅 (重复收藏无副作用)
pub async fn save(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(restaurant_id): Path<i64>,
) -> AppResult<Json<Restaurant>> {
    let found = restaurant::find_by_id(&state.pool, restaurant_id)
        .await?
        .ok_or_else(|| restaurant_not_found(restaurant_id))?;

    saved_restaurant::save(&state.pool, current_user.id, restaurant_id).await?;

    tracing::debug!(user_id = current_user.id, restaurant_id, "Restaurant saved");
    Ok(Json(found))
}

/// DELETE /api/users/restaurants/:id - 取消收藏
pub async fn unsave(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(restaurant_id): Path<i64>,
) -> AppResult<Json<bool>> {
    let removed = saved_restaurant::remove(&state.pool, current_user.id, restaurant_id).await?;
    Ok(Json(removed))
}
