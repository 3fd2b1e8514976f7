//! Restaurant API 模块
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/restaurants | GET | 餐厅列表 | 无 |
//! | /api/restaurants | POST | 创建餐厅 | 需要 |
//! | /api/restaurants/random | GET | 随机推荐 | 无 |
//! | /api/restaurants/{id} | GET | 餐厅详情 (含营业时间) | 无 |
//! | /api/restaurants/{id} | PUT / DELETE | 更新 / 删除 | 需要 |
//! | /api/restaurants/{id}/open-times | GET | 营业时间列表 | 无 |
//! | /api/restaurants/{id}/open-times | POST | 批量添加营业时间 | 需要 |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;
use crate::utils::{AppError, ErrorCode};

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/restaurants", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/random", get(handler::random))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route(
            "/{id}/open-times",
            get(handler::list_open_times).post(handler::create_open_times),
        )
}

pub(crate) fn restaurant_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::RestaurantNotFound, format!("Restaurant {id} not found"))
        .with_detail("id", id)
}
