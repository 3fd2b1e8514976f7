//! User API 模块
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/users | POST | 注册 | 无 |
//! | /api/users/token | POST | 登录，获取访问令牌 | 无 |
//! | /api/users/me | GET | 当前用户信息 | 需要 |
//! | /api/users/restaurants | GET | 收藏的餐厅 | 需要 |
//! | /api/users/restaurants/{id} | POST / DELETE | 收藏 / 取消收藏 | 需要 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/users", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::register))
        .route("/token", post(handler::login))
        .route("/me", get(handler::me))
        .route("/restaurants", get(handler::list_saved))
        .route(
            "/restaurants/{id}",
            post(handler::save).delete(handler::unsave),
        )
}
