//! Open Time API 模块
//!
//! 列表与批量创建挂在 `/api/restaurants/{id}/open-times` 下，这里只处理单条记录。

mod handler;

use axum::{Router, routing::put};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/open-times/{id}",
        put(handler::update).delete(handler::delete),
    )
}
