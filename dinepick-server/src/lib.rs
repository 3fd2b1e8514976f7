//! Dinepick Server - 餐厅随机推荐后端
//!
//! # 架构概述
//!
//! - **数据库** (`db`): SQLite (sqlx) 连接池、迁移与仓储
//! - **认证** (`auth`): JWT + Argon2 认证体系
//! - **随机推荐** (`selection`): 按距离、营业时间筛选并均匀抽样
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! dinepick-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── auth/          # JWT 认证、密码哈希
//! ├── selection/     # 随机推荐
//! ├── api/           # HTTP 路由和处理器
//! ├── utils/         # 工具函数
//! └── db/            # 数据库层
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod selection;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use selection::{RestaurantSelector, RestaurantSource, SelectionError};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境: 初始化日志 (控制台或 work_dir/logs 滚动文件)
pub fn setup_environment(config: &Config) {
    let log_dir = config.log_dir();
    init_logger_with_file(Some(&config.log_level), log_dir.to_str());
}

pub fn print_banner() {
    println!(
        r#"
      _ _                  _      _
   __| (_)_ __   ___ _ __ (_) ___| | __
  / _` | | '_ \ / _ \ '_ \| |/ __| |/ /
 | (_| | | | | |  __/ |_) | | (__|   <
  \__,_|_|_| |_|\___| .__/|_|\___|_|\_\
                    |_|
    "#
    );
}
