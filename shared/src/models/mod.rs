//! Data models
//!
//! Shared between dinepick-server and its clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod open_time;
pub mod restaurant;
pub mod user;

// Re-exports
pub use open_time::*;
pub use restaurant::*;
pub use user::*;
