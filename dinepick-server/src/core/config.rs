use std::path::PathBuf;

use crate::auth::JwtConfig;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖 (`.env` 文件同样生效)：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (数据库、日志) |
/// | DATABASE_URL | sqlite:{WORK_DIR}/dinepick.db | SQLite 连接串 |
/// | HTTP_PORT | 8000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 默认日志级别 |
/// | DEFAULT_RANDOM_LIMIT | 1 | 随机推荐默认数量 |
/// | MAX_RANDOM_LIMIT | 50 | 随机推荐最大数量 |
///
/// JWT 相关变量见 [`JwtConfig`]。
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/dinepick HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// SQLite 连接串
    pub database_url: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 运行环境: development | production
    pub environment: String,
    /// 默认日志级别 (RUST_LOG 优先)
    pub log_level: String,
    /// `limit` 缺省时的随机推荐数量
    pub default_random_limit: usize,
    /// 客户端可请求的最大随机推荐数量
    pub max_random_limit: usize,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| format!("sqlite:{work_dir}/dinepick.db"));

        Self {
            database_url,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            default_random_limit: parse_limit("DEFAULT_RANDOM_LIMIT", 1),
            max_random_limit: parse_limit("MAX_RANDOM_LIMIT", 50),
            work_dir,
        }
        .with_clamped_random_limit()
    }

    /// 缺省数量超过最大数量时截断为最大数量
    fn with_clamped_random_limit(mut self) -> Self {
        if self.default_random_limit > self.max_random_limit {
            tracing::warn!(
                default_random_limit = self.default_random_limit,
                max_random_limit = self.max_random_limit,
                "DEFAULT_RANDOM_LIMIT exceeds MAX_RANDOM_LIMIT, clamping to the maximum"
            );
            self.default_random_limit = self.max_random_limit;
        }
        self
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(
        work_dir: impl Into<String>,
        database_url: impl Into<String>,
        http_port: u16,
    ) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.database_url = database_url.into();
        config.http_port = http_port;
        config
    }

    /// 日志目录 (work_dir/logs)
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 确保工作目录存在
    pub fn ensure_work_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.work_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// 读取正整数环境变量，缺失或非法时使用默认值
fn parse_limit(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|v| *v >= 1)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_overrides() {
        let config = Config::with_overrides("/tmp/dinepick", "sqlite::memory:", 9100);
        assert_eq!(config.work_dir, "/tmp/dinepick");
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.http_port, 9100);
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/dinepick/logs"));
    }

    #[test]
    fn test_random_limits_are_positive() {
        let config = Config::from_env();
        assert!(config.default_random_limit >= 1);
        assert!(config.max_random_limit >= 1);
    }

    #[test]
    fn test_default_limit_clamped_to_max() {
        let mut config = Config::from_env();
        config.default_random_limit = 5;
        config.max_random_limit = 3;

        let config = config.with_clamped_random_limit();
        assert_eq!(config.default_random_limit, 3);
        assert_eq!(config.max_random_limit, 3);
    }

    #[test]
    fn test_default_limit_within_max_is_kept() {
        let mut config = Config::from_env();
        config.default_random_limit = 2;
        config.max_random_limit = 10;

        let config = config.with_clamped_random_limit();
        assert_eq!(config.default_random_limit, 2);
    }

    #[test]
    fn test_parse_limit_falls_back_on_missing_var() {
        assert_eq!(parse_limit("DINEPICK_TEST_UNSET_LIMIT", 7), 7);
    }
}
