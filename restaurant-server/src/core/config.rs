use std::path::PathBuf;

use crate::auth::JwtConfig;
use crate::core::Result;

/// 服务器配置 - 餐厅服务的所有配置项
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | DATABASE_PATH | WORK_DIR/restaurants.db | SQLite 数据库文件 |
/// | DB_MAX_CONNECTIONS | 5 | 连接池大小 |
/// | ENVIRONMENT | development | 运行环境 (development / staging / production) |
/// | LOG_LEVEL | info | 默认日志级别 (RUST_LOG 优先) |
/// | LOG_JSON | false | JSON 格式日志 |
/// | LOG_DIR | - | 按天滚动的日志目录 |
///
/// JWT 相关变量由 [`JwtConfig::from_env`] 读取。
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/srv/restaurants HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录 (数据库和日志默认位于其下)
    pub work_dir: String,
    /// HTTP API 端口
    pub http_port: u16,
    /// SQLite 数据库文件路径
    pub database_path: String,
    /// 连接池大小
    pub db_max_connections: u32,
    /// 运行环境: development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    /// JWT verification settings
    pub jwt: JwtConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Fails outside `development` when `JWT_SECRET` is missing or too short.
    pub fn from_env() -> Result<Self> {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
        let environment =
            std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let database_path = std::env::var("DATABASE_PATH").unwrap_or_else(|_| {
            PathBuf::from(&work_dir)
                .join("restaurants.db")
                .to_string_lossy()
                .into_owned()
        });

        let jwt = JwtConfig::from_env(environment == "development")?;

        Ok(Self {
            work_dir,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path,
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|p| p.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(5),
            environment,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            jwt,
        })
    }

    /// Defaults for everything except JWT, without touching the environment.
    ///
    /// Used by tests and tooling.
    pub fn with_jwt(jwt: JwtConfig) -> Self {
        Self {
            work_dir: "./data".into(),
            http_port: 3000,
            database_path: "./data/restaurants.db".into(),
            db_max_connections: 5,
            environment: "development".into(),
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
            jwt,
        }
    }
}
