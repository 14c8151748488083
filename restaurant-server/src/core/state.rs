use std::path::Path;
use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::{Config, Result};
use crate::db::DbService;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 连接池和 JWT 服务均为引用计数，克隆成本极低；启动后不再修改。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 服务器配置 (不可变) |
/// | db | SQLite 连接池 |
/// | jwt_service | 令牌验证 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// 由现成组件构建状态 (测试中使用内存数据库)
    pub fn new(config: Config, db: DbService, jwt_service: Arc<JwtService>) -> Self {
        Self {
            config,
            db,
            jwt_service,
        }
    }

    /// 初始化服务器状态
    ///
    /// 1. 工作目录 (不存在则创建)
    /// 2. 数据库 (执行迁移)
    /// 3. JWT 服务
    pub async fn initialize(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;
        if let Some(parent) = Path::new(&config.database_path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let db = DbService::new(&config.database_path, config.db_max_connections).await?;
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        tracing::info!(
            work_dir = %config.work_dir,
            database = %config.database_path,
            "Server state initialized"
        );

        Ok(Self::new(config.clone(), db, jwt_service))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
