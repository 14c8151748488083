use thiserror::Error;

use crate::auth::JwtError;

/// 服务器启动/运行错误
///
/// 请求级错误使用 [`shared::AppError`]，此类型不会返回给客户端。
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<JwtError> for ServerError {
    fn from(err: JwtError) -> Self {
        ServerError::Config(err.to_string())
    }
}

/// 启动代码的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
