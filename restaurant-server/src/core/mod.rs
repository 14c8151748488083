//! 核心模块 - 配置、状态和服务器错误
//!
//! - [`Config`] - 服务器配置
//! - [`ServerState`] - 所有处理器共享的状态
//! - [`Server`] - HTTP 服务器生命周期
//! - [`ServerError`] - 启动与运行错误

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::Config;
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::ServerState;
