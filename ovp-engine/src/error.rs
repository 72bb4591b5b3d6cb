//! Engine 错误定义

use thiserror::Error;

/// Engine 操作结果类型
pub type Result<T> = std::result::Result<T, EngineError>;

/// Engine 错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// HTTP 错误
    #[error("HTTP 错误: {0}")]
    Http(String),

    /// 认证错误
    #[error("认证错误: {0}")]
    Auth(String),

    /// API 错误（携带 Engine 返回的 fault 信息）
    #[error("API 错误 [{0}]: {1}")]
    Api(u16, String),

    /// 解析错误
    #[error("解析错误: {0}")]
    Parse(String),

    /// 资源不存在
    #[error("资源不存在: {0}")]
    NotFound(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),
}
