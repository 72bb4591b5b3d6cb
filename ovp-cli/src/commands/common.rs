//! 公共工具函数模块
//!
//! 提供各命令模块共享的功能：
//! - Engine 客户端创建和登录
//! - 配置文件加载

use anyhow::{Context, Result};
use ovp_engine::{EngineClient, EngineConfig};

use crate::config::{CliConfig, EngineConnection};
use crate::ConnectionArgs;

/// 加载配置文件并合并命令行连接参数
pub fn resolve_connection(conn: &ConnectionArgs) -> Result<EngineConnection> {
    let config = match conn.config.as_deref() {
        Some(path) => CliConfig::load_from(std::path::Path::new(path))?,
        None => CliConfig::load()?,
    };

    config.resolve_connection(
        conn.url.as_deref(),
        conn.username.as_deref(),
        conn.password.as_deref(),
        conn.timeout,
        conn.verify_ssl,
    )
}

/// 创建并登录 Engine 客户端
pub async fn create_engine_client(conn: &EngineConnection) -> Result<EngineClient> {
    let client_config = EngineConfig {
        connect_timeout: conn.connect_timeout,
        request_timeout: conn.timeout,
        verify_ssl: conn.verify_ssl,
    };

    let mut client =
        EngineClient::new(&conn.url, client_config).context("创建 Engine 客户端失败")?;

    client
        .login(&conn.username, &conn.password)
        .await
        .context("无法连接 oVirt Engine API")?;

    Ok(client)
}
