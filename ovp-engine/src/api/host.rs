//! 主机管理 API

use reqwest::Method;
use tracing::info;

use crate::api::search_by_name;
use crate::client::EngineClient;
use crate::error::{EngineError, Result};
use crate::models::{Host, HostList};

/// 主机管理 API
pub struct HostApi<'a> {
    client: &'a EngineClient,
}

impl<'a> HostApi<'a> {
    /// 创建新的主机 API 实例
    pub(crate) fn new(client: &'a EngineClient) -> Self {
        Self { client }
    }

    /// 按名称查询主机
    pub async fn get_by_name(&self, name: &str) -> Result<Host> {
        info!("按名称查询主机: {}", name);
        let list: HostList = self
            .client
            .request(Method::GET, &search_by_name("hosts", name), None::<()>)
            .await?;

        list.host
            .into_iter()
            .find(|host| host.name == name)
            .ok_or_else(|| EngineError::NotFound(format!("主机 {}", name)))
    }
}
