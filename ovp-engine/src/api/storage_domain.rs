//! 存储域管理 API

use reqwest::Method;
use tracing::info;

use crate::client::EngineClient;
use crate::error::Result;
use crate::models::{AddStorageDomainRequest, StorageDomain, StorageDomainList};

/// 存储域管理 API
pub struct StorageDomainApi<'a> {
    client: &'a EngineClient,
}

impl<'a> StorageDomainApi<'a> {
    /// 创建新的存储域 API 实例
    pub(crate) fn new(client: &'a EngineClient) -> Self {
        Self { client }
    }

    /// 查询存储域列表
    pub async fn list(&self) -> Result<Vec<StorageDomain>> {
        info!("查询存储域列表");
        let list: StorageDomainList = self
            .client
            .request(Method::GET, "/storagedomains", None::<()>)
            .await?;
        Ok(list.storage_domain)
    }

    /// 创建存储域
    ///
    /// 仅向 Engine 注册存储域，挂载到数据中心由
    /// [`DataCenterApi::attach_storage_domain`](crate::api::DataCenterApi::attach_storage_domain)
    /// 完成。
    pub async fn add(&self, request: &AddStorageDomainRequest) -> Result<StorageDomain> {
        info!("创建存储域: {} ({})", request.name, request.storage.kind);
        self.client
            .request(Method::POST, "/storagedomains", Some(request))
            .await
    }
}
