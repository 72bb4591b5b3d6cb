//! 数据中心管理 API

use reqwest::Method;
use tracing::info;

use crate::api::search_by_name;
use crate::client::EngineClient;
use crate::error::{EngineError, Result};
use crate::models::{DataCenter, DataCenterList, StorageDomain, StorageDomainList, StorageDomainRef};

/// 数据中心管理 API
pub struct DataCenterApi<'a> {
    client: &'a EngineClient,
}

impl<'a> DataCenterApi<'a> {
    /// 创建新的数据中心 API 实例
    pub(crate) fn new(client: &'a EngineClient) -> Self {
        Self { client }
    }

    /// 按名称查询数据中心
    pub async fn get_by_name(&self, name: &str) -> Result<DataCenter> {
        info!("按名称查询数据中心: {}", name);
        let list: DataCenterList = self
            .client
            .request(Method::GET, &search_by_name("datacenters", name), None::<()>)
            .await?;

        list.data_center
            .into_iter()
            .find(|dc| dc.name == name)
            .ok_or_else(|| EngineError::NotFound(format!("数据中心 {}", name)))
    }

    /// 查询数据中心已挂载的存储域
    pub async fn attached_storage_domains(&self, dc_id: &str) -> Result<Vec<StorageDomain>> {
        info!("查询数据中心已挂载的存储域: {}", dc_id);
        let list: StorageDomainList = self
            .client
            .request(
                Method::GET,
                &format!("/datacenters/{}/storagedomains", dc_id),
                None::<()>,
            )
            .await?;
        Ok(list.storage_domain)
    }

    /// 在数据中心已挂载的存储域中按名称查找
    ///
    /// 已挂载集合不支持 search 表达式，在客户端按名称过滤。
    pub async fn find_attached_storage_domain(
        &self,
        dc_id: &str,
        name: &str,
    ) -> Result<Option<StorageDomain>> {
        let domains = self.attached_storage_domains(dc_id).await?;
        Ok(domains.into_iter().find(|sd| sd.name == name))
    }

    /// 挂载存储域到数据中心
    pub async fn attach_storage_domain(&self, dc_id: &str, sd_id: &str) -> Result<StorageDomain> {
        info!("挂载存储域到数据中心: {} -> {}", sd_id, dc_id);
        self.client
            .request(
                Method::POST,
                &format!("/datacenters/{}/storagedomains", dc_id),
                Some(StorageDomainRef {
                    id: sd_id.to_string(),
                }),
            )
            .await
    }
}
