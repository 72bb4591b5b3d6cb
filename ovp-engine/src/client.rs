//! Engine 客户端核心实现

use std::sync::Arc;

use reqwest::{Client, Method};
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;

use crate::api::{DataCenterApi, HostApi, StorageDomainApi};
use crate::error::{EngineError, Result};

/// Engine 客户端配置
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// 连接超时（秒）
    pub connect_timeout: u64,

    /// 请求超时（秒）
    pub request_timeout: u64,

    /// 是否验证 SSL 证书
    pub verify_ssl: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            connect_timeout: 10,
            request_timeout: 60,
            verify_ssl: false,
        }
    }
}

/// oVirt Engine 客户端
pub struct EngineClient {
    /// Engine 基础 URL（不含 /ovirt-engine/api）
    base_url: String,

    /// HTTP 客户端
    http_client: Client,

    /// SSO 访问令牌
    access_token: Arc<RwLock<Option<String>>>,
}

impl EngineClient {
    /// 创建新的 Engine 客户端
    pub fn new(base_url: &str, config: EngineConfig) -> Result<Self> {
        // 提前校验 URL 格式
        Url::parse(base_url)
            .map_err(|e| EngineError::Config(format!("无效的 Engine 地址 {}: {}", base_url, e)))?;

        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout))
            .connect_timeout(std::time::Duration::from_secs(config.connect_timeout))
            .danger_accept_invalid_certs(!config.verify_ssl)
            .build()
            .map_err(|e| EngineError::Http(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
            access_token: Arc::new(RwLock::new(None)),
        })
    }

    /// SSO 认证登录
    ///
    /// 通过 Engine 的 SSO 密码授权接口获取访问令牌，
    /// 之后的 API 请求携带 Bearer 令牌。
    ///
    /// # Arguments
    /// * `username` - 用户名（形如 admin@internal）
    /// * `password` - 明文密码
    pub async fn login(&mut self, username: &str, password: &str) -> Result<()> {
        info!("Engine 客户端登录: {}", username);

        let sso_url = format!("{}/ovirt-engine/sso/oauth/token", self.base_url);
        let form = [
            ("grant_type", "password"),
            ("scope", "ovirt-app-api"),
            ("username", username),
            ("password", password),
        ];

        let response = self
            .http_client
            .post(&sso_url)
            .header("Accept", "application/json")
            .form(&form)
            .send()
            .await
            .map_err(|e| EngineError::Http(e.to_string()))?;

        let sso_result: serde_json::Value = response
            .json()
            .await
            .map_err(|e| EngineError::Parse(e.to_string()))?;

        // SSO 失败时返回 error/error_description 而不是令牌
        if let Some(error) = sso_result["error"].as_str() {
            let detail = sso_result["error_description"]
                .as_str()
                .or_else(|| sso_result["error_msg"].as_str())
                .unwrap_or(error);
            return Err(EngineError::Auth(format!("Engine 登录失败: {}", detail)));
        }

        let token = sso_result["access_token"]
            .as_str()
            .ok_or_else(|| EngineError::Auth("未获取到访问令牌".to_string()))?
            .to_string();

        *self.access_token.write().await = Some(token);

        info!("Engine 客户端登录成功");
        Ok(())
    }

    /// 注销登出
    pub async fn logout(&mut self) -> Result<()> {
        info!("Engine 客户端登出");
        *self.access_token.write().await = None;
        Ok(())
    }

    /// 获取数据中心管理 API
    pub fn data_center(&self) -> DataCenterApi<'_> {
        DataCenterApi::new(self)
    }

    /// 获取主机管理 API
    pub fn host(&self) -> HostApi<'_> {
        HostApi::new(self)
    }

    /// 获取存储域管理 API
    pub fn storage_domain(&self) -> StorageDomainApi<'_> {
        StorageDomainApi::new(self)
    }

    /// 发送 API 请求
    ///
    /// `path` 为 `/ovirt-engine/api` 之后的相对路径。
    pub(crate) async fn request<T: Serialize, R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<T>,
    ) -> Result<R> {
        let url = format!("{}/ovirt-engine/api{}", self.base_url, path);
        debug!("Engine API 请求: {} {}", method, url);

        let token = self.access_token.read().await;
        let token_str = token
            .as_ref()
            .ok_or_else(|| EngineError::Auth("未认证，请先登录".to_string()))?;

        let mut request = self
            .http_client
            .request(method, &url)
            .bearer_auth(token_str)
            .header("Accept", "application/json")
            .header("Version", "4");

        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| EngineError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "无法读取错误响应".to_string());
            warn!("API 请求失败: {} - {}", status, error_text);
            return Err(EngineError::Api(status.as_u16(), fault_message(&error_text)));
        }

        response
            .json::<R>()
            .await
            .map_err(|e| EngineError::Parse(e.to_string()))
    }
}

/// 提取 Engine fault 信息
///
/// Engine 的错误响应形如 `{"fault": {"reason": ..., "detail": ...}}`，
/// 解析失败时原样返回响应文本。
fn fault_message(body: &str) -> String {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => return body.to_string(),
    };

    let fault = &value["fault"];
    match (fault["reason"].as_str(), fault["detail"].as_str()) {
        (Some(reason), Some(detail)) => format!("{}: {}", reason, detail),
        (Some(reason), None) => reason.to_string(),
        _ => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_client_creation() {
        let client = EngineClient::new("https://engine.example.com", EngineConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_engine_client_invalid_url() {
        let client = EngineClient::new("engine.example.com", EngineConfig::default());
        assert!(client.is_err());
    }

    #[test]
    fn test_fault_message_with_detail() {
        let body = r#"{"fault": {"reason": "Operation Failed", "detail": "[Storage domain already exists]"}}"#;
        assert_eq!(
            fault_message(body),
            "Operation Failed: [Storage domain already exists]"
        );
    }

    #[test]
    fn test_fault_message_plain_text() {
        assert_eq!(fault_message("gateway timeout"), "gateway timeout");
    }
}
