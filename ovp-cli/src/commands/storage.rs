//! 存储域管理命令
//!
//! `storage create` 是幂等的置备动作：同名存储域已挂载时不做任何
//! 变更，否则创建存储域并挂载到目标数据中心。执行结果以结构化
//! JSON 输出到 stdout，供自动化调用方解析。

use anyhow::{Context, Result};
use ovp_engine::{
    AddStorageDomainRequest, DomainType, HostRef, Storage, StorageBackend, StorageDomain,
};
use serde::Serialize;
use tracing::info;

use crate::commands::common::{create_engine_client, resolve_connection};
use crate::commands::output::{output_formatted, TableRow};
use crate::{ConnectionArgs, StorageAction};

/// 置备动作的结构化结果
#[derive(Debug, Serialize)]
pub struct ProvisionResult {
    /// 远端状态是否发生（或在预览模式下将要发生）变更
    pub changed: bool,

    /// 附加说明
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,

    /// 仅失败时出现
    #[serde(skip_serializing_if = "is_false")]
    pub failed: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl ProvisionResult {
    fn unchanged(msg: String) -> Self {
        Self {
            changed: false,
            msg: Some(msg),
            failed: false,
        }
    }

    fn changed(msg: String) -> Self {
        Self {
            changed: true,
            msg: Some(msg),
            failed: false,
        }
    }

    fn failed(msg: String) -> Self {
        Self {
            changed: false,
            msg: Some(msg),
            failed: true,
        }
    }
}

/// `storage create` 的动作参数
struct CreateParams {
    name: String,
    datacenter: String,
    host: String,
    path: String,
    backend: String,
    domain_type: String,
    address: String,
    dry_run: bool,
}

pub async fn handle(action: StorageAction) -> Result<()> {
    match action {
        StorageAction::Create {
            name,
            datacenter,
            host,
            path,
            backend,
            domain_type,
            address,
            dry_run,
            conn,
        } => {
            let params = CreateParams {
                name,
                datacenter,
                host,
                path,
                backend,
                domain_type,
                address,
                dry_run,
            };

            match create_storage(&conn, params).await {
                Ok(result) => {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                    Ok(())
                }
                Err(e) => {
                    // 失败同样输出结构化结果，退出码由 main 的错误传播决定
                    let result = ProvisionResult::failed(format!("{:#}", e));
                    println!("{}", serde_json::to_string_pretty(&result)?);
                    Err(e)
                }
            }
        }
        StorageAction::List {
            datacenter,
            format,
            conn,
        } => list_storage(&conn, datacenter.as_deref(), &format).await,
    }
}

/// 校验存储参数枚举值
///
/// 在建立任何网络连接之前完成，非法取值直接报错。
fn parse_storage_params(
    backend: &str,
    domain_type: &str,
) -> Result<(StorageBackend, DomainType)> {
    Ok((backend.parse()?, domain_type.parse()?))
}

/// 创建存储域并挂载到数据中心
async fn create_storage(conn: &ConnectionArgs, params: CreateParams) -> Result<ProvisionResult> {
    let (backend, domain_type) = parse_storage_params(&params.backend, &params.domain_type)?;

    let connection = resolve_connection(conn)?;
    let client = create_engine_client(&connection).await?;

    let dc = client.data_center().get_by_name(&params.datacenter).await?;
    let host = client.host().get_by_name(&params.host).await?;

    // 幂等检查: 同名存储域已挂载时不做任何变更
    if client
        .data_center()
        .find_attached_storage_domain(&dc.id, &params.name)
        .await?
        .is_some()
    {
        info!(
            "存储域 {} 已挂载到数据中心 {}",
            params.name, params.datacenter
        );
        return Ok(ProvisionResult::unchanged(format!(
            "存储域 {} 已存在",
            params.name
        )));
    }

    if params.dry_run {
        return Ok(ProvisionResult::changed(format!(
            "预览模式: 存储域 {} 将被创建并挂载到数据中心 {}",
            params.name, params.datacenter
        )));
    }

    let request = AddStorageDomainRequest {
        name: params.name.clone(),
        kind: domain_type,
        host: HostRef { name: host.name },
        storage: Storage {
            kind: backend,
            address: params.address,
            path: params.path,
        },
    };

    let sd = client
        .storage_domain()
        .add(&request)
        .await
        .context("添加存储域失败")?;

    client
        .data_center()
        .attach_storage_domain(&dc.id, &sd.id)
        .await
        .context("添加存储域失败")?;

    Ok(ProvisionResult::changed(format!(
        "存储域 {} 已创建并挂载到数据中心 {}",
        params.name, params.datacenter
    )))
}

/// 存储域列表行
#[derive(Debug, Serialize)]
struct StorageDomainRow {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    backend: String,
    address: String,
    path: String,
    status: String,
}

impl StorageDomainRow {
    fn from_domain(sd: &StorageDomain) -> Self {
        let storage = sd.storage.as_ref();
        Self {
            name: sd.name.clone(),
            kind: sd.kind.clone().unwrap_or_default(),
            backend: storage
                .and_then(|s| s.kind.clone())
                .unwrap_or_default(),
            address: storage
                .and_then(|s| s.address.clone())
                .unwrap_or_default(),
            path: storage.and_then(|s| s.path.clone()).unwrap_or_default(),
            status: sd.status.clone().unwrap_or_default(),
        }
    }
}

impl TableRow for StorageDomainRow {
    fn headers() -> Vec<&'static str> {
        vec!["NAME", "TYPE", "BACKEND", "ADDRESS", "PATH", "STATUS"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.kind.clone(),
            self.backend.clone(),
            self.address.clone(),
            self.path.clone(),
            self.status.clone(),
        ]
    }
}

/// 列出存储域
async fn list_storage(
    conn: &ConnectionArgs,
    datacenter: Option<&str>,
    format: &str,
) -> Result<()> {
    let connection = resolve_connection(conn)?;
    let client = create_engine_client(&connection).await?;

    let domains = match datacenter {
        Some(name) => {
            let dc = client.data_center().get_by_name(name).await?;
            client.data_center().attached_storage_domains(&dc.id).await?
        }
        None => client.storage_domain().list().await?,
    };

    let rows: Vec<StorageDomainRow> = domains.iter().map(StorageDomainRow::from_domain).collect();
    output_formatted(&rows, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_storage_params() {
        let (backend, domain_type) = parse_storage_params("nfs", "data").unwrap();
        assert_eq!(backend, StorageBackend::Nfs);
        assert_eq!(domain_type, DomainType::Data);

        let (backend, domain_type) = parse_storage_params("glusterfs", "export").unwrap();
        assert_eq!(backend, StorageBackend::Glusterfs);
        assert_eq!(domain_type, DomainType::Export);
    }

    #[test]
    fn test_parse_storage_params_invalid() {
        assert!(parse_storage_params("iscsi", "data").is_err());
        assert!(parse_storage_params("nfs", "backup").is_err());
    }

    #[test]
    fn test_result_json_changed() {
        let result = ProvisionResult::changed("存储域 data1 已创建".to_string());
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["changed"], true);
        assert_eq!(json["msg"], "存储域 data1 已创建");
        // 成功结果不携带 failed 字段
        assert!(json.get("failed").is_none());
    }

    #[test]
    fn test_result_json_unchanged() {
        let result = ProvisionResult::unchanged("存储域 data1 已存在".to_string());
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["changed"], false);
        assert!(json.get("failed").is_none());
    }

    #[test]
    fn test_result_json_failed() {
        let result = ProvisionResult::failed("无法连接 oVirt Engine API".to_string());
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["changed"], false);
        assert_eq!(json["failed"], true);
        assert!(!json["msg"].as_str().unwrap().is_empty());
    }

    #[test]
    fn test_row_from_domain() {
        let sd: StorageDomain = serde_json::from_str(
            r#"{
                "id": "sd-1",
                "name": "data1",
                "type": "data",
                "status": "active",
                "storage": {"type": "nfs", "address": "192.168.1.20", "path": "/exports/data1"}
            }"#,
        )
        .unwrap();

        let row = StorageDomainRow::from_domain(&sd);
        assert_eq!(row.name, "data1");
        assert_eq!(row.kind, "data");
        assert_eq!(row.backend, "nfs");
        assert_eq!(row.address, "192.168.1.20");
        assert_eq!(row.path, "/exports/data1");
    }

    #[test]
    fn test_row_from_domain_without_storage() {
        let sd: StorageDomain = serde_json::from_str(r#"{"id": "sd-2", "name": "bare"}"#).unwrap();

        let row = StorageDomainRow::from_domain(&sd);
        assert_eq!(row.name, "bare");
        assert_eq!(row.backend, "");
        assert_eq!(row.path, "");
    }
}
