//! oVirt Engine 数据模型
//!
//! 仅建模本工具用到的 Engine REST API 子集。字段名与 Engine 的
//! JSON 表示保持一致（`type`、`address`、`path` 等），集合查询的
//! 响应外层以资源名作为键（如 `{"data_center": [...]}`）。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// 数据中心信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataCenter {
    /// 数据中心 ID
    pub id: String,

    /// 数据中心名称
    pub name: String,

    /// 状态（如 up / maintenance）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// 主机信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Host {
    /// 主机 ID
    pub id: String,

    /// 主机名称
    pub name: String,

    /// 主机地址
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// 状态
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// 存储域信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageDomain {
    /// 存储域 ID
    pub id: String,

    /// 存储域名称
    pub name: String,

    /// 存储域用途 (data / iso / export)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// 后端存储信息
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<DomainStorage>,

    /// 状态
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// 存储域的后端存储信息（查询返回，字段按后端类型出现）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainStorage {
    /// 后端类型
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// 存储服务器地址
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// 导出路径
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// 存储后端类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Nfs,
    Glusterfs,
}

impl FromStr for StorageBackend {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nfs" => Ok(StorageBackend::Nfs),
            "glusterfs" => Ok(StorageBackend::Glusterfs),
            other => Err(EngineError::Config(format!(
                "不支持的存储后端类型: {} (可选: nfs, glusterfs)",
                other
            ))),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Nfs => write!(f, "nfs"),
            StorageBackend::Glusterfs => write!(f, "glusterfs"),
        }
    }
}

/// 存储域用途
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainType {
    Data,
    Iso,
    Export,
}

impl FromStr for DomainType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "data" => Ok(DomainType::Data),
            "iso" => Ok(DomainType::Iso),
            "export" => Ok(DomainType::Export),
            other => Err(EngineError::Config(format!(
                "不支持的存储域用途: {} (可选: data, iso, export)",
                other
            ))),
        }
    }
}

impl fmt::Display for DomainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainType::Data => write!(f, "data"),
            DomainType::Iso => write!(f, "iso"),
            DomainType::Export => write!(f, "export"),
        }
    }
}

/// 创建存储域请求
#[derive(Debug, Clone, Serialize)]
pub struct AddStorageDomainRequest {
    /// 存储域名称
    pub name: String,

    /// 存储域用途
    #[serde(rename = "type")]
    pub kind: DomainType,

    /// 执行挂载操作的主机（按名称引用）
    pub host: HostRef,

    /// 后端存储参数
    pub storage: Storage,
}

/// 主机引用（按名称）
#[derive(Debug, Clone, Serialize)]
pub struct HostRef {
    /// 主机名称
    pub name: String,
}

/// 存储域引用（按 ID，用于挂载）
#[derive(Debug, Clone, Serialize)]
pub struct StorageDomainRef {
    /// 存储域 ID
    pub id: String,
}

/// 创建请求中的后端存储参数
#[derive(Debug, Clone, Serialize)]
pub struct Storage {
    /// 后端类型
    #[serde(rename = "type")]
    pub kind: StorageBackend,

    /// 存储服务器地址
    pub address: String,

    /// 导出路径
    pub path: String,
}

// ============================================
// 集合查询响应外层
// ============================================

/// 数据中心集合响应
#[derive(Debug, Deserialize)]
pub(crate) struct DataCenterList {
    #[serde(default)]
    pub data_center: Vec<DataCenter>,
}

/// 主机集合响应
#[derive(Debug, Deserialize)]
pub(crate) struct HostList {
    #[serde(default)]
    pub host: Vec<Host>,
}

/// 存储域集合响应
#[derive(Debug, Deserialize)]
pub(crate) struct StorageDomainList {
    #[serde(default)]
    pub storage_domain: Vec<StorageDomain>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_request_wire_format() {
        let req = AddStorageDomainRequest {
            name: "data1".to_string(),
            kind: DomainType::Data,
            host: HostRef {
                name: "node-1".to_string(),
            },
            storage: Storage {
                kind: StorageBackend::Nfs,
                address: "192.168.1.20".to_string(),
                path: "/exports/data1".to_string(),
            },
        };

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["name"], "data1");
        assert_eq!(json["type"], "data");
        assert_eq!(json["host"]["name"], "node-1");
        assert_eq!(json["storage"]["type"], "nfs");
        assert_eq!(json["storage"]["address"], "192.168.1.20");
        assert_eq!(json["storage"]["path"], "/exports/data1");
    }

    #[test]
    fn test_data_center_list_envelope() {
        let json = r#"{"data_center": [{"id": "dc-1", "name": "Default", "status": "up"}]}"#;
        let list: DataCenterList = serde_json::from_str(json).unwrap();
        assert_eq!(list.data_center.len(), 1);
        assert_eq!(list.data_center[0].name, "Default");
    }

    #[test]
    fn test_empty_envelope_defaults() {
        // 空集合时 Engine 可能省略资源键
        let list: StorageDomainList = serde_json::from_str("{}").unwrap();
        assert!(list.storage_domain.is_empty());
    }

    #[test]
    fn test_storage_domain_without_storage_block() {
        let json = r#"{"id": "sd-1", "name": "iso-domain"}"#;
        let sd: StorageDomain = serde_json::from_str(json).unwrap();
        assert_eq!(sd.name, "iso-domain");
        assert!(sd.storage.is_none());
        assert!(sd.kind.is_none());
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("nfs".parse::<StorageBackend>().unwrap(), StorageBackend::Nfs);
        assert_eq!(
            "glusterfs".parse::<StorageBackend>().unwrap(),
            StorageBackend::Glusterfs
        );
        assert!("iscsi".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_domain_type_from_str() {
        assert_eq!("data".parse::<DomainType>().unwrap(), DomainType::Data);
        assert_eq!("iso".parse::<DomainType>().unwrap(), DomainType::Iso);
        assert_eq!("export".parse::<DomainType>().unwrap(), DomainType::Export);
        assert!("backup".parse::<DomainType>().is_err());
    }

    #[test]
    fn test_enum_display_round_trip() {
        for s in ["nfs", "glusterfs"] {
            assert_eq!(s.parse::<StorageBackend>().unwrap().to_string(), s);
        }
        for s in ["data", "iso", "export"] {
            assert_eq!(s.parse::<DomainType>().unwrap().to_string(), s);
        }
    }
}
