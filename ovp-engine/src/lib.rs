//! oVirt Engine API 客户端
//!
//! 提供与 oVirt/RHEV Engine 管理 REST API 交互的客户端实现，
//! 仅覆盖存储域置备所需的 API 子集。
//!
//! # 功能
//!
//! - **会话管理** (`EngineClient`): SSO 密码授权登录、Bearer 令牌请求
//! - **数据中心** (`DataCenterApi`): 按名称查询、已挂载存储域查询、存储域挂载
//! - **主机** (`HostApi`): 按名称查询
//! - **存储域** (`StorageDomainApi`): 查询、创建（NFS / GlusterFS 后端）
//!
//! # 示例
//!
//! ```ignore
//! use ovp_engine::{
//!     AddStorageDomainRequest, DomainType, EngineClient, EngineConfig, HostRef, Storage,
//!     StorageBackend,
//! };
//!
//! // 创建客户端并登录
//! let mut client = EngineClient::new("https://engine.example.com", EngineConfig::default())?;
//! client.login("admin@internal", "password").await?;
//!
//! // 查询数据中心
//! let dc = client.data_center().get_by_name("Default").await?;
//!
//! // 创建存储域并挂载
//! let request = AddStorageDomainRequest {
//!     name: "data1".into(),
//!     kind: DomainType::Data,
//!     host: HostRef { name: "node-1".into() },
//!     storage: Storage {
//!         kind: StorageBackend::Nfs,
//!         address: "192.168.1.20".into(),
//!         path: "/exports/data1".into(),
//!     },
//! };
//! let sd = client.storage_domain().add(&request).await?;
//! client.data_center().attach_storage_domain(&dc.id, &sd.id).await?;
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod models;

pub use client::{EngineClient, EngineConfig};
pub use error::{EngineError, Result};

// 导出 API 模块
pub use api::{DataCenterApi, HostApi, StorageDomainApi};

// 导出数据模型
pub use models::{
    AddStorageDomainRequest, DataCenter, DomainStorage, DomainType, Host, HostRef, Storage,
    StorageBackend, StorageDomain, StorageDomainRef,
};
