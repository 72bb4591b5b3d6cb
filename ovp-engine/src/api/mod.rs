//! Engine API 模块

pub mod data_center;
pub mod host;
pub mod storage_domain;

pub use data_center::DataCenterApi;
pub use host::HostApi;
pub use storage_domain::StorageDomainApi;

/// 构造按名称精确查找的 search 查询路径
///
/// Engine 的集合查询支持 `?search=name=xxx` 表达式，
/// 表达式需要整体做 URL 编码。
pub(crate) fn search_by_name(collection: &str, name: &str) -> String {
    format!(
        "/{}?search={}",
        collection,
        urlencoding::encode(&format!("name={}", name))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_by_name_encoding() {
        assert_eq!(
            search_by_name("datacenters", "Default"),
            "/datacenters?search=name%3DDefault"
        );
        // 名称中的空格也要编码
        assert_eq!(
            search_by_name("hosts", "node 1"),
            "/hosts?search=name%3Dnode%201"
        );
    }
}
