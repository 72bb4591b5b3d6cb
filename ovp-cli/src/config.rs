//! CLI 配置管理
//!
//! **数据存储方式**: TOML 文件 (~/.config/ovp/config.toml)
//!
//! 配置文件只承载 Engine 连接参数的默认值，命令行参数优先于
//! 配置文件，两者都缺省时使用内置默认值。

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// CLI 配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Engine 连接配置
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<EngineSection>,
}

/// Engine 连接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSection {
    /// Engine 地址 (如 https://engine.example.com)
    pub url: String,

    /// API 用户名
    #[serde(default = "default_username")]
    pub username: String,

    /// API 密码
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// 是否验证 SSL 证书
    #[serde(default)]
    pub verify_ssl: bool,

    /// 请求超时（秒）
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// 连接超时（秒）
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
}

/// 解析后的 Engine 连接参数
#[derive(Debug, Clone)]
pub struct EngineConnection {
    pub url: String,
    pub username: String,
    pub password: String,
    pub verify_ssl: bool,
    pub timeout: u64,
    pub connect_timeout: u64,
}

fn default_username() -> String {
    "admin@internal".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_connect_timeout() -> u64 {
    10
}

impl CliConfig {
    /// 获取配置文件路径
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("无法获取用户主目录")?;
        Ok(home.join(".config").join("ovp").join("config.toml"))
    }

    /// 加载默认路径下的配置，文件不存在时返回空配置
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// 从指定路径加载配置
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {:?}", path))?;

        toml::from_str(&content).with_context(|| format!("解析配置文件失败: {:?}", path))
    }

    /// 合并命令行参数和配置文件，得到完整的连接参数
    ///
    /// 优先级: 命令行参数 > 配置文件 > 内置默认值。
    /// `url` 和 `password` 没有默认值，两处都缺省时报错。
    pub fn resolve_connection(
        &self,
        url: Option<&str>,
        username: Option<&str>,
        password: Option<&str>,
        timeout: Option<u64>,
        verify_ssl: bool,
    ) -> Result<EngineConnection> {
        let engine = self.engine.as_ref();

        let url = url
            .map(str::to_string)
            .or_else(|| engine.map(|e| e.url.clone()))
            .context("缺少 Engine 地址: 使用 --url 或在配置文件 [engine] 中设置 url")?;

        let username = username
            .map(str::to_string)
            .or_else(|| engine.map(|e| e.username.clone()))
            .unwrap_or_else(default_username);

        let password = password
            .map(str::to_string)
            .or_else(|| engine.and_then(|e| e.password.clone()))
            .context("缺少 Engine 密码: 使用 --password 或在配置文件 [engine] 中设置 password")?;

        let timeout = timeout
            .or_else(|| engine.map(|e| e.timeout))
            .unwrap_or_else(default_timeout);

        // 命令行 --verify-ssl 只能开启校验，关闭由配置文件控制
        let verify_ssl = verify_ssl || engine.map(|e| e.verify_ssl).unwrap_or(false);

        let connect_timeout = engine
            .map(|e| e.connect_timeout)
            .unwrap_or_else(default_connect_timeout);

        Ok(EngineConnection {
            url,
            username,
            password,
            verify_ssl,
            timeout,
            connect_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert!(config.engine.is_none());
    }

    #[test]
    fn test_parse_config_with_defaults() {
        let config: CliConfig = toml::from_str(
            r#"
            [engine]
            url = "https://engine.example.com"
            password = "secret"
            "#,
        )
        .unwrap();

        let engine = config.engine.unwrap();
        assert_eq!(engine.url, "https://engine.example.com");
        assert_eq!(engine.username, "admin@internal");
        assert_eq!(engine.timeout, 60);
        assert_eq!(engine.connect_timeout, 10);
        assert!(!engine.verify_ssl);
    }

    #[test]
    fn test_resolve_args_override_config() {
        let config: CliConfig = toml::from_str(
            r#"
            [engine]
            url = "https://engine.example.com"
            username = "user@internal"
            password = "from-config"
            timeout = 30
            "#,
        )
        .unwrap();

        let conn = config
            .resolve_connection(
                Some("https://other.example.com"),
                None,
                Some("from-args"),
                None,
                false,
            )
            .unwrap();

        assert_eq!(conn.url, "https://other.example.com");
        assert_eq!(conn.username, "user@internal");
        assert_eq!(conn.password, "from-args");
        assert_eq!(conn.timeout, 30);
        assert!(!conn.verify_ssl);
    }

    #[test]
    fn test_resolve_without_config_file() {
        let config = CliConfig::default();

        let conn = config
            .resolve_connection(
                Some("https://engine.example.com"),
                None,
                Some("secret"),
                Some(120),
                true,
            )
            .unwrap();

        assert_eq!(conn.username, "admin@internal");
        assert_eq!(conn.timeout, 120);
        assert_eq!(conn.connect_timeout, 10);
        assert!(conn.verify_ssl);
    }

    #[test]
    fn test_resolve_missing_url() {
        let config = CliConfig::default();
        let result = config.resolve_connection(None, None, Some("secret"), None, false);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_missing_password() {
        let config = CliConfig::default();
        let result =
            config.resolve_connection(Some("https://engine.example.com"), None, None, None, false);
        assert!(result.is_err());
    }
}
