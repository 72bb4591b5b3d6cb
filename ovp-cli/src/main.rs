//! OVP CLI 应用

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::{info, Level};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "ovp")]
#[command(about = "OVP - oVirt 存储域置备工具", long_about = None)]
#[command(version)]
struct Cli {
    /// 日志级别
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 存储域管理
    Storage {
        #[command(subcommand)]
        action: StorageAction,
    },
}

/// Engine 连接参数（命令行优先于配置文件）
#[derive(Args)]
pub struct ConnectionArgs {
    /// Engine 地址 (如 https://engine.example.com)
    #[arg(long)]
    pub url: Option<String>,

    /// API 用户名
    #[arg(long)]
    pub username: Option<String>,

    /// API 密码
    #[arg(long)]
    pub password: Option<String>,

    /// 请求超时（秒）
    #[arg(long)]
    pub timeout: Option<u64>,

    /// 验证 SSL 证书（默认关闭）
    #[arg(long)]
    pub verify_ssl: bool,

    /// 配置文件路径（默认 ~/.config/ovp/config.toml）
    #[arg(short, long)]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum StorageAction {
    /// 创建存储域并挂载到数据中心（幂等）
    Create {
        /// 存储域名称
        #[arg(long)]
        name: String,

        /// 数据中心名称
        #[arg(long, default_value = "Default")]
        datacenter: String,

        /// 执行挂载操作的主机名称
        #[arg(long, default_value = "Default")]
        host: String,

        /// 存储导出路径
        #[arg(long)]
        path: String,

        /// 存储后端类型 (nfs/glusterfs)
        #[arg(long = "type", default_value = "nfs")]
        backend: String,

        /// 存储域用途 (data/iso/export)
        #[arg(long, default_value = "data")]
        domain_type: String,

        /// 存储服务器地址
        #[arg(long)]
        address: String,

        /// 预览模式，不执行实际操作
        #[arg(long)]
        dry_run: bool,

        #[command(flatten)]
        conn: ConnectionArgs,
    },

    /// 列出存储域
    List {
        /// 只列出该数据中心已挂载的存储域
        #[arg(long)]
        datacenter: Option<String>,

        /// 输出格式 (table/json)
        #[arg(short = 'f', long, default_value = "table")]
        format: String,

        #[command(flatten)]
        conn: ConnectionArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志（写到 stderr，stdout 只输出结构化结果）
    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    info!("OVP CLI 启动");

    // 处理命令
    match cli.command {
        Commands::Storage { action } => commands::storage::handle(action).await?,
    }

    Ok(())
}
