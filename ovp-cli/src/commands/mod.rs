//! CLI 命令处理模块

pub mod common; // 公共工具函数
pub mod output; // 通用输出格式化
pub mod storage; // 存储域管理
