//! # 数据模型模块
//!
//! 定义批次页面、重命名操作和运行配置。
//!
//! ## 依赖关系
//! - 被 `batch/` 和 `commands/` 使用
//! - 子模块: page, config

pub mod config;
pub mod page;

pub use config::InterleaveConfig;
pub use page::{OutputPattern, PageFile, Parity, RenameOp};
