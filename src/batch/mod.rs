//! # 批量处理模块
//!
//! 双面扫描两批页面的交错重命名。
//!
//! ## 功能
//! - 读取批次目录快照（跳过 DS_Store）
//! - 奇偶序号分配与重命名
//! - 两个批次并行处理
//! - 结果汇总与清单导出
//!
//! ## 依赖关系
//! - 被 `commands/process.rs` 使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod assigner;
pub mod collector;
pub mod manifest;
pub mod runner;

pub use runner::{BatchInterleaver, InterleaveReport};
