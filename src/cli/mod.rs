//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `process`: 交错重命名双面扫描的两批页面
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: process

pub mod process;

use clap::{Parser, Subcommand};

/// duplexpp - 双面扫描后处理工具
#[derive(Parser)]
#[command(name = "duplexpp")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Duplex scan postprocessor: interleave and rename two page batches", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Run the duplex scan postprocessor on two batch directories
    Process(process::ProcessArgs),
}
