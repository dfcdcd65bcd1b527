//! # process 子命令 CLI 定义
//!
//! 将双面扫描的两批页面交错重命名为一个连续序列
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/process.rs`

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 两批页面数量不等时的处理策略
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum MismatchPolicy {
    /// Print a warning and accept the index gaps
    Warn,
    /// Refuse to rename anything
    Error,
    /// Accept the index gaps silently
    Ignore,
}

impl std::fmt::Display for MismatchPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MismatchPolicy::Warn => write!(f, "warn"),
            MismatchPolicy::Error => write!(f, "error"),
            MismatchPolicy::Ignore => write!(f, "ignore"),
        }
    }
}

/// process 子命令参数
#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Filename prefix (default: today's date as YYYY-MM-DD)
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// First batch: front sides, scanned in page order
    #[arg(short = 'f', long, default_value = "./batch1")]
    pub batch1: PathBuf,

    /// Second batch: back sides, scanned in reverse page order
    #[arg(short = 's', long, default_value = "./batch2")]
    pub batch2: PathBuf,

    /// Extra comma separated glob patterns to leave untouched
    #[arg(short, long)]
    pub exclude: Option<String>,

    /// What to do when the page counts leave unused output indices
    #[arg(long, value_enum, default_value_t = MismatchPolicy::Warn)]
    pub on_mismatch: MismatchPolicy,

    /// Replace existing files that already carry a destination name
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,

    /// Print the renames without performing them
    #[arg(short = 'n', long, default_value_t = false)]
    pub dry_run: bool,

    /// Write a CSV manifest of every rename
    #[arg(short, long)]
    pub manifest: Option<PathBuf>,

    /// Hide progress bars and per-file output
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,
}
