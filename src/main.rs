//! # duplexpp - 双面扫描后处理工具
//!
//! 双面扫描仪分两遍扫描：第一遍按正序得到每张纸的正面，第二遍把整叠纸
//! 翻过来得到逆序的背面。本工具把两个目录中的页面交错重命名为
//! `{prefix}-{index:04}.{ext}` 的连续序列。
//!
//! ## 子命令
//! - `process` - 交错重命名两批页面
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/     (目录快照、序号分配、并行编排)
//!   │     └── models/    (页面模型与运行配置)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&e.detailed());
        std::process::exit(1);
    }
}
