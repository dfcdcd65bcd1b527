//! # 进度条工具
//!
//! 封装 `indicatif` 提供统一的进度条样式。两个批次同时运行，
//! 进度条挂在同一个 `MultiProgress` 下。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 使用
//! - 使用 `indicatif` crate

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

/// 创建进度条容器，`hidden` 时不绘制
pub fn create_multi(hidden: bool) -> MultiProgress {
    if hidden {
        MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
    } else {
        MultiProgress::new()
    }
}

/// 创建标准进度条并挂到容器下
pub fn create_progress_bar(multi: &MultiProgress, len: u64, message: &str) -> ProgressBar {
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
    )
    .map(|s| s.progress_chars("#>-"))
    .unwrap_or_else(|_| ProgressStyle::default_bar());

    let pb = multi.add(ProgressBar::new(len));
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}
