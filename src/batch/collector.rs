//! # 批次收集器
//!
//! 读取批次目录，生成一次性的目录列表快照。
//!
//! ## 功能
//! - 按文件名升序列出目录下的全部条目（不递归）
//! - 跳过文件名包含 `DS_Store` 的条目及用户指定的排除模式
//! - 记录每个条目在列表中的位置
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 匹配排除模式

use crate::error::{DuplexError, Result};
use crate::models::page::SKIP_MARKER;
use crate::models::PageFile;

use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 目录列表快照
#[derive(Debug, Clone)]
pub struct BatchListing {
    /// 批次目录
    pub dir: PathBuf,
    /// 参与编号的条目，按文件名升序
    pub pages: Vec<PageFile>,
    /// 被跳过的条目，原地保留
    pub skipped: Vec<PathBuf>,
}

impl BatchListing {
    /// 参与编号的条目数
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// 批次收集器
pub struct BatchCollector {
    /// 批次目录
    dir: PathBuf,
    /// 额外排除模式
    excludes: Vec<glob::Pattern>,
}

impl BatchCollector {
    /// 创建新的批次收集器
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            excludes: Vec::new(),
        }
    }

    /// 设置额外排除模式
    pub fn with_excludes(mut self, excludes: &[glob::Pattern]) -> Self {
        self.excludes = excludes.to_vec();
        self
    }

    /// 条目是否被排除
    pub fn is_skipped(&self, name: &str) -> bool {
        name.contains(SKIP_MARKER) || self.excludes.iter().any(|p| p.matches(name))
    }

    /// 读取目录列表快照
    pub fn collect(&self) -> Result<BatchListing> {
        if !self.dir.exists() {
            return Err(DuplexError::DirectoryNotFound {
                path: self.dir.display().to_string(),
            });
        }
        if !self.dir.is_dir() {
            return Err(DuplexError::NotADirectory {
                path: self.dir.display().to_string(),
            });
        }

        let walker = WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        let mut listing = BatchListing {
            dir: self.dir.clone(),
            pages: Vec::new(),
            skipped: Vec::new(),
        };

        for (position, entry) in walker.into_iter().enumerate() {
            let entry = entry.map_err(|e| DuplexError::DirectoryUnreadable {
                path: self.dir.display().to_string(),
                source: e
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::other("filesystem loop detected")),
            })?;

            let name = entry.file_name().to_string_lossy().to_string();
            if self.is_skipped(&name) {
                listing.skipped.push(entry.into_path());
                continue;
            }

            listing.pages.push(PageFile {
                name,
                path: entry.into_path(),
                position,
            });
        }

        Ok(listing)
    }
}
