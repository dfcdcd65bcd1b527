//! # 统一错误处理模块
//!
//! 定义 duplexpp 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use std::error::Error as _;
use thiserror::Error;

/// duplexpp 统一错误类型
#[derive(Error, Debug)]
pub enum DuplexError {
    // ─────────────────────────────────────────────────────────────
    // 目录错误
    // ─────────────────────────────────────────────────────────────
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("Not a directory: {path}")]
    NotADirectory { path: String },

    #[error("Failed to list directory: {path}")]
    DirectoryUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 重命名错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to rename {from} -> {to}")]
    RenameFailed {
        from: String,
        to: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Destination already exists: {path} (use --overwrite to replace it)")]
    DestinationExists { path: String },

    #[error("Batch sizes differ: {even} page(s) in batch1, {odd} in batch2; indices {gaps} would be unused")]
    BatchCountMismatch {
        even: usize,
        odd: usize,
        gaps: String,
    },

    // ─────────────────────────────────────────────────────────────
    // 输出错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // 汇总
    // ─────────────────────────────────────────────────────────────
    #[error("Run incomplete: {failed} rename(s) failed, {unreadable} batch(es) unreadable")]
    IncompleteRun { failed: usize, unreadable: usize },
}

impl DuplexError {
    /// 错误信息连同 source 链一起展开
    pub fn detailed(&self) -> String {
        let mut msg = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            msg.push_str(": ");
            msg.push_str(&cause.to_string());
            source = cause.source();
        }
        msg
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, DuplexError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_detailed_includes_source() {
        let err = DuplexError::RenameFailed {
            from: "a.png".to_string(),
            to: "p-0000.png".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.detailed(), "Failed to rename a.png -> p-0000.png: denied");
    }

    #[test]
    fn test_detailed_without_source() {
        let err = DuplexError::InvalidArgument("empty prefix".to_string());
        assert_eq!(err.detailed(), "Invalid argument: empty prefix");
    }
}
