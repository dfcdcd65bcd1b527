//! # 页面数据模型
//!
//! 描述批次中的单个页面文件、奇偶序号分配以及输出文件名规则。
//!
//! ## 输出文件名
//! `{prefix}-{index:04}.{ext}`，序号至少补零到 4 位，扩展名沿用原文件。
//! 原文件无扩展名时不追加点号。
//!
//! ## 依赖关系
//! - 被 `batch/` 和 `commands/process.rs` 使用
//! - 使用 `regex` 识别已经按输出规则命名的文件

use crate::error::{DuplexError, Result};

use regex::Regex;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// 文件名包含该子串的条目不参与编号，原地保留
pub const SKIP_MARKER: &str = "DS_Store";

/// 序号步长（奇偶交错）
pub const INDEX_STEP: usize = 2;

/// 序号奇偶性，同时决定遍历方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    /// 正序遍历，序号 0, 2, 4, ...
    Even,
    /// 逆序遍历，序号 1, 3, 5, ...
    Odd,
}

impl Parity {
    /// 起始序号
    pub fn start(self) -> usize {
        match self {
            Parity::Even => 0,
            Parity::Odd => 1,
        }
    }

    /// 是否逆序遍历目录列表
    pub fn is_reversed(self) -> bool {
        matches!(self, Parity::Odd)
    }

    /// 第 `n` 个（从 0 开始）未跳过条目的输出序号
    pub fn index_at(self, n: usize) -> usize {
        self.start() + n * INDEX_STEP
    }
}

impl std::fmt::Display for Parity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Parity::Even => write!(f, "even"),
            Parity::Odd => write!(f, "odd"),
        }
    }
}

/// 批次目录中的一个条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFile {
    /// 原文件名
    pub name: String,
    /// 完整路径
    pub path: PathBuf,
    /// 在目录列表中的位置（包含被跳过的条目）
    pub position: usize,
}

impl PageFile {
    /// 扩展名（不含点号），保留原始字节
    pub fn extension(&self) -> Option<&OsStr> {
        self.path.extension().filter(|e| !e.is_empty())
    }
}

/// 一次计划中的重命名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOp {
    pub from: PathBuf,
    pub to: PathBuf,
    pub index: usize,
    /// 源文件在目录列表中的位置
    pub position: usize,
}

impl RenameOp {
    /// 源文件名，用于日志
    pub fn source_name(&self) -> String {
        file_name_of(&self.from)
    }

    /// 目标文件名，用于日志
    pub fn target_name(&self) -> String {
        file_name_of(&self.to)
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// 生成输出文件名
///
/// 只使用一个点号分隔扩展名。扩展名按 `OsStr` 原样拼接，非 UTF-8 字节不会被替换。
pub fn output_name(prefix: &str, index: usize, extension: Option<&OsStr>) -> OsString {
    let mut name = OsString::from(format!("{}-{:04}", prefix, index));
    if let Some(ext) = extension.filter(|e| !e.is_empty()) {
        name.push(".");
        name.push(ext);
    }
    name
}

/// 两个批次数量不等时，合并序号区间中未被占用的序号
pub fn index_gaps(even_count: usize, odd_count: usize) -> Vec<usize> {
    // 最后一个被占用的序号 + 1
    let last_plus_one = |parity: Parity, count: usize| {
        if count == 0 {
            0
        } else {
            parity.index_at(count - 1) + 1
        }
    };
    let end = last_plus_one(Parity::Even, even_count).max(last_plus_one(Parity::Odd, odd_count));

    (0..end)
        .filter(|&i| {
            let (parity, count) = if i % INDEX_STEP == 0 {
                (Parity::Even, even_count)
            } else {
                (Parity::Odd, odd_count)
            };
            (i - parity.start()) / INDEX_STEP >= count
        })
        .collect()
}

/// 已按输出规则命名的文件名匹配器
///
/// 用于在重复运行前提示：再次运行不是幂等的。
#[derive(Debug, Clone)]
pub struct OutputPattern {
    regex: Regex,
}

impl OutputPattern {
    pub fn new(prefix: &str) -> Result<Self> {
        let regex = Regex::new(&format!(r"^{}-\d{{4,}}(\.[^.]+)?$", regex::escape(prefix)))
            .map_err(|e| DuplexError::InvalidArgument(format!("prefix '{}': {}", prefix, e)))?;
        Ok(Self { regex })
    }

    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parity_indices() {
        let even: Vec<usize> = (0..4).map(|n| Parity::Even.index_at(n)).collect();
        let odd: Vec<usize> = (0..4).map(|n| Parity::Odd.index_at(n)).collect();
        assert_eq!(even, vec![0, 2, 4, 6]);
        assert_eq!(odd, vec![1, 3, 5, 7]);
        assert!(Parity::Odd.is_reversed());
        assert!(!Parity::Even.is_reversed());
    }

    #[test]
    fn test_output_name_single_dot() {
        let ext = |e: &'static str| Some(OsStr::new(e));
        assert_eq!(output_name("2024-01-01", 0, ext("png")), "2024-01-01-0000.png");
        assert_eq!(output_name("2024-01-01", 13, ext("jpg")), "2024-01-01-0013.jpg");
        assert_eq!(output_name("scan", 12345, ext("tif")), "scan-12345.tif");
    }

    #[test]
    fn test_output_name_without_extension() {
        assert_eq!(output_name("scan", 2, None), "scan-0002");
        assert_eq!(output_name("scan", 2, Some(OsStr::new(""))), "scan-0002");
    }

    #[cfg(unix)]
    #[test]
    fn test_output_name_keeps_non_utf8_extension() {
        use std::os::unix::ffi::{OsStrExt, OsStringExt};

        let page = PageFile {
            name: "scan.t\u{fffd}f".to_string(),
            path: PathBuf::from(OsStr::from_bytes(b"/tmp/batch/scan.t\xfff")),
            position: 0,
        };
        let name = output_name("p", 4, page.extension());
        assert_eq!(name.into_vec(), b"p-0004.t\xfff".to_vec());
    }

    #[test]
    fn test_page_extension() {
        let page = PageFile {
            name: "page.PNG".to_string(),
            path: PathBuf::from("/tmp/batch/page.PNG"),
            position: 0,
        };
        assert_eq!(page.extension(), Some(OsStr::new("PNG")));

        let bare = PageFile {
            name: "README".to_string(),
            path: PathBuf::from("/tmp/batch/README"),
            position: 1,
        };
        assert_eq!(bare.extension(), None);
    }

    #[test]
    fn test_index_gaps() {
        assert!(index_gaps(2, 2).is_empty());
        assert!(index_gaps(0, 0).is_empty());
        // 1 + 3 -> {0} ∪ {1,3,5}
        assert_eq!(index_gaps(1, 3), vec![2, 4]);
        // 3 + 1 -> {0,2,4} ∪ {1}
        assert_eq!(index_gaps(3, 1), vec![3]);
        assert_eq!(index_gaps(0, 2), vec![0, 2]);
        // 偶数批次多一页是正常的单面结尾，不产生空洞
        assert!(index_gaps(3, 2).is_empty());
    }

    #[test]
    fn test_output_pattern() {
        let pattern = OutputPattern::new("2024-01-01").unwrap();
        assert!(pattern.matches("2024-01-01-0000.png"));
        assert!(pattern.matches("2024-01-01-0013"));
        assert!(pattern.matches("2024-01-01-12345.tif"));
        assert!(!pattern.matches("2024-01-01-01.png"));
        assert!(!pattern.matches("scan_001.png"));

        let dotted = OutputPattern::new("a.b").unwrap();
        assert!(dotted.matches("a.b-0001.png"));
        assert!(!dotted.matches("axb-0001.png"));
    }
}
