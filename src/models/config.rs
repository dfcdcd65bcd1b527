//! # 运行配置
//!
//! 将 `process` 子命令参数整理为经过校验的配置结构，按值传入批次编排器。
//!
//! ## 依赖关系
//! - 使用 `cli/process.rs` 定义的参数
//! - 被 `batch/runner.rs`, `commands/process.rs` 使用
//! - 使用 `chrono` 生成默认前缀，`glob` 解析排除模式

use crate::cli::process::{MismatchPolicy, ProcessArgs};
use crate::error::{DuplexError, Result};

use std::fs;
use std::path::{Path, PathBuf};

/// 批次交错重命名配置
#[derive(Debug, Clone)]
pub struct InterleaveConfig {
    /// 输出文件名前缀
    pub prefix: String,
    /// 第一批（正序，偶数序号）
    pub batch1: PathBuf,
    /// 第二批（逆序，奇数序号）
    pub batch2: PathBuf,
    /// 额外排除模式（DS_Store 总是被排除）
    pub excludes: Vec<glob::Pattern>,
    /// 两批数量不等时的处理策略
    pub on_mismatch: MismatchPolicy,
    /// 允许覆盖已存在的目标文件
    pub overwrite: bool,
    /// 只打印计划，不执行重命名
    pub dry_run: bool,
    /// 关闭进度条和逐文件输出
    pub quiet: bool,
    /// 重命名清单输出路径
    pub manifest: Option<PathBuf>,
}

impl InterleaveConfig {
    /// 使用默认选项创建配置
    pub fn new(prefix: &str, batch1: PathBuf, batch2: PathBuf) -> Result<Self> {
        validate_prefix(prefix)?;
        validate_batches(&batch1, &batch2)?;
        Ok(Self {
            prefix: prefix.to_string(),
            batch1,
            batch2,
            excludes: Vec::new(),
            on_mismatch: MismatchPolicy::Warn,
            overwrite: false,
            dry_run: false,
            quiet: false,
            manifest: None,
        })
    }

    /// 从命令行参数构建
    pub fn from_args(args: ProcessArgs) -> Result<Self> {
        let prefix = args.prefix.unwrap_or_else(default_prefix);
        let mut config = Self::new(&prefix, args.batch1, args.batch2)?
            .with_excludes(args.exclude.as_deref().unwrap_or(""))?
            .with_mismatch_policy(args.on_mismatch)
            .with_overwrite(args.overwrite)
            .with_dry_run(args.dry_run)
            .with_quiet(args.quiet);
        config.manifest = args.manifest;
        Ok(config)
    }

    /// 设置排除模式（逗号分隔的多模式）
    pub fn with_excludes(mut self, patterns: &str) -> Result<Self> {
        self.excludes = patterns
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| {
                glob::Pattern::new(s).map_err(|e| {
                    DuplexError::InvalidArgument(format!("exclude pattern '{}': {}", s, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(self)
    }

    pub fn with_mismatch_policy(mut self, policy: MismatchPolicy) -> Self {
        self.on_mismatch = policy;
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

/// 今天的本地日期 `YYYY-MM-DD`
pub fn default_prefix() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// 前缀不能为空，也不能包含路径分隔符
fn validate_prefix(prefix: &str) -> Result<()> {
    if prefix.trim().is_empty() {
        return Err(DuplexError::InvalidArgument(
            "prefix must not be empty".to_string(),
        ));
    }
    if prefix.contains('/') || prefix.contains('\\') {
        return Err(DuplexError::InvalidArgument(format!(
            "prefix '{}' must not contain a path separator",
            prefix
        )));
    }
    Ok(())
}

/// 两个批次必须是不同的目录，两个任务之间不共享任何路径
fn validate_batches(batch1: &Path, batch2: &Path) -> Result<()> {
    let same = match (fs::canonicalize(batch1), fs::canonicalize(batch2)) {
        (Ok(a), Ok(b)) => a == b,
        _ => batch1 == batch2,
    };
    if same {
        return Err(DuplexError::InvalidArgument(format!(
            "batch1 and batch2 must be different directories: {}",
            batch1.display()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn parse_process(argv: &[&str]) -> ProcessArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Commands::Process(args) => args,
        }
    }

    #[test]
    fn test_default_prefix_format() {
        let prefix = default_prefix();
        assert_eq!(prefix.len(), 10);
        assert!(chrono::NaiveDate::parse_from_str(&prefix, "%Y-%m-%d").is_ok());
    }

    #[test]
    fn test_defaults_from_args() {
        let config = InterleaveConfig::from_args(parse_process(&["duplexpp", "process"])).unwrap();
        assert_eq!(config.prefix, default_prefix());
        assert_eq!(config.batch1, PathBuf::from("./batch1"));
        assert_eq!(config.batch2, PathBuf::from("./batch2"));
        assert_eq!(config.on_mismatch, MismatchPolicy::Warn);
        assert!(config.excludes.is_empty());
        assert!(!config.overwrite);
        assert!(!config.dry_run);
        assert!(config.manifest.is_none());
    }

    #[test]
    fn test_short_flags() {
        let args = parse_process(&[
            "duplexpp", "process", "-p", "scan", "-f", "/in/front", "-s", "/in/back", "-e",
            "*.txt, thumbs.db", "-n",
        ]);
        let config = InterleaveConfig::from_args(args).unwrap();
        assert_eq!(config.prefix, "scan");
        assert_eq!(config.batch1, PathBuf::from("/in/front"));
        assert_eq!(config.batch2, PathBuf::from("/in/back"));
        assert_eq!(config.excludes.len(), 2);
        assert!(config.excludes[0].matches("notes.txt"));
        assert!(config.dry_run);
    }

    #[test]
    fn test_mismatch_policy_flag() {
        let args = parse_process(&["duplexpp", "process", "--on-mismatch", "error"]);
        assert_eq!(args.on_mismatch, MismatchPolicy::Error);
    }

    #[test]
    fn test_invalid_prefix() {
        let (b1, b2) = (PathBuf::from("b1"), PathBuf::from("b2"));
        assert!(InterleaveConfig::new("", b1.clone(), b2.clone()).is_err());
        assert!(InterleaveConfig::new("a/b", b1.clone(), b2.clone()).is_err());
        assert!(InterleaveConfig::new("a\\b", b1, b2).is_err());
    }

    #[test]
    fn test_same_batch_directory_rejected() {
        let root = tempfile::TempDir::new().unwrap();
        let dir = root.path().join("scans");
        let other = root.path().join("other");
        fs::create_dir(&dir).unwrap();
        fs::create_dir(&other).unwrap();

        assert!(matches!(
            InterleaveConfig::new("p", dir.clone(), dir.clone()),
            Err(DuplexError::InvalidArgument(_))
        ));
        // 不同写法指向同一目录
        let alias = other.join("..").join("scans");
        assert!(matches!(
            InterleaveConfig::new("p", dir.clone(), alias),
            Err(DuplexError::InvalidArgument(_))
        ));
        // 不存在的目录按原始路径比较
        let missing = root.path().join("missing");
        assert!(InterleaveConfig::new("p", missing.clone(), missing).is_err());

        assert!(InterleaveConfig::new("p", dir, other).is_ok());
    }

    #[test]
    fn test_same_batch_directory_from_flags() {
        let args = parse_process(&["duplexpp", "process", "-f", "./scans", "-s", "./scans"]);
        assert!(matches!(
            InterleaveConfig::from_args(args),
            Err(DuplexError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_invalid_exclude_pattern() {
        let config = InterleaveConfig::new("p", PathBuf::from("a"), PathBuf::from("b")).unwrap();
        assert!(matches!(
            config.with_excludes("[unclosed"),
            Err(DuplexError::InvalidArgument(_))
        ));
    }
}
