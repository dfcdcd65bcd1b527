//! # 批次编排器
//!
//! 同时运行两个批次的序号分配器并汇总结果。
//!
//! ## 功能
//! - 读取两个批次的目录快照，检查页数是否一致
//! - 基于 `rayon::join` 的二路并行（fork-join）
//! - 进度条显示
//! - 错误收集与汇总报告
//!
//! ## 依赖关系
//! - 被 `commands/process.rs` 调用
//! - 使用 `batch/collector.rs`, `batch/assigner.rs`
//! - 使用 `utils/progress.rs` 创建进度条

use super::assigner::Assigner;
use super::collector::{BatchCollector, BatchListing};
use crate::cli::process::MismatchPolicy;
use crate::error::{DuplexError, Result};
use crate::models::page::index_gaps;
use crate::models::{InterleaveConfig, OutputPattern, Parity, RenameOp};
use crate::utils::{output, progress};

use indicatif::MultiProgress;
use std::path::{Path, PathBuf};

/// 单个文件处理结果
#[derive(Debug, Clone)]
pub enum ProcessResult {
    /// 已重命名
    Renamed(RenameOp),
    /// 仅计划（dry-run）
    Planned(RenameOp),
    /// 处理失败
    Failed(RenameOp, String), // (重命名操作, 错误信息)
}

/// 单个批次的处理结果统计
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// 批次名称（batch1 / batch2）
    pub label: String,
    pub parity: Parity,
    pub dir: PathBuf,
    pub renamed: Vec<RenameOp>,
    pub planned: Vec<RenameOp>,
    pub skipped: Vec<PathBuf>,
    /// 失败详情
    pub failures: Vec<(RenameOp, String)>,
    /// 目录无法读取时的错误信息
    pub listing_error: Option<String>,
}

impl BatchReport {
    pub fn new(label: &str, parity: Parity, dir: &Path) -> Self {
        Self {
            label: label.to_string(),
            parity,
            dir: dir.to_path_buf(),
            renamed: Vec::new(),
            planned: Vec::new(),
            skipped: Vec::new(),
            failures: Vec::new(),
            listing_error: None,
        }
    }

    /// 目录无法读取的批次
    pub fn unreadable(label: &str, parity: Parity, dir: &Path, error: String) -> Self {
        let mut report = Self::new(label, parity, dir);
        report.listing_error = Some(error);
        report
    }

    /// 合并处理结果
    pub fn merge(&mut self, result: ProcessResult) {
        match result {
            ProcessResult::Renamed(op) => self.renamed.push(op),
            ProcessResult::Planned(op) => self.planned.push(op),
            ProcessResult::Failed(op, err) => self.failures.push((op, err)),
        }
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// 参与编号的条目总数
    pub fn total(&self) -> usize {
        self.renamed.len() + self.planned.len() + self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.listing_error.is_none()
    }
}

/// 两个批次的汇总结果
#[derive(Debug, Clone)]
pub struct InterleaveReport {
    pub even: BatchReport,
    pub odd: BatchReport,
}

impl InterleaveReport {
    pub fn batches(&self) -> [&BatchReport; 2] {
        [&self.even, &self.odd]
    }

    /// 重命名失败总数
    pub fn failed(&self) -> usize {
        self.batches().iter().map(|b| b.failed()).sum()
    }

    /// 无法读取的批次数
    pub fn unreadable(&self) -> usize {
        self.batches()
            .iter()
            .filter(|b| b.listing_error.is_some())
            .count()
    }

    pub fn is_clean(&self) -> bool {
        self.even.is_clean() && self.odd.is_clean()
    }
}

/// 批次编排器
pub struct BatchInterleaver {
    config: InterleaveConfig,
}

impl BatchInterleaver {
    /// 创建新的批次编排器
    pub fn new(config: InterleaveConfig) -> Self {
        Self { config }
    }

    /// 运行两个批次，两者都结束后返回
    ///
    /// 只有页数不等且策略为 `error` 时在重命名前返回错误；
    /// 其余问题都记录在报告中。
    pub fn run(&self) -> Result<InterleaveReport> {
        let even_listing = self.collect(&self.config.batch1);
        let odd_listing = self.collect(&self.config.batch2);

        if let (Ok(even), Ok(odd)) = (&even_listing, &odd_listing) {
            let warnings = self.preflight(even, odd)?;
            if !self.config.quiet {
                for warning in &warnings {
                    output::print_warning(warning);
                }
            }
        }

        let multi = progress::create_multi(self.config.quiet);

        let (even, odd) = rayon::join(
            || self.run_batch(Parity::Even, "batch1", &self.config.batch1, even_listing, &multi),
            || self.run_batch(Parity::Odd, "batch2", &self.config.batch2, odd_listing, &multi),
        );

        Ok(InterleaveReport { even, odd })
    }

    fn collect(&self, dir: &Path) -> Result<BatchListing> {
        BatchCollector::new(dir)
            .with_excludes(&self.config.excludes)
            .collect()
    }

    /// 重命名前的检查，返回需要提示的警告
    ///
    /// `error` 策略下页数不一致直接返回错误，与 `quiet` 无关。
    fn preflight(&self, even: &BatchListing, odd: &BatchListing) -> Result<Vec<String>> {
        let mut warnings = Vec::new();
        warnings.extend(self.check_counts(even, odd)?);
        warnings.extend(self.check_already_renamed(&[("batch1", even), ("batch2", odd)])?);
        Ok(warnings)
    }

    /// 按策略处理页数不一致
    ///
    /// 只有出现未占用序号时才算不一致：偶数批次多一页是正常的单面结尾。
    fn check_counts(&self, even: &BatchListing, odd: &BatchListing) -> Result<Option<String>> {
        let gaps = index_gaps(even.len(), odd.len());
        if gaps.is_empty() {
            return Ok(None);
        }

        let gaps_text = gaps
            .iter()
            .map(|g| g.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        match self.config.on_mismatch {
            MismatchPolicy::Error => Err(DuplexError::BatchCountMismatch {
                even: even.len(),
                odd: odd.len(),
                gaps: gaps_text,
            }),
            MismatchPolicy::Warn => Ok(Some(format!(
                "Batch sizes differ: {} page(s) in batch1, {} in batch2; unused indices: {}",
                even.len(),
                odd.len(),
                gaps_text
            ))),
            MismatchPolicy::Ignore => Ok(None),
        }
    }

    /// 已经按输出规则命名的条目，再次运行会改变页序
    fn check_already_renamed(&self, listings: &[(&str, &BatchListing)]) -> Result<Vec<String>> {
        let pattern = OutputPattern::new(&self.config.prefix)?;
        let warnings = listings
            .iter()
            .filter_map(|(label, listing)| {
                let count = listing
                    .pages
                    .iter()
                    .filter(|p| pattern.matches(&p.name))
                    .count();
                (count > 0).then(|| {
                    format!(
                        "{}: {} file(s) already named '{}-NNNN'; renaming is not idempotent",
                        label, count, self.config.prefix
                    )
                })
            })
            .collect();
        Ok(warnings)
    }

    fn run_batch(
        &self,
        parity: Parity,
        label: &str,
        dir: &Path,
        listing: Result<BatchListing>,
        multi: &MultiProgress,
    ) -> BatchReport {
        let listing = match listing {
            Ok(listing) => listing,
            Err(e) => {
                let reason = e.detailed();
                output::print_error(&format!("{}: {}", label, reason));
                return BatchReport::unreadable(label, parity, dir, reason);
            }
        };

        if listing.is_empty() && !self.config.quiet {
            output::print_warning(&format!("{}: no pages found in {}", label, dir.display()));
        }

        let pb = progress::create_progress_bar(multi, listing.len() as u64, label);

        let report = Assigner::new(parity, &self.config.prefix)
            .overwrite(self.config.overwrite)
            .dry_run(self.config.dry_run)
            .quiet(self.config.quiet)
            .apply(label, &listing, &pb);

        pb.finish_and_clear();
        report
    }
}
