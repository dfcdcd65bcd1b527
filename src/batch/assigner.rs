//! # 序号分配器
//!
//! 对一个批次的目录快照按奇偶性分配输出序号，并依次执行重命名。
//!
//! - 偶数批次：正序遍历，序号 0, 2, 4, ...
//! - 奇数批次：逆序遍历，序号 1, 3, 5, ...
//!
//! 批次内部按顺序逐个重命名，不并行。dry-run 在目录快照上模拟同样的
//! 目标检查，计划与实际运行的失败一致。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 调用
//! - 使用 `models/page.rs` 的命名规则
//! - 使用 `utils/output.rs` 输出逐文件日志

use super::collector::BatchListing;
use super::runner::{BatchReport, ProcessResult};
use crate::error::{DuplexError, Result};
use crate::models::page::output_name;
use crate::models::{PageFile, Parity, RenameOp};
use crate::utils::output;

use indicatif::ProgressBar;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

/// 单个批次的序号分配器
#[derive(Debug, Clone)]
pub struct Assigner<'a> {
    parity: Parity,
    prefix: &'a str,
    overwrite: bool,
    dry_run: bool,
    quiet: bool,
}

impl<'a> Assigner<'a> {
    pub fn new(parity: Parity, prefix: &'a str) -> Self {
        Self {
            parity,
            prefix,
            overwrite: false,
            dry_run: false,
            quiet: false,
        }
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// 惰性生成重命名计划
    pub fn plan<'l>(&'l self, listing: &'l BatchListing) -> impl Iterator<Item = RenameOp> + 'l {
        let ordered: Box<dyn Iterator<Item = &'l PageFile> + 'l> = if self.parity.is_reversed() {
            Box::new(listing.pages.iter().rev())
        } else {
            Box::new(listing.pages.iter())
        };

        ordered.enumerate().map(move |(n, page)| {
            let index = self.parity.index_at(n);
            let name = output_name(self.prefix, index, page.extension());
            RenameOp {
                from: page.path.clone(),
                to: listing.dir.join(name),
                index,
                position: page.position,
            }
        })
    }

    /// 按计划顺序执行重命名，单个失败不影响后续文件
    pub fn apply(&self, label: &str, listing: &BatchListing, pb: &ProgressBar) -> BatchReport {
        let mut report = BatchReport::new(label, self.parity, &listing.dir);

        for skipped in &listing.skipped {
            if !self.quiet {
                pb.suspend(|| {
                    output::print_skip(&format!("{}: {}", label, skipped.display()));
                });
            }
            report.skipped.push(skipped.clone());
        }

        // dry-run 用：快照中当前被占用的路径
        let mut occupied: HashSet<PathBuf> = listing
            .pages
            .iter()
            .map(|p| p.path.clone())
            .chain(listing.skipped.iter().cloned())
            .collect();

        for op in self.plan(listing) {
            let result = if self.dry_run {
                match self.simulate(&op, &mut occupied) {
                    Ok(()) => ProcessResult::Planned(op),
                    Err(e) => ProcessResult::Failed(op, e.detailed()),
                }
            } else {
                match self.rename(&op) {
                    Ok(()) => ProcessResult::Renamed(op),
                    Err(e) => ProcessResult::Failed(op, e.detailed()),
                }
            };

            match &result {
                ProcessResult::Renamed(op) | ProcessResult::Planned(op) => {
                    if !self.quiet {
                        let planned = matches!(result, ProcessResult::Planned(_));
                        pb.suspend(|| output::print_rename(&op.source_name(), &op.target_name(), planned));
                    }
                }
                ProcessResult::Failed(_, reason) => {
                    pb.suspend(|| output::print_error(&format!("{}: {}", label, reason)));
                }
            }

            report.merge(result);
            pb.inc(1);
        }

        report
    }

    /// 在快照上模拟单个重命名
    fn simulate(&self, op: &RenameOp, occupied: &mut HashSet<PathBuf>) -> Result<()> {
        if op.from == op.to {
            return Ok(());
        }

        if !self.overwrite && occupied.contains(&op.to) {
            return Err(DuplexError::DestinationExists {
                path: op.to.display().to_string(),
            });
        }

        occupied.remove(&op.from);
        occupied.insert(op.to.clone());
        Ok(())
    }

    /// 执行单个重命名
    fn rename(&self, op: &RenameOp) -> Result<()> {
        if op.from == op.to {
            return Ok(());
        }

        if !self.overwrite && fs::symlink_metadata(&op.to).is_ok() {
            return Err(DuplexError::DestinationExists {
                path: op.to.display().to_string(),
            });
        }

        fs::rename(&op.from, &op.to).map_err(|e| DuplexError::RenameFailed {
            from: op.from.display().to_string(),
            to: op.to.display().to_string(),
            source: e,
        })
    }
}
