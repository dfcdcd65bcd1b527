//! # 重命名清单导出
//!
//! 将两个批次的重命名记录导出为 CSV，便于核对或手工回滚。
//!
//! ## 格式
//! `batch,index,position,from,to,status`，position 为源文件在目录列表中的位置，status 为 `renamed` / `planned` / `failed`
//!
//! ## 依赖关系
//! - 被 `commands/process.rs` 调用
//! - 使用 `batch/runner.rs` 的 InterleaveReport
//! - 使用 `csv` + `serde` 写入 CSV 文件

use super::runner::InterleaveReport;
use crate::error::{DuplexError, Result};
use crate::models::RenameOp;

use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct ManifestRow<'a> {
    batch: &'a str,
    index: usize,
    position: usize,
    from: String,
    to: String,
    status: &'static str,
}

impl<'a> ManifestRow<'a> {
    fn new(batch: &'a str, op: &RenameOp, status: &'static str) -> Self {
        Self {
            batch,
            index: op.index,
            position: op.position,
            from: op.from.display().to_string(),
            to: op.to.display().to_string(),
            status,
        }
    }
}

/// 导出重命名清单，按序号排序
pub fn write_manifest(report: &InterleaveReport, output_path: &Path) -> Result<usize> {
    let mut rows: Vec<ManifestRow> = Vec::new();
    for batch in report.batches() {
        rows.extend(batch.renamed.iter().map(|op| ManifestRow::new(&batch.label, op, "renamed")));
        rows.extend(batch.planned.iter().map(|op| ManifestRow::new(&batch.label, op, "planned")));
        rows.extend(
            batch
                .failures
                .iter()
                .map(|(op, _)| ManifestRow::new(&batch.label, op, "failed")),
        );
    }
    rows.sort_by_key(|r| r.index);

    let mut wtr = csv::Writer::from_path(output_path)?;
    for row in &rows {
        wtr.serialize(row)?;
    }

    wtr.flush().map_err(|e| DuplexError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(rows.len())
}
