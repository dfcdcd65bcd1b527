//! # process 命令实现
//!
//! 交错重命名双面扫描的两批页面。
//!
//! ## 功能
//! - 校验参数并生成运行配置
//! - 并行处理两个批次（第一批正序偶数序号，第二批逆序奇数序号）
//! - 打印汇总表格，可选导出 CSV 清单
//! - 有任何失败时返回错误（非零退出码）
//!
//! ## 依赖关系
//! - 使用 `cli/process.rs` 定义的参数
//! - 使用 `batch/`, `models/`
//! - 使用 `utils/output.rs`

use crate::batch::{manifest, BatchInterleaver, InterleaveReport};
use crate::cli::process::ProcessArgs;
use crate::error::{DuplexError, Result};
use crate::models::InterleaveConfig;
use crate::utils::output;

use tabled::{Table, Tabled};

/// 执行 process 命令
pub fn execute(args: ProcessArgs) -> Result<()> {
    output::print_header("Duplex Scan Postprocessing");

    let config = InterleaveConfig::from_args(args)?;

    output::print_info(&format!("Prefix: {}", config.prefix));
    output::print_info(&format!(
        "Batch 1 (even indices): {}",
        config.batch1.display()
    ));
    output::print_info(&format!(
        "Batch 2 (odd indices, reversed): {}",
        config.batch2.display()
    ));
    if config.dry_run {
        output::print_warning("Dry run: no files will be renamed");
    }

    let report = BatchInterleaver::new(config.clone()).run()?;

    print_summary(&report);

    if let Some(ref path) = config.manifest {
        let rows = manifest::write_manifest(&report, path)?;
        output::print_success(&format!(
            "Manifest with {} row(s) saved to '{}'",
            rows,
            path.display()
        ));
    }

    if !report.is_clean() {
        return Err(DuplexError::IncompleteRun {
            failed: report.failed(),
            unreadable: report.unreadable(),
        });
    }

    let verb = if config.dry_run { "Planned" } else { "Renamed" };
    let count: usize = report
        .batches()
        .iter()
        .map(|b| b.renamed.len() + b.planned.len())
        .sum();
    output::print_done(&format!("{} {} page(s) with prefix '{}'", verb, count, config.prefix));

    Ok(())
}

/// 打印批次汇总表格
fn print_summary(report: &InterleaveReport) {
    #[derive(Tabled)]
    struct SummaryRow {
        #[tabled(rename = "Batch")]
        batch: String,
        #[tabled(rename = "Indices")]
        parity: String,
        #[tabled(rename = "Directory")]
        dir: String,
        #[tabled(rename = "Renamed")]
        renamed: usize,
        #[tabled(rename = "Planned")]
        planned: usize,
        #[tabled(rename = "Skipped")]
        skipped: usize,
        #[tabled(rename = "Failed")]
        failed: String,
    }

    let rows: Vec<SummaryRow> = report
        .batches()
        .iter()
        .map(|b| SummaryRow {
            batch: b.label.clone(),
            parity: b.parity.to_string(),
            dir: b.dir.display().to_string(),
            renamed: b.renamed.len(),
            planned: b.planned.len(),
            skipped: b.skipped.len(),
            failed: match b.listing_error {
                Some(_) => "unreadable".to_string(),
                None => b.failed().to_string(),
            },
        })
        .collect();

    output::print_header("Summary");
    println!("{}", Table::new(&rows));
}
