// 命令列入口
//
// 用法：
//   shipalloc <po.csv> <capacity.csv> [--config <file.json>] [--output <out.csv>]
//
// 未指定 --output 時輸出表寫到 stdout，日誌寫到 stderr。

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{bail, Context};
use shipalloc::{carrier_totals, fulfillment_status, logging, FulfillmentStatus};

const USAGE: &str =
    "用法: shipalloc <po.csv> <capacity.csv> [--config <file.json>] [--output <out.csv>]";

struct CliArgs {
    po_path: PathBuf,
    capacity_path: PathBuf,
    config_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<CliArgs> {
    let mut positional = Vec::new();
    let mut config_path = None;
    let mut output_path = None;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let value = args.next().context("--config 需要檔案路徑")?;
                config_path = Some(PathBuf::from(value));
            }
            "--output" | "-o" => {
                let value = args.next().context("--output 需要檔案路徑")?;
                output_path = Some(PathBuf::from(value));
            }
            "--help" | "-h" => bail!("{}", USAGE),
            flag if flag.starts_with('-') => bail!("未知參數 {}\n{}", flag, USAGE),
            _ => positional.push(PathBuf::from(&arg)),
        }
    }

    let [po_path, capacity_path]: [PathBuf; 2] = positional
        .try_into()
        .map_err(|_| anyhow::anyhow!("需要兩個輸入檔案\n{}", USAGE))?;

    Ok(CliArgs {
        po_path,
        capacity_path,
        config_path,
        output_path,
    })
}

fn main() -> anyhow::Result<()> {
    logging::init();

    let args = parse_args(std::env::args().skip(1))?;
    let config = shipalloc::load_config(args.config_path.as_deref()).context("載入配置失敗")?;

    let plan = shipalloc::run_files(&args.po_path, &args.capacity_path, &config)
        .context("貨櫃分配失敗")?;

    let summary = &plan.summary;
    tracing::info!(run_id = %plan.run_id, "PO 行數: {}", summary.total_po_lines);
    tracing::info!("使用貨櫃: {}", summary.used_containers);
    tracing::info!(
        "分配數量: {}，未滿足數量: {}",
        summary.total_qty_assigned,
        summary.total_qty_unmet
    );
    tracing::info!(
        "COGS 已分配: {}，COGS 未滿足: {}",
        summary.total_cogs_assigned,
        summary.total_cogs_unmet
    );
    tracing::info!(
        "貨櫃成本: {}，遲到罰金: {}，未滿足罰金: {}，預估總成本: {}",
        summary.total_container_cost,
        summary.total_late_penalty,
        summary.total_unmet_penalty,
        summary.estimated_total_cost
    );

    let lines = fulfillment_status(&plan.rows);
    let count = |status: FulfillmentStatus| lines.iter().filter(|l| l.status == status).count();
    tracing::info!(
        "履約狀態: 全部滿足 {}，部分滿足 {}，未滿足 {}",
        count(FulfillmentStatus::FullyMet),
        count(FulfillmentStatus::PartiallyMet),
        count(FulfillmentStatus::Unmet)
    );
    for (carrier, qty) in carrier_totals(&plan.rows) {
        tracing::debug!("承運商 {}: {}", carrier, qty);
    }

    match &args.output_path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("無法建立輸出檔 {}", path.display()))?;
            shipalloc::write_rows_csv(BufWriter::new(file), &plan.rows)?;
            tracing::info!("輸出表已寫入 {}", path.display());
        }
        None => shipalloc::write_rows_csv(io::stdout().lock(), &plan.rows)?,
    }

    Ok(())
}
