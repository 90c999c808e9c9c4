//! # Shipalloc
//!
//! 採購訂單 → 貨櫃艙位分配：資料準備、MILP 優化、輸出表

pub mod logging;

use std::io::{Read, Write};
use std::path::Path;

pub use shipalloc_core::{
    AllocError, AllocationRow, Assignment, ContainerSlot, OptimizerConfig, PoLineKey,
    PurchaseOrderLine, Result, RunConfig, UnmetRecord, WeekNumbering,
};
pub use shipalloc_optimizer::{
    carrier_totals, fulfillment_status, AllocationPlan, FulfillmentStatus, GoodLpSolver,
    LineFulfillment, MilpSolver, PlanSummary, ShippingOptimizer,
};
pub use shipalloc_prep::{prepare_from_paths, prepare_from_readers, PreparedInput};

use shipalloc_core::allocation::OUTPUT_COLUMNS;

/// 讀取 JSON 配置；未指定檔案時使用預設值
pub fn load_config(path: Option<&Path>) -> Result<RunConfig> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .map_err(|e| AllocError::Io(format!("{}: {}", path.display(), e)))?;
            RunConfig::from_json(&json)
        }
        None => Ok(RunConfig::default()),
    }
}

/// 對已準備的輸入執行優化
pub fn run_prepared(input: &PreparedInput, config: &RunConfig) -> Result<AllocationPlan> {
    ShippingOptimizer::with_default_solver(config.optimizer.clone())
        .optimize(&input.purchase_orders, &input.slots)
}

/// 由 CSV 讀取器執行完整流程
pub fn run_readers<P: Read, C: Read>(
    po_reader: P,
    capacity_reader: C,
    config: &RunConfig,
) -> Result<AllocationPlan> {
    let input = prepare_from_readers(po_reader, capacity_reader, config.week_numbering)?;
    run_prepared(&input, config)
}

/// 由 CSV 檔案執行完整流程
pub fn run_files(po_path: &Path, capacity_path: &Path, config: &RunConfig) -> Result<AllocationPlan> {
    let input = prepare_from_paths(po_path, capacity_path, config.week_numbering)?;
    run_prepared(&input, config)
}

/// 將輸出表寫成 CSV（表頭固定，即使沒有資料列）
pub fn write_rows_csv<W: Write>(writer: W, rows: &[AllocationRow]) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(OUTPUT_COLUMNS).map_err(csv_error)?;
    for row in rows {
        csv_writer.serialize(row).map_err(csv_error)?;
    }
    csv_writer.flush()?;

    Ok(())
}

fn csv_error(e: csv::Error) -> AllocError {
    AllocError::Csv(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_empty_table_keeps_header() {
        let mut buffer = Vec::new();
        write_rows_csv(&mut buffer, &[]).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let header = text.lines().next().unwrap();
        assert!(header.starts_with("PO Number,PO Line Number,SKU"));
        assert!(header.ends_with("Unmet Qty,COGS Value Unmet,Unmet Penalty"));
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_load_default_config() {
        let config = load_config(None).unwrap();
        assert_eq!(config, RunConfig::default());
    }

    #[test]
    fn test_missing_config_file() {
        let err = load_config(Some(Path::new("/nonexistent/config.json"))).unwrap_err();
        assert!(matches!(err, AllocError::Io(_)));
    }
}
