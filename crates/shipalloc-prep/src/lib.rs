//! # Shipalloc Data Preparation
//!
//! 資料準備：讀取採購訂單與運能表、驗證欄位、換算體積、解析日期、展開艙位

pub mod capacity;
pub mod purchase_order;
pub mod schema;
pub mod table;

use std::io::Read;
use std::path::Path;

use shipalloc_core::{ContainerSlot, PurchaseOrderLine, Result, WeekNumbering};

// Re-export 主要類型
pub use capacity::CapacityLoader;
pub use purchase_order::PurchaseOrderLoader;
pub use table::{RawTable, RowView};

/// 採購訂單表名（錯誤訊息用）
pub const PO_TABLE: &str = "PO";

/// 運能表名（錯誤訊息用）
pub const CAPACITY_TABLE: &str = "Capacity";

/// 準備完成的輸入資料
#[derive(Debug, Clone)]
pub struct PreparedInput {
    /// 採購訂單行
    pub purchase_orders: Vec<PurchaseOrderLine>,

    /// 展開後的艙位
    pub slots: Vec<ContainerSlot>,
}

impl PreparedInput {
    /// 由兩張原始表準備輸入；兩張表的欄位都在轉換任何資料列前檢查
    pub fn from_tables(
        po_table: &RawTable,
        capacity_table: &RawTable,
        week_numbering: WeekNumbering,
    ) -> Result<Self> {
        po_table.require_columns(&schema::required_po_columns())?;
        capacity_table.require_columns(&schema::required_capacity_columns())?;

        let purchase_orders = PurchaseOrderLoader::load(po_table)?;
        let slots = CapacityLoader::new(week_numbering).load(capacity_table)?;

        Ok(Self {
            purchase_orders,
            slots,
        })
    }

    /// 總需求數量
    pub fn total_demand(&self) -> u64 {
        self.purchase_orders.iter().map(|po| u64::from(po.quantity)).sum()
    }
}

/// 由讀取器準備輸入
pub fn prepare_from_readers<P: Read, C: Read>(
    po_reader: P,
    capacity_reader: C,
    week_numbering: WeekNumbering,
) -> Result<PreparedInput> {
    let po_table = RawTable::from_reader(PO_TABLE, po_reader)?;
    let capacity_table = RawTable::from_reader(CAPACITY_TABLE, capacity_reader)?;
    PreparedInput::from_tables(&po_table, &capacity_table, week_numbering)
}

/// 由檔案路徑準備輸入
pub fn prepare_from_paths(
    po_path: &Path,
    capacity_path: &Path,
    week_numbering: WeekNumbering,
) -> Result<PreparedInput> {
    tracing::info!(
        "讀取輸入：採購訂單 {}，運能 {}",
        po_path.display(),
        capacity_path.display()
    );

    let po_table = RawTable::from_path(PO_TABLE, po_path)?;
    let capacity_table = RawTable::from_path(CAPACITY_TABLE, capacity_path)?;
    PreparedInput::from_tables(&po_table, &capacity_table, week_numbering)
}
