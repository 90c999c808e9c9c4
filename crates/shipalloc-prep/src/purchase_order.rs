//! 採購訂單表載入

use std::collections::HashSet;

use shipalloc_core::{PurchaseOrderLine, Result};

use crate::schema::*;
use crate::table::RawTable;

/// 採購訂單載入器
pub struct PurchaseOrderLoader;

impl PurchaseOrderLoader {
    /// 驗證欄位並轉換為採購訂單行
    ///
    /// 先檢查所有必要欄位（缺少時一次列出），再逐列轉換；任何一列失敗即中止。
    pub fn load(table: &RawTable) -> Result<Vec<PurchaseOrderLine>> {
        table.require_columns(&required_po_columns())?;

        let mut lines = Vec::with_capacity(table.len());
        let mut seen = HashSet::new();

        for row in table.rows() {
            let line = PurchaseOrderLine::new(
                row.required_string(PO_NUMBER)?,
                row.u32(PO_LINE_NUMBER)?,
                row.required_string(FROM_PORT)?,
                row.required_string(TO_PORT)?,
                row.dmy_date(EXPORT_ETA)?,
                row.dmy_date(IMPORT_ETA)?,
                row.u32(TO_BE_SHIPPED_QUANTITY)?,
            )
            .with_product(
                row.string(SKU)?,
                row.string(PRODUCT_NAME)?,
                row.string(PRODUCT_FAMILY)?,
                row.flag(IS_ELECTRONIC)?,
            )
            .with_cogs(row.non_negative_decimal(COGS)?)
            .with_dimensions_cm(
                row.non_negative_f64(LENGTH_CM)?,
                row.non_negative_f64(WIDTH_CM)?,
                row.non_negative_f64(HEIGHT_CM)?,
            )
            .with_weight_kg(row.non_negative_f64(WEIGHT_KG)?)
            .with_priority_level(row.u32(PRIORITY_LEVEL)?)
            .with_unmet_penalty(row.non_negative_decimal(UNMET_PENALTY)?);

            if !seen.insert(line.key()) {
                tracing::warn!("第 {} 行: PO 行 {} 重複出現，將視為獨立需求", row.line(), line.key());
            }

            lines.push(line);
        }

        tracing::info!("載入採購訂單行 {} 筆", lines.len());

        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use shipalloc_core::AllocError;

    const HEADER: &str = "PO Number,PO Line Number,SKU,Product Name,Product Family,IsElectronic,COGS,From Port,To Port,Export ETA,Import ETA,To Be Shipped Quantity,Length (cm),Width (cm),Height (cm),Weight (kg),Priority Level,Unmet Penalty";

    fn table(body: &str) -> RawTable {
        RawTable::from_reader("PO", format!("{HEADER}\n{body}").as_bytes()).unwrap()
    }

    #[test]
    fn test_load_po_lines() {
        let table = table(
            "PO001,1,SKU1001,Smartphone X,Electronics,1,250,HK,LA,15/06/2025,25/06/2025,10,100,50,40,12.5,2,1000\n\
             PO001,2,SKU1002,Cable,Accessories,0,5.5,HK,NY,16/06/2025,30/06/2025,0,10,10,10,0.1,0,3\n",
        );

        let lines = PurchaseOrderLoader::load(&table).unwrap();

        assert_eq!(lines.len(), 2);
        let first = &lines[0];
        assert_eq!(first.po_number, "PO001");
        assert_eq!(first.line_number, 1);
        assert!(first.is_electronic);
        assert_eq!(first.cogs, Decimal::from(250));
        assert_eq!(first.export_eta, NaiveDate::from_ymd_opt(2025, 6, 15).unwrap());
        assert_eq!(first.import_eta, NaiveDate::from_ymd_opt(2025, 6, 25).unwrap());
        assert_eq!(first.quantity, 10);
        assert!((first.volume_m3 - 0.2).abs() < 1e-12);
        assert_eq!(first.weight_kg, 12.5);
        assert_eq!(first.priority_level, 2);
        assert_eq!(first.unmet_penalty, Decimal::from(1000));

        assert_eq!(lines[1].quantity, 0);
        assert_eq!(lines[1].cogs, Decimal::new(55, 1));
    }

    #[test]
    fn test_missing_columns_fail_before_rows() {
        let table = RawTable::from_reader(
            "PO",
            "PO Number,PO Line Number,SKU\nPO1,not-a-number,X\n".as_bytes(),
        )
        .unwrap();

        match PurchaseOrderLoader::load(&table).unwrap_err() {
            AllocError::MissingColumns { table, columns } => {
                assert_eq!(table, "PO");
                assert_eq!(columns.len(), 15);
                assert!(columns.contains(&"Export ETA".to_string()));
                assert!(columns.contains(&"Unmet Penalty".to_string()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unparseable_date_fails_fast() {
        let table = table(
            "PO001,1,SKU,Name,Fam,0,1,HK,LA,2025-06-15,25/06/2025,10,1,1,1,1,0,1\n",
        );

        match PurchaseOrderLoader::load(&table).unwrap_err() {
            AllocError::InvalidField { row, column, .. } => {
                assert_eq!(row, 2);
                assert_eq!(column, "Export ETA");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let table = table(
            "PO001,1,SKU,Name,Fam,0,1,HK,LA,15/06/2025,25/06/2025,-4,1,1,1,1,0,1\n",
        );

        let err = PurchaseOrderLoader::load(&table).unwrap_err();
        assert!(matches!(err, AllocError::InvalidField { ref column, .. } if column == "To Be Shipped Quantity"));
    }
}
