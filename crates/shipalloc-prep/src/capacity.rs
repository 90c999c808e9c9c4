//! 運能表載入與艙位展開

use std::collections::HashMap;

use shipalloc_core::calendar::parse_week_year;
use shipalloc_core::container::base_shipment_id;
use shipalloc_core::{AllocError, ContainerSlot, Result, WeekNumbering};

use crate::schema::*;
use crate::table::RawTable;

/// 單筆運能可展開的艙位上限
pub const MAX_UNITS_PER_RECORD: u32 = 10_000;

/// 運能載入器
///
/// 每筆運能資料的 `Available Units = N` 會展開成 N 個獨立艙位，
/// 共用基礎艙位ID，艙位ID 依序加上 `-1..-N` 後綴。
#[derive(Debug, Clone, Copy, Default)]
pub struct CapacityLoader {
    week_numbering: WeekNumbering,
}

impl CapacityLoader {
    /// 創建載入器
    pub fn new(week_numbering: WeekNumbering) -> Self {
        Self { week_numbering }
    }

    /// 驗證欄位、解析日期並展開艙位
    pub fn load(&self, table: &RawTable) -> Result<Vec<ContainerSlot>> {
        table.require_columns(&required_capacity_columns())?;

        let mut slots = Vec::new();
        // 同一基礎ID已使用的序號，跨列延續以保持艙位ID唯一
        let mut next_suffix: HashMap<String, u32> = HashMap::new();

        for row in table.rows() {
            let week_year = row.required_string(WEEK_YEAR)?;
            let from_port = row.required_string(FROM_PORT)?;
            let to_port = row.required_string(TO_PORT)?;
            let carrier = row.string(CARRIER)?;
            let container_type = row.string(CONTAINER_TYPE)?;
            let available_units = row.optional_u32(AVAILABLE_UNITS)?.unwrap_or(1);
            if available_units > MAX_UNITS_PER_RECORD {
                return Err(AllocError::InvalidField {
                    table: table.name().to_string(),
                    row: row.line(),
                    column: AVAILABLE_UNITS.to_string(),
                    value: available_units.to_string(),
                    reason: format!("單筆運能最多 {} 個貨櫃", MAX_UNITS_PER_RECORD),
                });
            }
            let max_volume = row.non_negative_f64(MAX_VOLUME_M3)?;
            let max_weight = row.non_negative_f64(MAX_WEIGHT_KG)?;
            let transit_days = row.u32(TRANSIT_DAYS)?;
            let price = row.non_negative_decimal(PRICE_USD)?;

            let departure_date = parse_week_year(&week_year, self.week_numbering).map_err(|_| {
                AllocError::InvalidField {
                    table: table.name().to_string(),
                    row: row.line(),
                    column: WEEK_YEAR.to_string(),
                    value: week_year.clone(),
                    reason: format!("需要 YYYY-Www 週次標記（{:?} 規則）", self.week_numbering),
                }
            })?;

            let base_id = base_shipment_id(&week_year, &from_port, &to_port, &carrier, &container_type);
            let counter = next_suffix.entry(base_id.clone()).or_insert(0);
            if *counter > 0 {
                tracing::warn!(
                    "第 {} 行: 基礎艙位 {} 重複，序號從 {} 接續",
                    row.line(),
                    base_id,
                    *counter + 1
                );
            }

            for _ in 0..available_units {
                *counter += 1;
                let slot = ContainerSlot::new(
                    format!("{}-{}", base_id, counter),
                    base_id.clone(),
                    from_port.clone(),
                    to_port.clone(),
                    departure_date,
                    transit_days,
                )
                .with_week_year(week_year.clone())
                .with_carrier(carrier.clone(), container_type.clone())
                .with_capacity(max_volume, max_weight)
                .with_price(price);

                slots.push(slot);
            }

            tracing::debug!(
                "運能 {}: 展開 {} 個艙位, 開航 {}",
                base_id,
                available_units,
                departure_date
            );
        }

        tracing::info!("載入運能 {} 筆, 展開艙位 {} 個", table.len(), slots.len());

        Ok(slots)
    }
}
