//! 分配計劃摘要指標

use std::collections::{BTreeMap, HashMap, HashSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shipalloc_core::{AllocationRow, PoLineKey};

/// 計劃層級 KPI
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    /// PO 行數（不重複）
    pub total_po_lines: usize,

    /// 使用貨櫃數（不重複艙位ID）
    pub used_containers: usize,

    pub total_qty_assigned: u64,
    pub total_qty_unmet: u64,
    pub total_cogs_assigned: Decimal,
    pub total_cogs_unmet: Decimal,
    pub total_unmet_penalty: Decimal,
    pub total_late_penalty: Decimal,

    /// 已使用艙位的價格總和
    pub total_container_cost: Decimal,

    /// 未滿足罰金 + 貨櫃成本 + 遲到罰金
    pub estimated_total_cost: Decimal,
}

impl PlanSummary {
    /// 由輸出表計算摘要
    pub fn from_rows(rows: &[AllocationRow]) -> Self {
        let mut summary = Self::default();
        let mut lines: HashSet<PoLineKey> = HashSet::new();
        let mut containers: HashMap<&str, Decimal> = HashMap::new();

        for row in rows {
            lines.insert(row.key());

            summary.total_qty_assigned += u64::from(row.qty_assigned);
            summary.total_qty_unmet += u64::from(row.unmet_qty);
            summary.total_cogs_assigned += row.cogs_value_assigned;
            summary.total_cogs_unmet += row.cogs_value_unmet;
            summary.total_unmet_penalty += row.unmet_penalty;
            summary.total_late_penalty += row.late_penalty.unwrap_or_default();

            if let Some(shipment_id) = row.shipment_id.as_deref() {
                containers
                    .entry(shipment_id)
                    .or_insert_with(|| row.price.unwrap_or_default());
            }
        }

        summary.total_po_lines = lines.len();
        summary.used_containers = containers.len();
        summary.total_container_cost = containers.values().copied().sum();
        summary.estimated_total_cost =
            summary.total_unmet_penalty + summary.total_container_cost + summary.total_late_penalty;

        summary
    }
}

/// PO 行履約狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FulfillmentStatus {
    FullyMet,
    PartiallyMet,
    Unmet,
}

/// 單一 PO 行的履約情況
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineFulfillment {
    pub key: PoLineKey,
    pub qty_assigned: u64,
    pub qty_unmet: u64,
    pub status: FulfillmentStatus,
}

/// 各 PO 行的履約狀態（依首次出現順序）
pub fn fulfillment_status(rows: &[AllocationRow]) -> Vec<LineFulfillment> {
    let mut order: Vec<PoLineKey> = Vec::new();
    let mut totals: HashMap<PoLineKey, (u64, u64)> = HashMap::new();

    for row in rows {
        let key = row.key();
        let entry = totals.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            (0, 0)
        });
        entry.0 += u64::from(row.qty_assigned);
        entry.1 += u64::from(row.unmet_qty);
    }

    order
        .into_iter()
        .map(|key| {
            let (qty_assigned, qty_unmet) = totals.get(&key).copied().unwrap_or_default();
            let status = if qty_unmet == 0 {
                FulfillmentStatus::FullyMet
            } else if qty_assigned > 0 {
                FulfillmentStatus::PartiallyMet
            } else {
                FulfillmentStatus::Unmet
            };
            LineFulfillment {
                key,
                qty_assigned,
                qty_unmet,
                status,
            }
        })
        .collect()
}

/// 各承運商的分配數量（依承運商排序）
pub fn carrier_totals(rows: &[AllocationRow]) -> BTreeMap<String, u64> {
    let mut totals = BTreeMap::new();
    for row in rows {
        if let Some(carrier) = &row.carrier {
            *totals.entry(carrier.clone()).or_insert(0) += u64::from(row.qty_assigned);
        }
    }
    totals
}
