//! 可行航線（PO 行 × 艙位）稀疏圖

use std::collections::HashMap;

use shipalloc_core::calendar::late_days;
use shipalloc_core::{ContainerSlot, PurchaseOrderLine};

/// 可行配對
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeasiblePair {
    /// PO 行索引
    pub po: usize,

    /// 艙位索引
    pub slot: usize,

    /// 遲到天數（建模時的常數係數）
    pub late_days: u32,
}

/// PO 行與艙位之間的二分相容圖
///
/// `pairs` 依 (PO 索引, 艙位索引) 排序，後續建模與結果輸出都依此順序，確保結果可重現。
#[derive(Debug, Clone, Default)]
pub struct FeasibilityGraph {
    pairs: Vec<FeasiblePair>,
    by_po: Vec<Vec<usize>>,
    by_slot: Vec<Vec<usize>>,
}

impl FeasibilityGraph {
    /// 建立可行配對：起運港與目的港完全相同，且開航日不早於出口預計日
    pub fn build(purchase_orders: &[PurchaseOrderLine], slots: &[ContainerSlot]) -> Self {
        // 依航線分組艙位（組內保持艙位索引遞增）
        let mut lanes: HashMap<(&str, &str), Vec<usize>> = HashMap::new();
        for (idx, slot) in slots.iter().enumerate() {
            lanes.entry(slot.lane()).or_default().push(idx);
        }

        let mut pairs = Vec::new();
        let mut by_po = vec![Vec::new(); purchase_orders.len()];
        let mut by_slot = vec![Vec::new(); slots.len()];

        for (po_idx, po) in purchase_orders.iter().enumerate() {
            let Some(candidates) = lanes.get(&(po.from_port.as_str(), po.to_port.as_str())) else {
                continue;
            };

            for &slot_idx in candidates {
                let slot = &slots[slot_idx];
                if !slot.departs_on_or_after(po.export_eta) {
                    continue;
                }

                let pair_idx = pairs.len();
                pairs.push(FeasiblePair {
                    po: po_idx,
                    slot: slot_idx,
                    late_days: late_days(slot.arrival_date, po.import_eta),
                });
                by_po[po_idx].push(pair_idx);
                by_slot[slot_idx].push(pair_idx);
            }
        }

        tracing::debug!(
            "可行配對 {} 組（PO 行 {} × 艙位 {}）",
            pairs.len(),
            purchase_orders.len(),
            slots.len()
        );

        Self {
            pairs,
            by_po,
            by_slot,
        }
    }

    /// 所有可行配對（固定順序）
    pub fn pairs(&self) -> &[FeasiblePair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// 指定 PO 行的配對索引
    pub fn pairs_for_po(&self, po: usize) -> &[usize] {
        self.by_po.get(po).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 指定艙位的配對索引
    pub fn pairs_for_slot(&self, slot: usize) -> &[usize] {
        self.by_slot.get(slot).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 沒有任何可行艙位的 PO 行
    pub fn unroutable_lines(&self) -> Vec<usize> {
        self.by_po
            .iter()
            .enumerate()
            .filter(|(_, pairs)| pairs.is_empty())
            .map(|(idx, _)| idx)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn po(number: &str, from: &str, to: &str, export: NaiveDate, import: NaiveDate) -> PurchaseOrderLine {
        PurchaseOrderLine::new(number.to_string(), 1, from.to_string(), to.to_string(), export, import, 5)
    }

    fn slot(id: &str, from: &str, to: &str, departure: NaiveDate, transit: u32) -> ContainerSlot {
        ContainerSlot::new(id.to_string(), id.to_string(), from.to_string(), to.to_string(), departure, transit)
    }

    #[test]
    fn test_port_and_timing_rules() {
        let pos = vec![
            po("PO1", "HK", "LA", date(6, 1), date(6, 10)),
            po("PO2", "HK", "NY", date(6, 10), date(6, 20)),
        ];
        let slots = vec![
            slot("S1", "HK", "LA", date(6, 2), 6),  // PO1 可行
            slot("S2", "HK", "NY", date(6, 1), 4),  // PO2 太早開航
            slot("S3", "HK", "LA", date(5, 31), 6), // PO1 太早開航
            slot("S4", "SZ", "LA", date(6, 5), 6),  // 港口不符
            slot("S5", "HK", "NY", date(6, 10), 15), // PO2 當天開航，遲到 5 天
        ];

        let graph = FeasibilityGraph::build(&pos, &slots);

        assert_eq!(
            graph.pairs(),
            &[
                FeasiblePair { po: 0, slot: 0, late_days: 0 },
                FeasiblePair { po: 1, slot: 4, late_days: 5 },
            ]
        );
        assert_eq!(graph.pairs_for_po(0), &[0]);
        assert_eq!(graph.pairs_for_slot(4), &[1]);
        assert!(graph.pairs_for_slot(1).is_empty());
        assert!(graph.unroutable_lines().is_empty());
    }

    #[test]
    fn test_pairs_are_ordered_by_po_then_slot() {
        let pos = vec![
            po("PO1", "HK", "LA", date(6, 1), date(6, 30)),
            po("PO2", "HK", "LA", date(6, 1), date(6, 30)),
        ];
        let slots = vec![
            slot("A", "HK", "LA", date(6, 3), 5),
            slot("B", "HK", "NY", date(6, 3), 5),
            slot("C", "HK", "LA", date(6, 2), 5),
        ];

        let graph = FeasibilityGraph::build(&pos, &slots);
        let order: Vec<(usize, usize)> = graph.pairs().iter().map(|p| (p.po, p.slot)).collect();

        assert_eq!(order, vec![(0, 0), (0, 2), (1, 0), (1, 2)]);
        assert_eq!(graph.pairs_for_slot(2), &[1, 3]);
    }

    #[test]
    fn test_unroutable_lines() {
        let pos = vec![po("PO1", "HK", "LA", date(6, 10), date(6, 20))];
        let slots = vec![slot("S1", "HK", "LA", date(6, 1), 4)];

        let graph = FeasibilityGraph::build(&pos, &slots);

        assert!(graph.is_empty());
        assert_eq!(graph.unroutable_lines(), vec![0]);
        assert!(graph.pairs_for_po(0).is_empty());
    }
}
