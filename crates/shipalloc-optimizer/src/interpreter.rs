//! 求解結果解讀

use std::collections::HashSet;

use rust_decimal::Decimal;
use shipalloc_core::{AllocError, Assignment, ContainerSlot, PurchaseOrderLine, Result, UnmetRecord};

use crate::model::AllocationModel;
use crate::solver::SolverOutcome;

/// 解讀後的計劃
#[derive(Debug, Clone, Default)]
pub struct InterpretedPlan {
    /// 分配記錄（依可行配對順序）
    pub assignments: Vec<Assignment>,

    /// 未滿足記錄（依 PO 行順序）
    pub unmet: Vec<UnmetRecord>,

    /// 以取整後數值重算的目標值
    pub objective_value: f64,
}

/// 結果解讀器
pub struct ResultInterpreter;

impl ResultInterpreter {
    /// 將變數值轉為分配與未滿足記錄
    pub fn interpret(
        model: &AllocationModel,
        outcome: &SolverOutcome,
        purchase_orders: &[PurchaseOrderLine],
        slots: &[ContainerSlot],
    ) -> Result<InterpretedPlan> {
        // 未滿足變數保證模型可行，無解代表模型本身有誤
        if !outcome.status.has_solution() {
            return Err(AllocError::InternalConsistency(format!(
                "求解狀態 {:?}，分配模型應恆為可行",
                outcome.status
            )));
        }

        if outcome.values.len() != model.milp.variable_count() {
            return Err(AllocError::InternalConsistency(format!(
                "變數值數量 {} 與模型變數數量 {} 不符",
                outcome.values.len(),
                model.milp.variable_count()
            )));
        }

        let rounded: Vec<f64> = outcome.values.iter().map(|v| v.round()).collect();

        let mut assignments = Vec::new();
        let mut assigned_per_po = vec![0u64; purchase_orders.len()];
        let mut seen_shipments: HashSet<&str> = HashSet::new();

        for (pair_idx, pair) in model.graph.pairs().iter().enumerate() {
            let quantity = to_quantity(rounded[model.assign_vars[pair_idx].0]);
            if quantity == 0 {
                continue;
            }

            let po = &purchase_orders[pair.po];
            let slot = &slots[pair.slot];
            let unit_penalty = model.late_unit_penalty[pair_idx];

            assigned_per_po[pair.po] += u64::from(quantity);
            let used_container = seen_shipments.insert(slot.shipment_id.as_str());

            assignments.push(Assignment {
                po_index: pair.po,
                slot_index: pair.slot,
                key: po.key(),
                shipment_id: slot.shipment_id.clone(),
                quantity,
                late_days: pair.late_days,
                late_penalty: unit_penalty * Decimal::from(quantity),
                cogs_value: po.cogs * Decimal::from(quantity),
                used_container,
            });
        }

        let mut unmet = Vec::new();
        for (po_idx, po) in purchase_orders.iter().enumerate() {
            let assigned = assigned_per_po[po_idx];
            let demand = u64::from(po.quantity);
            if assigned > demand {
                return Err(AllocError::InternalConsistency(format!(
                    "{} 分配量 {} 超過需求 {}",
                    po.key(),
                    assigned,
                    demand
                )));
            }

            // 未滿足量以需求差額重建，與求解器的 unmet 值不一致時只警告
            let remaining = demand - assigned;
            let solver_unmet = to_quantity(rounded[model.unmet_vars[po_idx].0]);
            if u64::from(solver_unmet) != remaining {
                tracing::warn!(
                    "{} 未滿足量不一致：求解器 {}，重建 {}",
                    po.key(),
                    solver_unmet,
                    remaining
                );
            }

            if remaining > 0 {
                // remaining ≤ demand，必在 u32 範圍內
                let quantity = u32::try_from(remaining).unwrap_or(po.quantity);
                unmet.push(UnmetRecord {
                    po_index: po_idx,
                    key: po.key(),
                    quantity,
                    unmet_penalty: po.unmet_penalty * Decimal::from(quantity),
                    cogs_value: po.cogs * Decimal::from(quantity),
                });
            }
        }

        let objective_value = model.milp.evaluate_objective(&rounded);

        tracing::debug!(
            "解讀結果：分配 {} 筆，未滿足 {} 筆，目標值 {:.2}",
            assignments.len(),
            unmet.len(),
            objective_value
        );

        Ok(InterpretedPlan {
            assignments,
            unmet,
            objective_value,
        })
    }
}

fn to_quantity(value: f64) -> u32 {
    if value <= 0.0 {
        0
    } else {
        value.min(f64::from(u32::MAX)) as u32
    }
}
