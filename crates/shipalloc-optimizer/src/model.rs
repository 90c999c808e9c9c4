//! 分配模型建構

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use shipalloc_core::{AllocError, ContainerSlot, OptimizerConfig, PurchaseOrderLine, Result};

use crate::feasibility::FeasibilityGraph;
use crate::milp::{ConstraintSense, MilpModel, VarId, VarKind};

/// 建構完成的分配模型與變數對照
#[derive(Debug, Clone)]
pub struct AllocationModel {
    /// MILP 模型
    pub milp: MilpModel,

    /// assign[pair]，與可行配對同序
    pub assign_vars: Vec<VarId>,

    /// use[slot]
    pub use_vars: Vec<VarId>,

    /// unmet[po]
    pub unmet_vars: Vec<VarId>,

    /// 每組配對的單位遲到罰金（遲到天數 × 每日罰金 × 乘數^優先級）
    pub late_unit_penalty: Vec<Decimal>,

    /// 可行配對圖
    pub graph: FeasibilityGraph,
}

/// 模型建構器
pub struct ModelBuilder<'a> {
    config: &'a OptimizerConfig,
}

impl<'a> ModelBuilder<'a> {
    /// 創建建構器
    pub fn new(config: &'a OptimizerConfig) -> Self {
        Self { config }
    }

    /// 建構 MILP：
    ///
    /// ```text
    /// min Σ late(po,slot) × assign[po,slot] + Σ price(slot) × use[slot] + Σ rate(po) × unmet[po]
    /// s.t. Σ_slot assign[po,slot] + unmet[po] = demand(po)                 ∀ po
    ///      Σ_po assign[po,slot] × volume(po) ≤ maxVolume(slot) × use[slot] ∀ slot
    ///      Σ_po assign[po,slot] × weight(po) ≤ maxWeight(slot) × use[slot] ∀ slot
    ///      assign[po,slot] ≤ demand(po) × use[slot]                        ∀ pair（啟用連結時）
    /// ```
    pub fn build(
        &self,
        purchase_orders: &[PurchaseOrderLine],
        slots: &[ContainerSlot],
        graph: &FeasibilityGraph,
    ) -> Result<AllocationModel> {
        self.config.validate()?;

        let mut milp = MilpModel::new("po_container_allocation");

        // 決策變數：只為可行配對建立 assign
        let mut assign_vars = Vec::with_capacity(graph.len());
        let mut late_unit_penalty = Vec::with_capacity(graph.len());
        for pair in graph.pairs() {
            let po = &purchase_orders[pair.po];
            let var = milp.add_variable(
                format!("assign_{}_{}", pair.po, pair.slot),
                VarKind::Integer,
                0.0,
                f64::from(po.quantity),
            );
            assign_vars.push(var);

            let penalty = self
                .config
                .late_penalty_per_unit(pair.late_days, po.priority_level)?;
            milp.add_objective_term(var, to_coefficient(penalty)?);
            late_unit_penalty.push(penalty);
        }

        let mut use_vars = Vec::with_capacity(slots.len());
        for (slot_idx, slot) in slots.iter().enumerate() {
            let var = milp.add_variable(format!("use_{}", slot_idx), VarKind::Binary, 0.0, 1.0);
            milp.add_objective_term(var, to_coefficient(slot.price)?);
            use_vars.push(var);
        }

        let mut unmet_vars = Vec::with_capacity(purchase_orders.len());
        for (po_idx, po) in purchase_orders.iter().enumerate() {
            let var = milp.add_variable(
                format!("unmet_{}", po_idx),
                VarKind::Integer,
                0.0,
                f64::from(po.quantity),
            );
            milp.add_objective_term(var, to_coefficient(po.unmet_penalty)?);
            unmet_vars.push(var);
        }

        // 需求平衡：未滿足量吸收所有無法運送的需求，模型恆可行
        for (po_idx, po) in purchase_orders.iter().enumerate() {
            let mut terms: Vec<(VarId, f64)> = graph
                .pairs_for_po(po_idx)
                .iter()
                .map(|&pair_idx| (assign_vars[pair_idx], 1.0))
                .collect();
            terms.push((unmet_vars[po_idx], 1.0));

            milp.add_constraint(
                format!("demand_{}", po_idx),
                terms,
                ConstraintSense::Eq,
                f64::from(po.quantity),
            );
        }

        // 體積與重量容量
        for (slot_idx, slot) in slots.iter().enumerate() {
            let pair_ids = graph.pairs_for_slot(slot_idx);

            let mut volume_terms: Vec<(VarId, f64)> = pair_ids
                .iter()
                .map(|&pair_idx| {
                    let po = &purchase_orders[graph.pairs()[pair_idx].po];
                    (assign_vars[pair_idx], po.volume_m3)
                })
                .collect();
            volume_terms.push((use_vars[slot_idx], -slot.max_volume_m3));
            milp.add_constraint(
                format!("volume_{}", slot_idx),
                volume_terms,
                ConstraintSense::Le,
                0.0,
            );

            let mut weight_terms: Vec<(VarId, f64)> = pair_ids
                .iter()
                .map(|&pair_idx| {
                    let po = &purchase_orders[graph.pairs()[pair_idx].po];
                    (assign_vars[pair_idx], po.weight_kg)
                })
                .collect();
            weight_terms.push((use_vars[slot_idx], -slot.max_weight_kg));
            milp.add_constraint(
                format!("weight_{}", slot_idx),
                weight_terms,
                ConstraintSense::Le,
                0.0,
            );
        }

        // 有貨的艙位必須計入使用
        if self.config.link_container_usage {
            for (pair_idx, pair) in graph.pairs().iter().enumerate() {
                let demand = f64::from(purchase_orders[pair.po].quantity);
                milp.add_constraint(
                    format!("link_{}_{}", pair.po, pair.slot),
                    vec![(assign_vars[pair_idx], 1.0), (use_vars[pair.slot], -demand)],
                    ConstraintSense::Le,
                    0.0,
                );
            }
        }

        tracing::debug!(
            "模型 {}: 變數 {} 個, 約束 {} 個",
            milp.name,
            milp.variable_count(),
            milp.constraint_count()
        );

        Ok(AllocationModel {
            milp,
            assign_vars,
            use_vars,
            unmet_vars,
            late_unit_penalty,
            graph: graph.clone(),
        })
    }
}

fn to_coefficient(value: Decimal) -> Result<f64> {
    value
        .to_f64()
        .ok_or_else(|| AllocError::ModelBuild(format!("係數 {} 無法轉換為浮點數", value)))
}
