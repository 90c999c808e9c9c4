//! # Shipalloc Optimizer
//!
//! 貨櫃分配優化（可行配對、MILP 建模、求解、結果解讀）

pub mod feasibility;
pub mod interpreter;
pub mod milp;
pub mod model;
pub mod optimizer;
pub mod solver;
pub mod summary;

use shipalloc_core::{AllocationRow, Assignment, UnmetRecord};

// Re-export 主要類型
pub use feasibility::{FeasibilityGraph, FeasiblePair};
pub use interpreter::{InterpretedPlan, ResultInterpreter};
pub use milp::{ConstraintSense, LinearConstraint, MilpModel, VarId, VarKind};
pub use model::{AllocationModel, ModelBuilder};
pub use optimizer::ShippingOptimizer;
pub use solver::{GoodLpSolver, MilpSolver, SolveStatus, SolverOutcome};
pub use summary::{carrier_totals, fulfillment_status, FulfillmentStatus, LineFulfillment, PlanSummary};

/// 貨櫃分配計劃
#[derive(Debug, Clone)]
pub struct AllocationPlan {
    /// 執行ID
    pub run_id: uuid::Uuid,

    /// 輸出表（分配列在前、未滿足列在後）
    pub rows: Vec<AllocationRow>,

    /// 分配記錄
    pub assignments: Vec<Assignment>,

    /// 未滿足記錄
    pub unmet: Vec<UnmetRecord>,

    /// 摘要指標
    pub summary: PlanSummary,

    /// 目標值（取整後重算）
    pub objective_value: f64,

    /// 可行配對數
    pub feasible_pairs: usize,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl AllocationPlan {
    /// 創建空的計劃
    pub fn empty() -> Self {
        Self {
            run_id: uuid::Uuid::new_v4(),
            rows: Vec::new(),
            assignments: Vec::new(),
            unmet: Vec::new(),
            summary: PlanSummary::default(),
            objective_value: 0.0,
            feasible_pairs: 0,
            calculation_time_ms: None,
        }
    }

    /// 總分配數量
    pub fn total_assigned(&self) -> u64 {
        self.assignments.iter().map(|a| u64::from(a.quantity)).sum()
    }

    /// 總未滿足數量
    pub fn total_unmet(&self) -> u64 {
        self.unmet.iter().map(|u| u64::from(u.quantity)).sum()
    }

    /// 使用的艙位ID（依首次出現順序）
    pub fn used_shipments(&self) -> Vec<&str> {
        self.assignments
            .iter()
            .filter(|a| a.used_container)
            .map(|a| a.shipment_id.as_str())
            .collect()
    }
}
