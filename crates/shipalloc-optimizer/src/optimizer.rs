//! 貨櫃分配主流程

use shipalloc_core::{AllocationRow, ContainerSlot, OptimizerConfig, PurchaseOrderLine, Result};

use crate::feasibility::FeasibilityGraph;
use crate::interpreter::ResultInterpreter;
use crate::model::ModelBuilder;
use crate::solver::{GoodLpSolver, MilpSolver, SolverOutcome};
use crate::summary::PlanSummary;
use crate::AllocationPlan;

/// 貨櫃分配優化器
pub struct ShippingOptimizer<S: MilpSolver = GoodLpSolver> {
    /// 模型參數
    config: OptimizerConfig,

    /// 求解器
    solver: S,
}

impl ShippingOptimizer<GoodLpSolver> {
    /// 使用預設求解器
    pub fn with_default_solver(config: OptimizerConfig) -> Self {
        Self::new(config, GoodLpSolver::new())
    }
}

impl<S: MilpSolver> ShippingOptimizer<S> {
    /// 創建新的優化器
    pub fn new(config: OptimizerConfig, solver: S) -> Self {
        Self { config, solver }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// 主優化入口
    pub fn optimize(
        &self,
        purchase_orders: &[PurchaseOrderLine],
        slots: &[ContainerSlot],
    ) -> Result<AllocationPlan> {
        tracing::info!(
            "開始貨櫃分配：PO 行 {} 筆，艙位 {} 個",
            purchase_orders.len(),
            slots.len()
        );

        let start_time = std::time::Instant::now();
        self.config.validate()?;

        // Step 1: 可行配對
        tracing::debug!("Step 1: 建立可行配對");
        let graph = FeasibilityGraph::build(purchase_orders, slots);
        let unroutable = graph.unroutable_lines();
        if !unroutable.is_empty() {
            tracing::debug!("無可行艙位的 PO 行: {} 筆", unroutable.len());
        }

        // Step 2: 建構模型
        tracing::debug!("Step 2: 建構 MILP 模型");
        let model = ModelBuilder::new(&self.config).build(purchase_orders, slots, &graph)?;

        // Step 3: 求解
        tracing::debug!("Step 3: 求解");
        let outcome = if model.milp.variable_count() == 0 {
            SolverOutcome::optimal(Vec::new())
        } else {
            self.solver
                .solve(&model.milp, self.config.solver_time_limit())?
        };
        tracing::debug!("求解狀態: {:?}", outcome.status);

        // Step 4: 解讀結果
        tracing::debug!("Step 4: 解讀結果");
        let interpreted = ResultInterpreter::interpret(&model, &outcome, purchase_orders, slots)?;

        let mut rows = Vec::with_capacity(interpreted.assignments.len() + interpreted.unmet.len());
        for assignment in &interpreted.assignments {
            rows.push(AllocationRow::assigned(
                &purchase_orders[assignment.po_index],
                &slots[assignment.slot_index],
                assignment,
            ));
        }
        for record in &interpreted.unmet {
            rows.push(AllocationRow::unmet(&purchase_orders[record.po_index], record));
        }

        let summary = PlanSummary::from_rows(&rows);

        let mut plan = AllocationPlan::empty();
        plan.rows = rows;
        plan.assignments = interpreted.assignments;
        plan.unmet = interpreted.unmet;
        plan.summary = summary;
        plan.objective_value = interpreted.objective_value;
        plan.feasible_pairs = graph.len();
        plan.calculation_time_ms = Some(start_time.elapsed().as_millis());

        tracing::info!("貨櫃分配完成，耗時 {:?}", start_time.elapsed());
        tracing::info!(
            "分配 {} 件、未滿足 {} 件、使用貨櫃 {} 個",
            plan.summary.total_qty_assigned,
            plan.summary.total_qty_unmet,
            plan.summary.used_containers
        );

        Ok(plan)
    }
}
