//! 求解器介面與 good_lp 實作

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use good_lp::variable::ProblemVariables;
use good_lp::{variable, Expression, ResolutionError, Solution, SolverModel, Variable};
use shipalloc_core::{AllocError, Result};

use crate::milp::{ConstraintSense, MilpModel, VarKind};

/// 求解狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// 已證明最佳
    Optimal,
    /// 可行但未證明最佳
    Feasible,
    /// 不可行
    Infeasible,
    /// 無界
    Unbounded,
}

impl SolveStatus {
    /// 是否帶有可用的變數值
    pub fn has_solution(&self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

/// 求解結果
#[derive(Debug, Clone, PartialEq)]
pub struct SolverOutcome {
    pub status: SolveStatus,

    /// 變數值，依 `MilpModel::variables` 順序
    pub values: Vec<f64>,
}

impl SolverOutcome {
    /// 最佳解
    pub fn optimal(values: Vec<f64>) -> Self {
        Self {
            status: SolveStatus::Optimal,
            values,
        }
    }

    /// 無解狀態
    pub fn without_solution(status: SolveStatus) -> Self {
        Self {
            status,
            values: Vec::new(),
        }
    }
}

/// MILP 求解器
pub trait MilpSolver {
    /// 求解最小化模型；`time_limit` 只限制等待時間，不改變模型
    fn solve(&self, model: &MilpModel, time_limit: Option<Duration>) -> Result<SolverOutcome>;
}

/// good_lp + microlp（純 Rust 分支定界）求解器
#[derive(Debug, Clone, Copy, Default)]
pub struct GoodLpSolver;

impl GoodLpSolver {
    pub fn new() -> Self {
        Self
    }

    /// 在目前執行緒上求解
    fn solve_blocking(model: &MilpModel) -> Result<SolverOutcome> {
        let mut vars = ProblemVariables::new();
        let handles: Vec<Variable> = model
            .variables
            .iter()
            .map(|def| {
                let definition = match def.kind {
                    VarKind::Continuous => variable().min(def.lower).max(def.upper),
                    VarKind::Integer => variable().integer().min(def.lower).max(def.upper),
                    VarKind::Binary => variable().binary(),
                };
                vars.add(definition.name(def.name.clone()))
            })
            .collect();

        let mut objective = Expression::with_capacity(model.objective.len());
        for (var, coef) in &model.objective {
            objective.add_mul(*coef, handles[var.0]);
        }

        let mut problem = vars.minimise(objective).using(good_lp::microlp);
        for constraint in &model.constraints {
            let mut lhs = Expression::with_capacity(constraint.terms.len());
            for (var, coef) in &constraint.terms {
                lhs.add_mul(*coef, handles[var.0]);
            }
            problem = problem.with(match constraint.sense {
                ConstraintSense::Le => lhs.leq(constraint.rhs),
                ConstraintSense::Eq => lhs.eq(constraint.rhs),
                ConstraintSense::Ge => lhs.geq(constraint.rhs),
            });
        }

        match problem.solve() {
            Ok(solution) => {
                let values = handles.iter().map(|&v| solution.value(v)).collect();
                Ok(SolverOutcome::optimal(values))
            }
            Err(ResolutionError::Infeasible) => {
                Ok(SolverOutcome::without_solution(SolveStatus::Infeasible))
            }
            Err(ResolutionError::Unbounded) => {
                Ok(SolverOutcome::without_solution(SolveStatus::Unbounded))
            }
            Err(e) => Err(AllocError::Solver(e.to_string())),
        }
    }
}

impl MilpSolver for GoodLpSolver {
    fn solve(&self, model: &MilpModel, time_limit: Option<Duration>) -> Result<SolverOutcome> {
        tracing::debug!(
            "求解模型 {}（變數 {}，約束 {}，時限 {:?}）",
            model.name,
            model.variable_count(),
            model.constraint_count(),
            time_limit
        );

        let Some(limit) = time_limit else {
            return Self::solve_blocking(model);
        };

        // 逾時後工作執行緒仍會跑完，但結果被丟棄
        let (tx, rx) = mpsc::channel();
        let owned = model.clone();
        thread::Builder::new()
            .name("shipalloc-solver".to_string())
            .spawn(move || {
                let _ = tx.send(Self::solve_blocking(&owned));
            })
            .map_err(|e| AllocError::Solver(format!("無法啟動求解執行緒: {}", e)))?;

        match rx.recv_timeout(limit) {
            Ok(outcome) => outcome,
            Err(mpsc::RecvTimeoutError::Timeout) => {
                tracing::warn!("求解超過時限 {:?}", limit);
                Err(AllocError::SolverTimeout(limit))
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                Err(AllocError::Solver("求解執行緒異常結束".to_string()))
            }
        }
    }
}
