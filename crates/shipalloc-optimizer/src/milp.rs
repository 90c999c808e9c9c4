//! 與求解器無關的混合整數線性規劃模型

/// 變數識別碼（於模型中的索引）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub usize);

/// 變數類型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    /// 連續
    Continuous,
    /// 整數
    Integer,
    /// 0/1
    Binary,
}

/// 變數定義
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDef {
    pub name: String,
    pub kind: VarKind,
    pub lower: f64,
    pub upper: f64,
}

/// 約束方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintSense {
    /// ≤
    Le,
    /// =
    Eq,
    /// ≥
    Ge,
}

/// 線性約束：Σ coef × var (sense) rhs
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    pub name: String,
    pub terms: Vec<(VarId, f64)>,
    pub sense: ConstraintSense,
    pub rhs: f64,
}

impl LinearConstraint {
    /// 左側數值
    pub fn lhs(&self, values: &[f64]) -> f64 {
        self.terms.iter().map(|(var, coef)| coef * values[var.0]).sum()
    }

    /// 在容許誤差內是否成立
    pub fn is_satisfied(&self, values: &[f64], tolerance: f64) -> bool {
        let lhs = self.lhs(values);
        match self.sense {
            ConstraintSense::Le => lhs <= self.rhs + tolerance,
            ConstraintSense::Eq => (lhs - self.rhs).abs() <= tolerance,
            ConstraintSense::Ge => lhs >= self.rhs - tolerance,
        }
    }
}

/// 最小化模型
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MilpModel {
    pub name: String,
    pub variables: Vec<VariableDef>,
    pub objective: Vec<(VarId, f64)>,
    pub constraints: Vec<LinearConstraint>,
}

impl MilpModel {
    /// 創建空模型
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// 新增變數
    pub fn add_variable(&mut self, name: String, kind: VarKind, lower: f64, upper: f64) -> VarId {
        let (lower, upper) = match kind {
            VarKind::Binary => (0.0, 1.0),
            _ => (lower, upper),
        };
        let id = VarId(self.variables.len());
        self.variables.push(VariableDef {
            name,
            kind,
            lower,
            upper,
        });
        id
    }

    /// 目標函數加上一項（係數為 0 時略過）
    pub fn add_objective_term(&mut self, var: VarId, coefficient: f64) {
        if coefficient != 0.0 {
            self.objective.push((var, coefficient));
        }
    }

    /// 新增約束
    pub fn add_constraint(
        &mut self,
        name: String,
        terms: Vec<(VarId, f64)>,
        sense: ConstraintSense,
        rhs: f64,
    ) {
        self.constraints.push(LinearConstraint {
            name,
            terms,
            sense,
            rhs,
        });
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// 依給定變數值計算目標函數
    pub fn evaluate_objective(&self, values: &[f64]) -> f64 {
        self.objective
            .iter()
            .map(|(var, coef)| coef * values[var.0])
            .sum()
    }

    /// 找出第一個不成立的約束
    pub fn first_violation(&self, values: &[f64], tolerance: f64) -> Option<&LinearConstraint> {
        self.constraints
            .iter()
            .find(|c| !c.is_satisfied(values, tolerance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_evaluate() {
        let mut model = MilpModel::new("test");
        let x = model.add_variable("x".to_string(), VarKind::Integer, 0.0, 10.0);
        let y = model.add_variable("y".to_string(), VarKind::Binary, -5.0, 5.0);

        model.add_objective_term(x, 3.0);
        model.add_objective_term(y, 0.0);
        model.add_objective_term(y, 7.0);
        model.add_constraint("cap".to_string(), vec![(x, 1.0), (y, -4.0)], ConstraintSense::Le, 0.0);

        assert_eq!(model.variable_count(), 2);
        assert_eq!(model.variables[1].lower, 0.0);
        assert_eq!(model.variables[1].upper, 1.0);
        assert_eq!(model.objective.len(), 2);
        assert_eq!(model.evaluate_objective(&[2.0, 1.0]), 13.0);

        assert!(model.first_violation(&[4.0, 1.0], 1e-9).is_none());
        assert_eq!(
            model.first_violation(&[5.0, 1.0], 1e-9).map(|c| c.name.as_str()),
            Some("cap")
        );
    }

    #[test]
    fn test_constraint_senses() {
        let c = |sense| LinearConstraint {
            name: "c".to_string(),
            terms: vec![(VarId(0), 2.0)],
            sense,
            rhs: 4.0,
        };

        assert!(c(ConstraintSense::Eq).is_satisfied(&[2.0], 1e-9));
        assert!(!c(ConstraintSense::Eq).is_satisfied(&[2.1], 1e-9));
        assert!(c(ConstraintSense::Ge).is_satisfied(&[3.0], 1e-9));
        assert!(!c(ConstraintSense::Le).is_satisfied(&[3.0], 1e-9));
    }
}
