//! # Shipalloc Core
//!
//! 核心資料模型與類型定義（採購訂單行、貨櫃艙位、分配結果、配置）

pub mod allocation;
pub mod calendar;
pub mod config;
pub mod container;
pub mod purchase_order;

// Re-export 主要類型
pub use allocation::{AllocationRow, Assignment, UnmetRecord};
pub use calendar::WeekNumbering;
pub use config::{OptimizerConfig, RunConfig};
pub use container::ContainerSlot;
pub use purchase_order::{PoLineKey, PurchaseOrderLine};

/// 分配系統錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum AllocError {
    #[error("{table} 缺少必要欄位: {}", .columns.join(", "))]
    MissingColumns { table: String, columns: Vec<String> },

    #[error("{table} 第 {row} 行欄位 '{column}' 無效（值: '{value}'）: {reason}")]
    InvalidField {
        table: String,
        row: usize,
        column: String,
        value: String,
        reason: String,
    },

    #[error("無效的週次標記: {0}")]
    InvalidWeekYear(String),

    #[error("無效的配置: {0}")]
    InvalidConfig(String),

    #[error("模型建構錯誤: {0}")]
    ModelBuild(String),

    #[error("求解器錯誤: {0}")]
    Solver(String),

    #[error("求解逾時（{0:?}）")]
    SolverTimeout(std::time::Duration),

    /// 模型必定可行（未滿足量作為鬆弛變數），出現此錯誤代表建模缺陷
    #[error("內部一致性錯誤: {0}")]
    InternalConsistency(String),

    #[error("IO 錯誤: {0}")]
    Io(String),

    #[error("CSV 錯誤: {0}")]
    Csv(String),
}

impl AllocError {
    /// 是否為輸入資料驗證錯誤（相對於內部或求解器錯誤）
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AllocError::MissingColumns { .. }
                | AllocError::InvalidField { .. }
                | AllocError::InvalidWeekYear(_)
                | AllocError::InvalidConfig(_)
                | AllocError::Csv(_)
        )
    }
}

impl From<std::io::Error> for AllocError {
    fn from(err: std::io::Error) -> Self {
        AllocError::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AllocError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_message_lists_all_names() {
        let err = AllocError::MissingColumns {
            table: "PO".to_string(),
            columns: vec!["COGS".to_string(), "SKU".to_string()],
        };

        let message = err.to_string();
        assert!(message.contains("COGS"));
        assert!(message.contains("SKU"));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_internal_errors_are_not_input_errors() {
        assert!(!AllocError::InternalConsistency("x".to_string()).is_input_error());
        assert!(!AllocError::Solver("x".to_string()).is_input_error());
        assert!(!AllocError::SolverTimeout(std::time::Duration::from_secs(1)).is_input_error());
    }
}
