//! 優化配置模型

use std::time::Duration;

use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

use crate::calendar::WeekNumbering;
use crate::{AllocError, Result};

/// 模型建構與求解參數
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// 每單位每遲到一天的罰金
    #[serde(alias = "latePenaltyPerDay")]
    pub late_penalty_per_day: Decimal,

    /// 優先級乘數（以優先級為指數）
    #[serde(alias = "priorityMultiplier")]
    pub priority_multiplier: Decimal,

    /// 求解時限（毫秒），None 表示不限時
    pub solver_time_limit_ms: Option<u64>,

    /// 是否加入貨櫃使用連結約束
    /// - true: assign[po,slot] ≤ demand(po) × use[slot]，有貨的艙位一定計入價格（預設）
    /// - false: 只由容量約束限制 use[slot]，體積與重量皆為 0 的貨物可不開櫃
    pub link_container_usage: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            late_penalty_per_day: Decimal::from(2),
            priority_multiplier: Decimal::from(2),
            solver_time_limit_ms: None,
            link_container_usage: true,
        }
    }
}

impl OptimizerConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置每日遲到罰金
    pub fn with_late_penalty_per_day(mut self, penalty: Decimal) -> Self {
        self.late_penalty_per_day = penalty;
        self
    }

    /// 建構器模式：設置優先級乘數
    pub fn with_priority_multiplier(mut self, multiplier: Decimal) -> Self {
        self.priority_multiplier = multiplier;
        self
    }

    /// 建構器模式：設置求解時限
    pub fn with_solver_time_limit(mut self, limit: Duration) -> Self {
        let millis = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX);
        self.solver_time_limit_ms = Some(millis.max(1));
        self
    }

    /// 建構器模式：設置是否連結貨櫃使用
    pub fn with_link_container_usage(mut self, link: bool) -> Self {
        self.link_container_usage = link;
        self
    }

    /// 求解時限
    pub fn solver_time_limit(&self) -> Option<Duration> {
        self.solver_time_limit_ms.map(Duration::from_millis)
    }

    /// 驗證參數範圍
    pub fn validate(&self) -> Result<()> {
        if self.late_penalty_per_day < Decimal::ZERO {
            return Err(AllocError::InvalidConfig(format!(
                "late_penalty_per_day 不可為負數: {}",
                self.late_penalty_per_day
            )));
        }

        if self.priority_multiplier < Decimal::ONE {
            return Err(AllocError::InvalidConfig(format!(
                "priority_multiplier 必須 ≥ 1: {}",
                self.priority_multiplier
            )));
        }

        if self.solver_time_limit_ms == Some(0) {
            return Err(AllocError::InvalidConfig(
                "solver_time_limit_ms 必須大於 0".to_string(),
            ));
        }

        Ok(())
    }

    /// 單位遲到罰金係數 = 遲到天數 × 每日罰金 × 乘數^優先級
    ///
    /// 準時或每日罰金為 0 時直接回傳 0，不計算乘數次方
    pub fn late_penalty_per_unit(&self, late_days: u32, priority_level: u32) -> Result<Decimal> {
        if late_days == 0 || self.late_penalty_per_day.is_zero() {
            return Ok(Decimal::ZERO);
        }

        let scale = self
            .priority_multiplier
            .checked_powu(u64::from(priority_level))
            .ok_or_else(|| {
                AllocError::ModelBuild(format!(
                    "優先級乘數 {}^{} 溢出",
                    self.priority_multiplier, priority_level
                ))
            })?;

        Decimal::from(late_days)
            .checked_mul(self.late_penalty_per_day)
            .and_then(|v| v.checked_mul(scale))
            .ok_or_else(|| AllocError::ModelBuild("遲到罰金係數溢出".to_string()))
    }
}

/// 單次執行配置（資料準備 + 優化）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// 優化參數
    pub optimizer: OptimizerConfig,

    /// 艙位週次編號規則
    pub week_numbering: WeekNumbering,
}

impl RunConfig {
    /// 從 JSON 字串載入配置，缺少的欄位使用預設值
    pub fn from_json(json: &str) -> Result<Self> {
        let config: RunConfig = serde_json::from_str(json)
            .map_err(|e| AllocError::InvalidConfig(e.to_string()))?;
        config.optimizer.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OptimizerConfig::default();

        assert_eq!(config.late_penalty_per_day, Decimal::from(2));
        assert_eq!(config.priority_multiplier, Decimal::from(2));
        assert_eq!(config.solver_time_limit(), None);
        assert!(config.link_container_usage);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = OptimizerConfig::new()
            .with_late_penalty_per_day(Decimal::from(5))
            .with_priority_multiplier(Decimal::from(3))
            .with_solver_time_limit(Duration::from_secs(30))
            .with_link_container_usage(false);

        assert_eq!(config.late_penalty_per_day, Decimal::from(5));
        assert_eq!(config.priority_multiplier, Decimal::from(3));
        assert_eq!(config.solver_time_limit(), Some(Duration::from_secs(30)));
        assert!(!config.link_container_usage);
    }

    #[test]
    fn test_solver_time_limit_keeps_milliseconds() {
        let half = OptimizerConfig::new().with_solver_time_limit(Duration::from_millis(500));
        assert_eq!(half.solver_time_limit_ms, Some(500));
        assert_eq!(half.solver_time_limit(), Some(Duration::from_millis(500)));

        let longer = OptimizerConfig::new().with_solver_time_limit(Duration::from_millis(1900));
        assert_eq!(longer.solver_time_limit(), Some(Duration::from_millis(1900)));

        // 不足 1 毫秒進位到 1 毫秒
        let tiny = OptimizerConfig::new().with_solver_time_limit(Duration::from_micros(10));
        assert_eq!(tiny.solver_time_limit_ms, Some(1));
        assert!(tiny.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let negative = OptimizerConfig::new().with_late_penalty_per_day(Decimal::from(-1));
        assert!(matches!(negative.validate(), Err(AllocError::InvalidConfig(_))));

        let below_one = OptimizerConfig::new().with_priority_multiplier(Decimal::new(5, 1));
        assert!(matches!(below_one.validate(), Err(AllocError::InvalidConfig(_))));
    }

    #[test]
    fn test_late_penalty_per_unit() {
        let config = OptimizerConfig::default();

        // 3 天 × 2 × 2^2 = 24
        assert_eq!(config.late_penalty_per_unit(3, 2).unwrap(), Decimal::from(24));
        // 準時不罰
        assert_eq!(config.late_penalty_per_unit(0, 5).unwrap(), Decimal::ZERO);
        // 優先級 0 不放大
        assert_eq!(config.late_penalty_per_unit(4, 0).unwrap(), Decimal::from(8));
    }

    #[test]
    fn test_on_time_penalty_skips_priority_power() {
        // 10^30 超出 Decimal 範圍，但準時不需要計算
        let config = OptimizerConfig::new().with_priority_multiplier(Decimal::from(10));
        assert_eq!(config.late_penalty_per_unit(0, 30).unwrap(), Decimal::ZERO);

        let free = OptimizerConfig::new()
            .with_late_penalty_per_day(Decimal::ZERO)
            .with_priority_multiplier(Decimal::from(10));
        assert_eq!(free.late_penalty_per_unit(5, 30).unwrap(), Decimal::ZERO);

        // 乘數 1 時任何優先級都只是 1
        let flat = OptimizerConfig::new().with_priority_multiplier(Decimal::ONE);
        assert_eq!(flat.late_penalty_per_unit(2, u32::MAX).unwrap(), Decimal::from(4));
    }

    #[test]
    fn test_late_penalty_overflow_is_reported() {
        let config = OptimizerConfig::new().with_priority_multiplier(Decimal::from(1000));
        let err = config.late_penalty_per_unit(1, 40).unwrap_err();
        assert!(matches!(err, AllocError::ModelBuild(_)));
    }

    #[test]
    fn test_run_config_from_json() {
        let config = RunConfig::from_json(
            r#"{ "optimizer": { "late_penalty_per_day": "3.5", "solver_time_limit_ms": 10000 }, "week_numbering": "monday_first" }"#,
        )
        .unwrap();

        assert_eq!(config.optimizer.late_penalty_per_day, Decimal::new(35, 1));
        assert_eq!(config.optimizer.priority_multiplier, Decimal::from(2));
        assert_eq!(config.optimizer.solver_time_limit(), Some(Duration::from_secs(10)));
        assert_eq!(config.week_numbering, WeekNumbering::MondayFirst);

        let empty = RunConfig::from_json("{}").unwrap();
        assert_eq!(empty, RunConfig::default());
    }

    #[test]
    fn test_camel_case_penalty_keys() {
        let config = RunConfig::from_json(
            r#"{ "optimizer": { "latePenaltyPerDay": 4, "priorityMultiplier": 1.5 } }"#,
        )
        .unwrap();

        assert_eq!(config.optimizer.late_penalty_per_day, Decimal::from(4));
        assert_eq!(config.optimizer.priority_multiplier, Decimal::new(15, 1));
    }

    #[test]
    fn test_run_config_rejects_invalid_values() {
        let err = RunConfig::from_json(r#"{ "optimizer": { "priority_multiplier": "0.5" } }"#)
            .unwrap_err();
        assert!(matches!(err, AllocError::InvalidConfig(_)));
    }
}
