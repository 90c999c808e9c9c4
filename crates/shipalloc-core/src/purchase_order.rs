//! 採購訂單行模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 立方公分轉立方公尺
pub const CM3_PER_M3: f64 = 1e6;

/// 採購訂單行識別鍵（PO 編號, 行號）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PoLineKey {
    pub po_number: String,
    pub line_number: u32,
}

impl std::fmt::Display for PoLineKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.po_number, self.line_number)
    }
}

/// 採購訂單行（需求）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrderLine {
    /// PO 編號
    pub po_number: String,

    /// PO 行號
    pub line_number: u32,

    /// 料號
    pub sku: String,

    /// 品名
    pub product_name: String,

    /// 產品族
    pub product_family: String,

    /// 是否為電子產品
    pub is_electronic: bool,

    /// 單位銷貨成本
    pub cogs: Decimal,

    /// 起運港
    pub from_port: String,

    /// 目的港
    pub to_port: String,

    /// 出口預計日（最早可裝船日）
    pub export_eta: NaiveDate,

    /// 進口預計日（期望到貨日）
    pub import_eta: NaiveDate,

    /// 待出貨數量
    pub quantity: u32,

    /// 長（cm）
    pub length_cm: f64,

    /// 寬（cm）
    pub width_cm: f64,

    /// 高（cm）
    pub height_cm: f64,

    /// 單位體積（m³），由長寬高換算
    pub volume_m3: f64,

    /// 單位重量（kg）
    pub weight_kg: f64,

    /// 優先級（0 起算，越大越重要）
    pub priority_level: u32,

    /// 每單位未滿足罰金
    pub unmet_penalty: Decimal,
}

impl PurchaseOrderLine {
    /// 創建新的採購訂單行（其餘欄位使用預設值）
    pub fn new(
        po_number: String,
        line_number: u32,
        from_port: String,
        to_port: String,
        export_eta: NaiveDate,
        import_eta: NaiveDate,
        quantity: u32,
    ) -> Self {
        Self {
            po_number,
            line_number,
            sku: String::new(),
            product_name: String::new(),
            product_family: String::new(),
            is_electronic: false,
            cogs: Decimal::ZERO,
            from_port,
            to_port,
            export_eta,
            import_eta,
            quantity,
            length_cm: 0.0,
            width_cm: 0.0,
            height_cm: 0.0,
            volume_m3: 0.0,
            weight_kg: 0.0,
            priority_level: 0,
            unmet_penalty: Decimal::ZERO,
        }
    }

    /// 建構器模式：設置產品資訊
    pub fn with_product(
        mut self,
        sku: String,
        product_name: String,
        product_family: String,
        is_electronic: bool,
    ) -> Self {
        self.sku = sku;
        self.product_name = product_name;
        self.product_family = product_family;
        self.is_electronic = is_electronic;
        self
    }

    /// 建構器模式：設置尺寸（cm），同時換算體積
    pub fn with_dimensions_cm(mut self, length: f64, width: f64, height: f64) -> Self {
        self.length_cm = length;
        self.width_cm = width;
        self.height_cm = height;
        self.volume_m3 = volume_from_cm(length, width, height);
        self
    }

    /// 建構器模式：直接設置單位體積（m³）
    pub fn with_volume_m3(mut self, volume_m3: f64) -> Self {
        self.volume_m3 = volume_m3;
        self
    }

    /// 建構器模式：設置單位重量
    pub fn with_weight_kg(mut self, weight_kg: f64) -> Self {
        self.weight_kg = weight_kg;
        self
    }

    /// 建構器模式：設置單位銷貨成本
    pub fn with_cogs(mut self, cogs: Decimal) -> Self {
        self.cogs = cogs;
        self
    }

    /// 建構器模式：設置優先級
    pub fn with_priority_level(mut self, priority_level: u32) -> Self {
        self.priority_level = priority_level;
        self
    }

    /// 建構器模式：設置未滿足罰金
    pub fn with_unmet_penalty(mut self, unmet_penalty: Decimal) -> Self {
        self.unmet_penalty = unmet_penalty;
        self
    }

    /// 識別鍵
    pub fn key(&self) -> PoLineKey {
        PoLineKey {
            po_number: self.po_number.clone(),
            line_number: self.line_number,
        }
    }

    /// 是否與指定航線相符
    pub fn matches_lane(&self, from_port: &str, to_port: &str) -> bool {
        self.from_port == from_port && self.to_port == to_port
    }
}

/// 由公分尺寸計算立方公尺體積
pub fn volume_from_cm(length_cm: f64, width_cm: f64, height_cm: f64) -> f64 {
    length_cm * width_cm * height_cm / CM3_PER_M3
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_line() -> PurchaseOrderLine {
        PurchaseOrderLine::new(
            "PO001".to_string(),
            1,
            "HK".to_string(),
            "LA".to_string(),
            NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 25).unwrap(),
            10,
        )
    }

    #[test]
    fn test_create_line() {
        let line = sample_line();

        assert_eq!(line.po_number, "PO001");
        assert_eq!(line.quantity, 10);
        assert_eq!(line.priority_level, 0);
        assert_eq!(line.key().to_string(), "PO001#1");
        assert!(line.matches_lane("HK", "LA"));
        assert!(!line.matches_lane("HK", "NY"));
    }

    #[test]
    fn test_dimensions_builder_derives_volume() {
        let line = sample_line().with_dimensions_cm(100.0, 50.0, 40.0);

        assert!((line.volume_m3 - 0.2).abs() < 1e-12);
        assert_eq!(line.length_cm, 100.0);
    }

    #[test]
    fn test_volume_from_cm() {
        assert!((volume_from_cm(15.0, 7.5, 0.8) - 0.00009).abs() < 1e-12);
        assert_eq!(volume_from_cm(0.0, 10.0, 10.0), 0.0);
    }
}
