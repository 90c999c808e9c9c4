//! 貨櫃艙位模型

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 貨櫃艙位（一個實體貨櫃）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerSlot {
    /// 艙位ID（`{base}-{i}`）
    pub shipment_id: String,

    /// 基礎艙位ID（同一筆運能資料展開的艙位共用）
    pub base_shipment_id: String,

    /// 週次標記（例如 `2025-W25`）
    pub week_year: String,

    /// 起運港
    pub from_port: String,

    /// 目的港
    pub to_port: String,

    /// 承運商
    pub carrier: String,

    /// 櫃型
    pub container_type: String,

    /// 開航日
    pub departure_date: NaiveDate,

    /// 運輸天數
    pub transit_days: u32,

    /// 抵達日（開航日 + 運輸天數）
    pub arrival_date: NaiveDate,

    /// 最大體積（m³）
    pub max_volume_m3: f64,

    /// 最大重量（kg）
    pub max_weight_kg: f64,

    /// 價格（USD）
    pub price: Decimal,
}

impl ContainerSlot {
    /// 創建新的艙位，抵達日由開航日與運輸天數推算
    pub fn new(
        shipment_id: String,
        base_shipment_id: String,
        from_port: String,
        to_port: String,
        departure_date: NaiveDate,
        transit_days: u32,
    ) -> Self {
        Self {
            shipment_id,
            base_shipment_id,
            week_year: String::new(),
            from_port,
            to_port,
            carrier: String::new(),
            container_type: String::new(),
            departure_date,
            transit_days,
            arrival_date: arrival_from(departure_date, transit_days),
            max_volume_m3: 0.0,
            max_weight_kg: 0.0,
            price: Decimal::ZERO,
        }
    }

    /// 建構器模式：設置承運商與櫃型
    pub fn with_carrier(mut self, carrier: String, container_type: String) -> Self {
        self.carrier = carrier;
        self.container_type = container_type;
        self
    }

    /// 建構器模式：設置週次標記
    pub fn with_week_year(mut self, week_year: String) -> Self {
        self.week_year = week_year;
        self
    }

    /// 建構器模式：設置容量
    pub fn with_capacity(mut self, max_volume_m3: f64, max_weight_kg: f64) -> Self {
        self.max_volume_m3 = max_volume_m3;
        self.max_weight_kg = max_weight_kg;
        self
    }

    /// 建構器模式：設置價格
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = price;
        self
    }

    /// 建構器模式：直接指定抵達日
    pub fn with_arrival_date(mut self, arrival_date: NaiveDate) -> Self {
        self.arrival_date = arrival_date;
        self
    }

    /// 航線（起運港, 目的港）
    pub fn lane(&self) -> (&str, &str) {
        (&self.from_port, &self.to_port)
    }

    /// 是否能在指定日期之後出貨
    pub fn departs_on_or_after(&self, date: NaiveDate) -> bool {
        self.departure_date >= date
    }
}

/// 基礎艙位ID：`{週次}_{起運港}_{目的港}_{承運商}_{櫃型}`
pub fn base_shipment_id(
    week_year: &str,
    from_port: &str,
    to_port: &str,
    carrier: &str,
    container_type: &str,
) -> String {
    format!("{week_year}_{from_port}_{to_port}_{carrier}_{container_type}")
}

/// 抵達日 = 開航日 + 運輸天數
pub fn arrival_from(departure_date: NaiveDate, transit_days: u32) -> NaiveDate {
    departure_date + Duration::days(i64::from(transit_days))
}
