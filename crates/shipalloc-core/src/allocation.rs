//! 分配結果模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::container::ContainerSlot;
use crate::purchase_order::{PoLineKey, PurchaseOrderLine};

/// 輸出表欄位（順序固定）
pub const OUTPUT_COLUMNS: [&str; 32] = [
    "PO Number",
    "PO Line Number",
    "SKU",
    "Product Name",
    "Product Family",
    "IsElectronic",
    "From Port",
    "To Port",
    "Export ETA",
    "Import ETA",
    "Volume (m3)",
    "Weight (kg)",
    "COGS",
    "Priority Level",
    "Unmet Penalty Rate",
    "Shipment ID",
    "Base Shipment ID",
    "Carrier",
    "Container Type",
    "Max Volume (m³)",
    "Max Weight (kg)",
    "Price (USD)",
    "Departure Date",
    "Arrival Date",
    "Qty Assigned",
    "COGS Value Assigned",
    "Late Days",
    "Late Penalty",
    "Used Container",
    "Unmet Qty",
    "COGS Value Unmet",
    "Unmet Penalty",
];

/// 分配記錄（PO 行 → 艙位）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// PO 行索引
    pub po_index: usize,

    /// 艙位索引
    pub slot_index: usize,

    /// PO 行識別鍵
    pub key: PoLineKey,

    /// 艙位ID
    pub shipment_id: String,

    /// 分配數量
    pub quantity: u32,

    /// 遲到天數
    pub late_days: u32,

    /// 遲到罰金
    pub late_penalty: Decimal,

    /// 已分配銷貨成本
    pub cogs_value: Decimal,

    /// 是否為該艙位在輸出中第一次出現（用於計算使用貨櫃數）
    pub used_container: bool,
}

/// 未滿足需求記錄
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnmetRecord {
    /// PO 行索引
    pub po_index: usize,

    /// PO 行識別鍵
    pub key: PoLineKey,

    /// 未滿足數量
    pub quantity: u32,

    /// 未滿足罰金
    pub unmet_penalty: Decimal,

    /// 未滿足銷貨成本
    pub cogs_value: Decimal,
}

/// 輸出表的一列（分配或未滿足）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRow {
    #[serde(rename = "PO Number")]
    pub po_number: String,
    #[serde(rename = "PO Line Number")]
    pub line_number: u32,
    #[serde(rename = "SKU")]
    pub sku: String,
    #[serde(rename = "Product Name")]
    pub product_name: String,
    #[serde(rename = "Product Family")]
    pub product_family: String,
    #[serde(rename = "IsElectronic")]
    pub is_electronic: u8,
    #[serde(rename = "From Port")]
    pub from_port: String,
    #[serde(rename = "To Port")]
    pub to_port: String,
    #[serde(rename = "Export ETA")]
    pub export_eta: NaiveDate,
    #[serde(rename = "Import ETA")]
    pub import_eta: NaiveDate,
    #[serde(rename = "Volume (m3)")]
    pub volume_m3: f64,
    #[serde(rename = "Weight (kg)")]
    pub weight_kg: f64,
    #[serde(rename = "COGS")]
    pub cogs: Decimal,
    #[serde(rename = "Priority Level")]
    pub priority_level: u32,
    #[serde(rename = "Unmet Penalty Rate")]
    pub unmet_penalty_rate: Decimal,
    #[serde(rename = "Shipment ID")]
    pub shipment_id: Option<String>,
    #[serde(rename = "Base Shipment ID")]
    pub base_shipment_id: Option<String>,
    #[serde(rename = "Carrier")]
    pub carrier: Option<String>,
    #[serde(rename = "Container Type")]
    pub container_type: Option<String>,
    #[serde(rename = "Max Volume (m³)")]
    pub max_volume_m3: Option<f64>,
    #[serde(rename = "Max Weight (kg)")]
    pub max_weight_kg: Option<f64>,
    #[serde(rename = "Price (USD)")]
    pub price: Option<Decimal>,
    #[serde(rename = "Departure Date")]
    pub departure_date: Option<NaiveDate>,
    #[serde(rename = "Arrival Date")]
    pub arrival_date: Option<NaiveDate>,
    #[serde(rename = "Qty Assigned")]
    pub qty_assigned: u32,
    #[serde(rename = "COGS Value Assigned")]
    pub cogs_value_assigned: Decimal,
    #[serde(rename = "Late Days")]
    pub late_days: Option<u32>,
    #[serde(rename = "Late Penalty")]
    pub late_penalty: Option<Decimal>,
    #[serde(rename = "Used Container")]
    pub used_container: u8,
    #[serde(rename = "Unmet Qty")]
    pub unmet_qty: u32,
    #[serde(rename = "COGS Value Unmet")]
    pub cogs_value_unmet: Decimal,
    #[serde(rename = "Unmet Penalty")]
    pub unmet_penalty: Decimal,
}

impl AllocationRow {
    /// 只含 PO 行欄位的空白列
    fn for_line(po: &PurchaseOrderLine) -> Self {
        Self {
            po_number: po.po_number.clone(),
            line_number: po.line_number,
            sku: po.sku.clone(),
            product_name: po.product_name.clone(),
            product_family: po.product_family.clone(),
            is_electronic: u8::from(po.is_electronic),
            from_port: po.from_port.clone(),
            to_port: po.to_port.clone(),
            export_eta: po.export_eta,
            import_eta: po.import_eta,
            volume_m3: po.volume_m3,
            weight_kg: po.weight_kg,
            cogs: po.cogs,
            priority_level: po.priority_level,
            unmet_penalty_rate: po.unmet_penalty,
            shipment_id: None,
            base_shipment_id: None,
            carrier: None,
            container_type: None,
            max_volume_m3: None,
            max_weight_kg: None,
            price: None,
            departure_date: None,
            arrival_date: None,
            qty_assigned: 0,
            cogs_value_assigned: Decimal::ZERO,
            late_days: None,
            late_penalty: None,
            used_container: 0,
            unmet_qty: 0,
            cogs_value_unmet: Decimal::ZERO,
            unmet_penalty: Decimal::ZERO,
        }
    }

    /// 由分配記錄建立輸出列
    pub fn assigned(po: &PurchaseOrderLine, slot: &ContainerSlot, assignment: &Assignment) -> Self {
        Self {
            shipment_id: Some(slot.shipment_id.clone()),
            base_shipment_id: Some(slot.base_shipment_id.clone()),
            carrier: Some(slot.carrier.clone()),
            container_type: Some(slot.container_type.clone()),
            max_volume_m3: Some(slot.max_volume_m3),
            max_weight_kg: Some(slot.max_weight_kg),
            price: Some(slot.price),
            departure_date: Some(slot.departure_date),
            arrival_date: Some(slot.arrival_date),
            qty_assigned: assignment.quantity,
            cogs_value_assigned: assignment.cogs_value,
            late_days: Some(assignment.late_days),
            late_penalty: Some(assignment.late_penalty),
            used_container: u8::from(assignment.used_container),
            ..Self::for_line(po)
        }
    }

    /// 由未滿足記錄建立輸出列
    pub fn unmet(po: &PurchaseOrderLine, record: &UnmetRecord) -> Self {
        Self {
            unmet_qty: record.quantity,
            cogs_value_unmet: record.cogs_value,
            unmet_penalty: record.unmet_penalty,
            ..Self::for_line(po)
        }
    }

    /// PO 行識別鍵
    pub fn key(&self) -> PoLineKey {
        PoLineKey {
            po_number: self.po_number.clone(),
            line_number: self.line_number,
        }
    }

    /// 是否為未滿足列
    pub fn is_unmet_row(&self) -> bool {
        self.shipment_id.is_none()
    }
}
