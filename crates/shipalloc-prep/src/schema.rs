//! 輸入表欄位定義

pub const PO_NUMBER: &str = "PO Number";
pub const PO_LINE_NUMBER: &str = "PO Line Number";
pub const SKU: &str = "SKU";
pub const PRODUCT_NAME: &str = "Product Name";
pub const PRODUCT_FAMILY: &str = "Product Family";
pub const IS_ELECTRONIC: &str = "IsElectronic";
pub const COGS: &str = "COGS";
pub const FROM_PORT: &str = "From Port";
pub const TO_PORT: &str = "To Port";
pub const EXPORT_ETA: &str = "Export ETA";
pub const IMPORT_ETA: &str = "Import ETA";
pub const TO_BE_SHIPPED_QUANTITY: &str = "To Be Shipped Quantity";
pub const LENGTH_CM: &str = "Length (cm)";
pub const WIDTH_CM: &str = "Width (cm)";
pub const HEIGHT_CM: &str = "Height (cm)";
pub const WEIGHT_KG: &str = "Weight (kg)";
pub const PRIORITY_LEVEL: &str = "Priority Level";
pub const UNMET_PENALTY: &str = "Unmet Penalty";

pub const WEEK_YEAR: &str = "Week_Year";
pub const CARRIER: &str = "Carrier";
pub const CONTAINER_TYPE: &str = "Container Type";
pub const AVAILABLE_UNITS: &str = "Available Units";
pub const MAX_VOLUME_M3: &str = "Max Volume (m³)";
pub const MAX_WEIGHT_KG: &str = "Max Weight (kg)";
pub const TRANSIT_DAYS: &str = "Estimated Transit Time (days)";
pub const PRICE_USD: &str = "Price (USD)";

/// 採購訂單表欄位與型別說明（範本用）
pub const PO_COLUMNS: [(&str, &str); 18] = [
    (PO_NUMBER, "str"),
    (PO_LINE_NUMBER, "int"),
    (SKU, "str"),
    (PRODUCT_NAME, "str"),
    (PRODUCT_FAMILY, "str"),
    (IS_ELECTRONIC, "int (0 or 1)"),
    (COGS, "float"),
    (FROM_PORT, "str"),
    (TO_PORT, "str"),
    (EXPORT_ETA, "date (DD/MM/YYYY)"),
    (IMPORT_ETA, "date (DD/MM/YYYY)"),
    (TO_BE_SHIPPED_QUANTITY, "int"),
    (LENGTH_CM, "float"),
    (WIDTH_CM, "float"),
    (HEIGHT_CM, "float"),
    (WEIGHT_KG, "float"),
    (PRIORITY_LEVEL, "int"),
    (UNMET_PENALTY, "float"),
];

/// 運能表欄位與型別說明（範本用）
pub const CAPACITY_COLUMNS: [(&str, &str); 10] = [
    (WEEK_YEAR, "str (e.g. 2025-W25)"),
    (FROM_PORT, "str"),
    (TO_PORT, "str"),
    (CARRIER, "str"),
    (CONTAINER_TYPE, "str"),
    (AVAILABLE_UNITS, "int (optional, default 1)"),
    (MAX_VOLUME_M3, "float"),
    (MAX_WEIGHT_KG, "float"),
    (TRANSIT_DAYS, "int"),
    (PRICE_USD, "float"),
];

/// 採購訂單表必要欄位
pub fn required_po_columns() -> Vec<&'static str> {
    PO_COLUMNS.iter().map(|(name, _)| *name).collect()
}

/// 運能表必要欄位（Available Units 可省略）
pub fn required_capacity_columns() -> Vec<&'static str> {
    CAPACITY_COLUMNS
        .iter()
        .map(|(name, _)| *name)
        .filter(|name| *name != AVAILABLE_UNITS)
        .collect()
}

/// 產生只有表頭與一行範例的 CSV 範本
pub fn po_template_csv() -> String {
    let header = required_po_columns().join(",");
    format!(
        "{header}\nPO001,1,SKU1001,Smartphone X,Electronics,1,250,HK,LA,15/06/2025,25/06/2025,10,15.0,7.5,0.8,0.2,2,1000\n"
    )
}

/// 運能表 CSV 範本
pub fn capacity_template_csv() -> String {
    let header = CAPACITY_COLUMNS
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(",");
    format!("{header}\n2025-W25,HK,LA,Maersk,40FT,3,66.0,26500.0,10,3000.0\n")
}
