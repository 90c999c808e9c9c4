//! 原始表格讀取（CSV）與欄位型別轉換

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shipalloc_core::calendar::parse_dmy_date;
use shipalloc_core::{AllocError, Result};

/// 原始表格：表頭 + 字串儲存格
#[derive(Debug, Clone)]
pub struct RawTable {
    /// 表名（用於錯誤訊息）
    name: String,

    /// 表頭
    headers: Vec<String>,

    /// 表頭 → 欄位索引
    index: HashMap<String, usize>,

    /// 資料列
    rows: Vec<RawRow>,
}

/// 原始資料列
#[derive(Debug, Clone)]
pub struct RawRow {
    /// 檔案行號（表頭為第 1 行）
    pub line: usize,

    /// 儲存格（已去除前後空白）
    pub cells: Vec<String>,
}

impl RawTable {
    /// 從記憶體資料建立表格
    pub fn new(name: &str, headers: Vec<String>, rows: Vec<RawRow>) -> Self {
        let index = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), i))
            .collect();

        Self {
            name: name.to_string(),
            headers,
            index,
            rows,
        }
    }

    /// 從任意讀取器讀取 CSV
    pub fn from_reader<R: Read>(name: &str, reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允許行長度不一致
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()
            .map_err(csv_error)?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            let record = result.map_err(csv_error)?;
            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(row_idx + 2);

            let cells: Vec<String> = record.iter().map(|v| v.trim().to_string()).collect();

            // 跳過完全空白的行
            if cells.iter().all(|v| v.is_empty()) {
                continue;
            }

            rows.push(RawRow { line, cells });
        }

        tracing::debug!("讀取表格 {}: {} 欄, {} 列", name, headers.len(), rows.len());

        Ok(Self::new(name, headers, rows))
    }

    /// 從檔案讀取 CSV
    pub fn from_path(name: &str, path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .map_err(|e| AllocError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_reader(name, file)
    }

    /// 表名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 表頭
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// 資料列數
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 是否含有指定欄位
    pub fn has_column(&self, column: &str) -> bool {
        self.index.contains_key(column)
    }

    /// 檢查必要欄位，一次列出所有缺少的欄位
    pub fn require_columns(&self, required: &[&str]) -> Result<()> {
        let mut missing: Vec<String> = required
            .iter()
            .filter(|c| !self.has_column(c))
            .map(|c| c.to_string())
            .collect();

        if missing.is_empty() {
            return Ok(());
        }

        missing.sort();
        Err(AllocError::MissingColumns {
            table: self.name.clone(),
            columns: missing,
        })
    }

    /// 逐列檢視
    pub fn rows(&self) -> impl Iterator<Item = RowView<'_>> {
        self.rows.iter().map(move |row| RowView { table: self, row })
    }
}

/// 單列檢視，提供型別轉換
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    table: &'a RawTable,
    row: &'a RawRow,
}

impl<'a> RowView<'a> {
    /// 檔案行號
    pub fn line(&self) -> usize {
        self.row.line
    }

    /// 取得儲存格；欄位不存在時回傳 None，行長度不足時視為空字串
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let idx = *self.table.index.get(column)?;
        Some(self.row.cells.get(idx).map(String::as_str).unwrap_or(""))
    }

    fn invalid(&self, column: &str, value: &str, reason: &str) -> AllocError {
        AllocError::InvalidField {
            table: self.table.name.clone(),
            row: self.row.line,
            column: column.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    fn required(&self, column: &str) -> Result<&'a str> {
        let value = self
            .get(column)
            .ok_or_else(|| self.invalid(column, "", "欄位不存在"))?;
        if value.is_empty() {
            return Err(self.invalid(column, value, "不可為空"));
        }
        Ok(value)
    }

    /// 字串欄位（可為空）
    pub fn string(&self, column: &str) -> Result<String> {
        self.get(column)
            .map(str::to_string)
            .ok_or_else(|| self.invalid(column, "", "欄位不存在"))
    }

    /// 必填字串欄位
    pub fn required_string(&self, column: &str) -> Result<String> {
        self.required(column).map(str::to_string)
    }

    /// 非負整數
    pub fn u32(&self, column: &str) -> Result<u32> {
        let value = self.required(column)?;
        parse_integer(value).ok_or_else(|| self.invalid(column, value, "需要非負整數"))
    }

    /// 選填非負整數（欄位不存在或為空時回傳 None）
    pub fn optional_u32(&self, column: &str) -> Result<Option<u32>> {
        match self.get(column) {
            None | Some("") => Ok(None),
            Some(value) => parse_integer(value)
                .map(Some)
                .ok_or_else(|| self.invalid(column, value, "需要非負整數")),
        }
    }

    /// 非負浮點數
    pub fn non_negative_f64(&self, column: &str) -> Result<f64> {
        let value = self.required(column)?;
        let parsed: f64 = value
            .parse()
            .map_err(|_| self.invalid(column, value, "需要數值"))?;
        if !parsed.is_finite() || parsed < 0.0 {
            return Err(self.invalid(column, value, "需要非負的有限數值"));
        }
        Ok(parsed)
    }

    /// 非負金額
    pub fn non_negative_decimal(&self, column: &str) -> Result<Decimal> {
        let value = self.required(column)?;
        let parsed = Decimal::from_str(value)
            .or_else(|_| Decimal::from_scientific(value))
            .map_err(|_| self.invalid(column, value, "需要數值"))?;
        if parsed < Decimal::ZERO {
            return Err(self.invalid(column, value, "不可為負數"));
        }
        Ok(parsed)
    }

    /// 0/1 旗標
    pub fn flag(&self, column: &str) -> Result<bool> {
        let value = self.required(column)?;
        match parse_integer(value) {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(self.invalid(column, value, "需要 0 或 1")),
        }
    }

    /// 日/月/年日期
    pub fn dmy_date(&self, column: &str) -> Result<NaiveDate> {
        let value = self.required(column)?;
        parse_dmy_date(value).ok_or_else(|| self.invalid(column, value, "需要 DD/MM/YYYY 日期"))
    }
}

/// 解析整數，允許 `5.0` 這類整數值的浮點表示
fn parse_integer(value: &str) -> Option<u32> {
    if let Ok(v) = value.parse::<u32>() {
        return Some(v);
    }
    let float: f64 = value.parse().ok()?;
    if float.fract() == 0.0 && float >= 0.0 && float <= f64::from(u32::MAX) {
        Some(float as u32)
    } else {
        None
    }
}

fn csv_error(err: csv::Error) -> AllocError {
    AllocError::Csv(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SAMPLE: &str = "\u{feff}Name , Qty,Price,Flag,Date\n\
                          a, 5 ,1.50,1,15/06/2025\n\
                          ,,,,\n\
                          b,7.0,2,0,01/01/2025\n\
                          c,-1,x,2,2025-01-01\n";

    #[test]
    fn test_from_reader_trims_headers_and_skips_blank_rows() {
        let table = RawTable::from_reader("TEST", SAMPLE.as_bytes()).unwrap();

        assert_eq!(table.headers(), &["Name", "Qty", "Price", "Flag", "Date"]);
        assert_eq!(table.len(), 3);

        let lines: Vec<usize> = table.rows().map(|r| r.line()).collect();
        assert_eq!(lines, vec![2, 4, 5]);
    }

    #[test]
    fn test_typed_accessors() {
        let table = RawTable::from_reader("TEST", SAMPLE.as_bytes()).unwrap();
        let rows: Vec<RowView<'_>> = table.rows().collect();

        assert_eq!(rows[0].string("Name").unwrap(), "a");
        assert_eq!(rows[0].u32("Qty").unwrap(), 5);
        assert_eq!(rows[0].non_negative_decimal("Price").unwrap(), Decimal::new(150, 2));
        assert!(rows[0].flag("Flag").unwrap());
        assert_eq!(
            rows[0].dmy_date("Date").unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
        );
        assert_eq!(rows[1].u32("Qty").unwrap(), 7);
        assert!(!rows[1].flag("Flag").unwrap());
    }

    #[test]
    fn test_invalid_values_report_row_and_column() {
        let table = RawTable::from_reader("TEST", SAMPLE.as_bytes()).unwrap();
        let bad = table.rows().nth(2).unwrap();

        match bad.u32("Qty").unwrap_err() {
            AllocError::InvalidField { table, row, column, value, .. } => {
                assert_eq!(table, "TEST");
                assert_eq!(row, 5);
                assert_eq!(column, "Qty");
                assert_eq!(value, "-1");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(bad.non_negative_decimal("Price").is_err());
        assert!(bad.flag("Flag").is_err());
        assert!(bad.dmy_date("Date").is_err());
    }

    #[test]
    fn test_require_columns_lists_all_missing() {
        let table = RawTable::from_reader("TEST", SAMPLE.as_bytes()).unwrap();

        assert!(table.require_columns(&["Name", "Qty"]).is_ok());
        match table.require_columns(&["Weight", "Name", "Carrier"]).unwrap_err() {
            AllocError::MissingColumns { table, columns } => {
                assert_eq!(table, "TEST");
                assert_eq!(columns, vec!["Carrier".to_string(), "Weight".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_optional_u32() {
        let table = RawTable::from_reader("TEST", "A,B\n3,\n".as_bytes()).unwrap();
        let row = table.rows().next().unwrap();

        assert_eq!(row.optional_u32("A").unwrap(), Some(3));
        assert_eq!(row.optional_u32("B").unwrap(), None);
        assert_eq!(row.optional_u32("Missing").unwrap(), None);
    }

    #[rstest]
    #[case("5", Some(5))]
    #[case(" 12 ", None)]
    #[case("7.0", Some(7))]
    #[case("7.5", None)]
    #[case("-1", None)]
    #[case("abc", None)]
    fn test_parse_integer(#[case] value: &str, #[case] expected: Option<u32>) {
        assert_eq!(parse_integer(value), expected);
    }
}
