//! 日曆工具：週次標記解析、日/月/年日期解析、遲到天數

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::{AllocError, Result};

/// 採購訂單日期格式（日/月/年）
pub const PO_DATE_FORMAT: &str = "%d/%m/%Y";

/// 週次編號規則
///
/// 兩種規則都以週一作為一週的第一天，差別在於年初不完整的週如何計算。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekNumbering {
    /// ISO-8601 週日期：第 1 週為包含該年第一個週四的那一週（週次 1..=52/53）
    #[default]
    Iso,

    /// strftime `%W` 規則：該年第一個週一開始第 1 週，之前的天數屬於第 0 週（週次 0..=53）
    MondayFirst,
}

impl WeekNumbering {
    /// 取得指定年份、週次的週一日期
    pub fn monday_of(&self, year: i32, week: u32) -> Option<NaiveDate> {
        match self {
            WeekNumbering::Iso => NaiveDate::from_isoywd_opt(year, week, Weekday::Mon),
            WeekNumbering::MondayFirst => {
                if week > 53 {
                    return None;
                }
                let jan_first = NaiveDate::from_ymd_opt(year, 1, 1)?;
                let offset = (7 - jan_first.weekday().num_days_from_monday()) % 7;
                let first_monday = jan_first + Duration::days(i64::from(offset));
                first_monday.checked_add_signed(Duration::weeks(i64::from(week) - 1))
            }
        }
    }
}

/// 解析週次標記（例如 `2025-W25`），回傳該週的週一
///
/// # 範例
/// ```
/// use shipalloc_core::calendar::parse_week_year;
/// use shipalloc_core::WeekNumbering;
///
/// let date = parse_week_year("2025-W25", WeekNumbering::Iso).unwrap();
/// assert_eq!(date.to_string(), "2025-06-16");
/// ```
pub fn parse_week_year(token: &str, numbering: WeekNumbering) -> Result<NaiveDate> {
    let invalid = || AllocError::InvalidWeekYear(token.to_string());

    let trimmed = token.trim();
    let (year_part, week_part) = trimmed
        .split_once("-W")
        .or_else(|| trimmed.split_once("-w"))
        .ok_or_else(invalid)?;

    if year_part.len() != 4 || week_part.is_empty() || week_part.len() > 2 {
        return Err(invalid());
    }
    if !year_part.chars().all(|c| c.is_ascii_digit())
        || !week_part.chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid());
    }

    let year: i32 = year_part.parse().map_err(|_| invalid())?;
    let week: u32 = week_part.parse().map_err(|_| invalid())?;

    numbering.monday_of(year, week).ok_or_else(invalid)
}

/// 解析日/月/年格式日期
pub fn parse_dmy_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), PO_DATE_FORMAT).ok()
}

/// 遲到天數 = max(0, 抵達日 - 進口預計到達日)
pub fn late_days(arrival_date: NaiveDate, import_eta: NaiveDate) -> u32 {
    let days = (arrival_date - import_eta).num_days();
    u32::try_from(days.max(0)).unwrap_or(u32::MAX)
}
