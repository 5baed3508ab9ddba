//! Timesheet entry model.
//!
//! A [`DailyEntry`] is one real day of logged work. Persisted entries are
//! read leniently: the hours field accepts numbers and numeric strings, and
//! anything else reads as zero hours.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One day of logged work for an employee.
///
/// # Example
///
/// ```
/// use attendance_engine::models::DailyEntry;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let entry: DailyEntry = serde_json::from_str(
///     r#"{"date": "2023-04-03", "hours": 9, "task": "API review"}"#,
/// ).unwrap();
/// assert_eq!(entry.date, NaiveDate::from_ymd_opt(2023, 4, 3).unwrap());
/// assert_eq!(entry.hours, Decimal::new(9, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyEntry {
    /// The calendar date worked.
    pub date: NaiveDate,
    /// Hours logged that day.
    #[serde(default, deserialize_with = "deserialize_lenient_hours")]
    pub hours: Decimal,
    /// Free-text task label, for display only.
    #[serde(default)]
    pub task: String,
}

impl DailyEntry {
    /// Creates a new entry.
    pub fn new(date: NaiveDate, hours: Decimal, task: impl Into<String>) -> Self {
        Self {
            date,
            hours,
            task: task.into(),
        }
    }

    /// Returns the logged hours with negative values clamped to zero.
    pub fn worked_hours(&self) -> Decimal {
        self.hours.max(Decimal::ZERO)
    }
}

fn deserialize_lenient_hours<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(hours_from_value)
        .unwrap_or(Decimal::ZERO))
}

fn hours_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => parse_decimal(&number.to_string()),
        Value::String(text) => parse_decimal(text.trim()),
        _ => None,
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}
