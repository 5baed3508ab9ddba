//! CSV export of the attendance ledger.

use chrono::NaiveDate;

use crate::models::ClassifiedDay;

/// Header row of the ledger export.
pub const LEDGER_CSV_HEADER: &str = "Date,Task,Hours,Status";

/// Formats a date as `DD/MM/YYYY`.
///
/// # Example
///
/// ```
/// use attendance_engine::export::format_display_date;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2023, 4, 3).unwrap();
/// assert_eq!(format_display_date(date), "03/04/2023");
/// ```
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Flattens a ledger into CSV text, one row per day.
///
/// # Example
///
/// ```
/// use attendance_engine::export::ledger_to_csv;
/// use attendance_engine::models::{AttendanceStatus, ClassifiedDay};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let days = vec![ClassifiedDay {
///     date: NaiveDate::from_ymd_opt(2023, 4, 3).unwrap(),
///     hours: Decimal::new(90, 1),
///     status: AttendanceStatus::Present,
///     task: "Sprint work".to_string(),
///     is_leave_day: false,
///     loss_of_pay: false,
/// }];
///
/// assert_eq!(
///     ledger_to_csv(&days),
///     "Date,Task,Hours,Status\n03/04/2023,Sprint work,9,Present\n"
/// );
/// ```
pub fn ledger_to_csv(days: &[ClassifiedDay]) -> String {
    let mut csv = String::with_capacity(LEDGER_CSV_HEADER.len() + 1 + days.len() * 40);
    csv.push_str(LEDGER_CSV_HEADER);
    csv.push('\n');

    for day in days {
        let row = [
            format_display_date(day.date),
            escape_field(&day.task),
            day.hours.normalize().to_string(),
            day.status.label().to_string(),
        ];
        csv.push_str(&row.join(","));
        csv.push('\n');
    }

    csv
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
