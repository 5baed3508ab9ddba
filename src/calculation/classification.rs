//! Day classification.
//!
//! This module assigns an [`AttendanceStatus`] to a single day. Rules are
//! applied in priority order: leave, then weekend, then hour thresholds.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::config::AttendancePolicy;
use crate::models::{AttendanceStatus, AuditStep};

/// Default hours at or above which a working day counts as present (8.5).
pub const FULL_DAY_THRESHOLD: Decimal = Decimal::from_parts(85, 0, 0, false, 1);

/// Classifies a single day.
///
/// # Arguments
///
/// * `date` - The calendar date
/// * `hours` - Hours logged; negative values are treated as zero
/// * `is_leave_day` - True if the day came from a leave request with no real entry
/// * `policy` - Thresholds and weekend days
///
/// # Behavior
///
/// 1. A leave day is [`AttendanceStatus::Leave`], even on a weekend
/// 2. A weekend day is [`AttendanceStatus::Weekend`], whatever the hours
/// 3. Zero hours is [`AttendanceStatus::Absent`]
/// 4. Fewer hours than the threshold is [`AttendanceStatus::HalfDay`]
/// 5. Otherwise [`AttendanceStatus::Present`]
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::classify_day;
/// use attendance_engine::config::AttendancePolicy;
/// use attendance_engine::models::AttendanceStatus;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let policy = AttendancePolicy::default();
/// let monday = NaiveDate::from_ymd_opt(2023, 4, 3).unwrap();
/// let sunday = NaiveDate::from_ymd_opt(2023, 4, 9).unwrap();
///
/// assert_eq!(classify_day(monday, Decimal::new(9, 0), false, &policy), AttendanceStatus::Present);
/// assert_eq!(classify_day(monday, Decimal::new(6, 0), false, &policy), AttendanceStatus::HalfDay);
/// assert_eq!(classify_day(monday, Decimal::ZERO, false, &policy), AttendanceStatus::Absent);
/// assert_eq!(classify_day(sunday, Decimal::ZERO, false, &policy), AttendanceStatus::Weekend);
/// assert_eq!(classify_day(sunday, Decimal::ZERO, true, &policy), AttendanceStatus::Leave);
/// ```
pub fn classify_day(
    date: NaiveDate,
    hours: Decimal,
    is_leave_day: bool,
    policy: &AttendancePolicy,
) -> AttendanceStatus {
    let hours = hours.max(Decimal::ZERO);

    if is_leave_day {
        AttendanceStatus::Leave
    } else if policy.is_weekend(date.weekday()) {
        AttendanceStatus::Weekend
    } else if hours.is_zero() {
        AttendanceStatus::Absent
    } else if hours < policy.full_day_threshold_hours {
        AttendanceStatus::HalfDay
    } else {
        AttendanceStatus::Present
    }
}

/// Builds the audit step recording one classification.
pub(crate) fn classification_audit_step(
    date: NaiveDate,
    hours: Decimal,
    is_leave_day: bool,
    status: AttendanceStatus,
    policy: &AttendancePolicy,
    step_number: u32,
) -> AuditStep {
    let threshold = policy.full_day_threshold_hours.normalize();
    let reasoning = match status {
        AttendanceStatus::Leave => format!("{} is covered by a leave request", date),
        AttendanceStatus::Weekend => format!("{} falls on a {}", date, date.weekday()),
        AttendanceStatus::Absent => format!("No hours logged on working day {}", date),
        AttendanceStatus::HalfDay => format!(
            "{} hours is under the {} hour full-day threshold",
            hours.normalize(),
            threshold
        ),
        AttendanceStatus::Present => format!(
            "{} hours meets the {} hour full-day threshold",
            hours.normalize(),
            threshold
        ),
    };

    AuditStep {
        step_number,
        rule_id: "day_classification".to_string(),
        rule_name: "Day Classification".to_string(),
        policy_ref: "full_day_threshold_hours, weekend_days".to_string(),
        input: serde_json::json!({
            "date": date.to_string(),
            "hours": hours.normalize().to_string(),
            "is_leave_day": is_leave_day
        }),
        output: serde_json::json!({
            "status": status.label()
        }),
        reasoning,
    }
}
