//! Ledger classification and summary.
//!
//! This module classifies every merged day, folds the ledger into an
//! [`AttendanceSummary`], and converts leave taken beyond the accrued
//! balance into loss of pay.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::AttendancePolicy;
use crate::models::{AttendanceStatus, AttendanceSummary, AuditStep, ClassifiedDay, StatusCounts};

use super::classification::{classification_audit_step, classify_day};
use super::leave_merge::{MAX_DAILY_HOURS, MergedEntry};

/// Default hours deducted per loss-of-pay day (9).
pub const LOP_HOURS_PER_DAY: Decimal = Decimal::from_parts(9, 0, 0, false, 0);

/// Default leave credit consumed by a half day (0.5).
pub const HALF_DAY_LEAVE_WEIGHT: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// The classified ledger and its summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryOutcome {
    /// One classified row per merged day, in date order.
    pub days: Vec<ClassifiedDay>,
    /// Aggregate figures.
    pub summary: AttendanceSummary,
    /// Classification, balance and reclassification steps.
    pub audit_steps: Vec<AuditStep>,
}

/// Classifies the merged days and derives the summary.
///
/// # Arguments
///
/// * `merged` - Merged days, in chronological order
/// * `accrued_leaves` - Leave credit available as of the report date
/// * `policy` - Thresholds and constants
/// * `step_number` - The first audit step number to use
///
/// # Behavior
///
/// - `leaves_requested = leave days + half_day_leave_weight * half days`
/// - Anything requested beyond `accrued_leaves` is excess: it is added to
///   `lop_days` and `leaves_taken` is capped at the balance
/// - `lop_days = absences + excess`, `lop_hours = lop_days * lop_hours_per_day`
/// - `floor(excess)` leave days (at most all of them) are converted to
///   [`AttendanceStatus::Absent`] with `loss_of_pay` set, latest first, so
///   the earliest leave keeps its credit
/// - Status counts describe the ledger after conversion, so every Absent
///   row is a whole day of `lop_days`; a fractional remainder of excess
///   appears only in `lop_days`
/// - Hours are clamped to `0..=MAX_DAILY_HOURS` before classification
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::{merge_leave_into_entries, summarize};
/// use attendance_engine::config::AttendancePolicy;
/// use attendance_engine::models::{AttendanceStatus, LeaveRequest};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let d = |day| NaiveDate::from_ymd_opt(2023, 4, day).unwrap();
/// let leaves = vec![LeaveRequest::new(d(10), d(12), "Trip")];
/// let merge = merge_leave_into_entries(&[], &leaves);
///
/// let outcome = summarize(&merge.entries, Decimal::new(2, 0), &AttendancePolicy::default(), 1);
/// assert_eq!(outcome.summary.leaves_taken, Decimal::new(2, 0));
/// assert_eq!(outcome.summary.lop_days, Decimal::ONE);
/// assert_eq!(outcome.days[2].status, AttendanceStatus::Absent); // 12 April converts
/// ```
pub fn summarize(
    merged: &[MergedEntry],
    accrued_leaves: Decimal,
    policy: &AttendancePolicy,
    step_number: u32,
) -> SummaryOutcome {
    let mut audit_steps = Vec::with_capacity(merged.len() + 2);
    let mut step_number = step_number;
    let mut days = Vec::with_capacity(merged.len());

    for entry in merged {
        let hours = entry.hours.clamp(Decimal::ZERO, MAX_DAILY_HOURS);
        let status = classify_day(entry.date, hours, entry.is_leave_day, policy);
        audit_steps.push(classification_audit_step(
            entry.date,
            hours,
            entry.is_leave_day,
            status,
            policy,
            step_number,
        ));
        step_number += 1;

        days.push(ClassifiedDay {
            date: entry.date,
            hours,
            status,
            task: entry.task.clone(),
            is_leave_day: entry.is_leave_day,
            loss_of_pay: status == AttendanceStatus::Absent,
        });
    }

    let classified = StatusCounts::tally(days.iter().map(|day| day.status));
    let total_hours: Decimal = days.iter().map(|day| day.hours).sum();

    let leaves_requested = Decimal::from(classified.leave)
        + policy.half_day_leave_weight * Decimal::from(classified.half_day);
    let excess = (leaves_requested - accrued_leaves).max(Decimal::ZERO);
    let leaves_taken = leaves_requested - excess;
    let leaves_remaining = (accrued_leaves - leaves_taken).max(Decimal::ZERO);
    let lop_days = Decimal::from(classified.absent) + excess;
    let lop_hours = lop_days * policy.lop_hours_per_day;

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "leave_balance".to_string(),
        rule_name: "Leave Balance".to_string(),
        policy_ref: "half_day_leave_weight, lop_hours_per_day".to_string(),
        input: serde_json::json!({
            "leave_days": classified.leave,
            "half_days": classified.half_day,
            "absent_days": classified.absent,
            "accrued_leaves": accrued_leaves.normalize().to_string()
        }),
        output: serde_json::json!({
            "leaves_taken": leaves_taken.normalize().to_string(),
            "leaves_remaining": leaves_remaining.normalize().to_string(),
            "lop_days": lop_days.normalize().to_string(),
            "lop_hours": lop_hours.normalize().to_string()
        }),
        reasoning: format!(
            "{} leave requested against {} accrued; {} beyond the balance becomes loss of pay",
            leaves_requested.normalize(),
            accrued_leaves.normalize(),
            excess.normalize()
        ),
    });
    step_number += 1;

    if excess > Decimal::ZERO {
        let converted = convert_excess_leave(&mut days, excess);
        audit_steps.push(AuditStep {
            step_number,
            rule_id: "lop_reclassification".to_string(),
            rule_name: "Excess Leave Reclassification".to_string(),
            policy_ref: "latest leave days convert first".to_string(),
            input: serde_json::json!({
                "excess": excess.normalize().to_string()
            }),
            output: serde_json::json!({
                "converted_dates": converted.iter().map(|d| d.to_string()).collect::<Vec<_>>()
            }),
            reasoning: format!(
                "{} leave days beyond the accrued balance marked as loss of pay, latest first",
                converted.len()
            ),
        });
    }

    let summary = AttendanceSummary {
        counts: StatusCounts::tally(days.iter().map(|day| day.status)),
        total_hours,
        available_leave_balance: accrued_leaves,
        leaves_taken,
        leaves_remaining,
        lop_days,
        lop_hours,
    };

    SummaryOutcome {
        days,
        summary,
        audit_steps,
    }
}

/// Converts whole days of `excess` from leave to loss of pay, latest first.
///
/// Returns the converted dates in chronological order.
fn convert_excess_leave(days: &mut [ClassifiedDay], excess: Decimal) -> Vec<NaiveDate> {
    let mut remaining = excess;
    let mut converted = Vec::new();

    for day in days
        .iter_mut()
        .rev()
        .filter(|day| day.status == AttendanceStatus::Leave)
    {
        if remaining < Decimal::ONE {
            break;
        }
        day.status = AttendanceStatus::Absent;
        day.loss_of_pay = true;
        converted.push(day.date);
        remaining -= Decimal::ONE;
    }

    converted.reverse();
    converted
}
