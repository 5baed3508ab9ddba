//! Merging leave requests into the timesheet.
//!
//! Each leave request is expanded into one synthetic zero-hour day per
//! calendar date in its range. Real timesheet entries always take
//! precedence: a leave date that already has an entry is skipped.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AuditStep, AuditWarning, DailyEntry, LeaveRequest};

/// Task label prefix for synthetic leave days.
pub const LEAVE_TASK_PREFIX: &str = "On Leave";

/// Most hours a single day can count for (24).
pub const MAX_DAILY_HOURS: Decimal = Decimal::from_parts(24, 0, 0, false, 0);

/// Default longest leave range, in calendar days, accepted for recording (366).
pub const MAX_LEAVE_SPAN_DAYS: u32 = 366;

/// One day of the merged timesheet, ready for classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedEntry {
    /// The calendar date.
    pub date: NaiveDate,
    /// Hours counted for the day, between 0 and [`MAX_DAILY_HOURS`].
    pub hours: Decimal,
    /// Task label.
    pub task: String,
    /// True if synthesized from a leave request.
    pub is_leave_day: bool,
}

impl MergedEntry {
    /// Creates the synthetic entry for a leave date.
    pub fn leave(date: NaiveDate, reason: &str) -> Self {
        let task = if reason.trim().is_empty() {
            LEAVE_TASK_PREFIX.to_string()
        } else {
            format!("{} - {}", LEAVE_TASK_PREFIX, reason.trim())
        };
        Self {
            date,
            hours: Decimal::ZERO,
            task,
            is_leave_day: true,
        }
    }

    fn real(entry: &DailyEntry) -> Self {
        Self {
            date: entry.date,
            hours: entry.worked_hours().min(MAX_DAILY_HOURS),
            task: entry.task.clone(),
            is_leave_day: false,
        }
    }
}

/// The result of merging leave into a timesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveMerge {
    /// Merged days in chronological order, one per date.
    pub entries: Vec<MergedEntry>,
    /// Input anomalies that were tolerated.
    pub warnings: Vec<AuditWarning>,
    /// Leave dates skipped because a real entry exists.
    pub overridden_leave_dates: usize,
}

impl LeaveMerge {
    /// Number of synthetic leave days in the merge.
    pub fn leave_day_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_leave_day).count()
    }

    /// Builds the audit step summarising the merge.
    pub(crate) fn audit_step(&self, step_number: u32) -> AuditStep {
        let leave_days = self.leave_day_count();
        let real_days = self.entries.len() - leave_days;
        AuditStep {
            step_number,
            rule_id: "leave_merge".to_string(),
            rule_name: "Leave Merge".to_string(),
            policy_ref: "real entries take precedence over leave".to_string(),
            input: serde_json::json!({
                "real_entries": real_days,
            }),
            output: serde_json::json!({
                "merged_days": self.entries.len(),
                "leave_days": leave_days,
                "overridden_leave_dates": self.overridden_leave_dates
            }),
            reasoning: format!(
                "{} leave days added alongside {} timesheet days; {} leave dates already had entries",
                leave_days, real_days, self.overridden_leave_dates
            ),
        }
    }
}

/// Merges leave requests into the real timesheet entries.
///
/// # Behavior
///
/// - Every date in each leave range (inclusive) without a real entry becomes
///   a zero-hour entry with `is_leave_day = true`
/// - Real entries are never overridden, even inside a leave range
/// - Inverted ranges (`to_date < from_date`) are skipped with a warning
/// - Negative hours are clamped to zero with a warning
/// - Hours above [`MAX_DAILY_HOURS`] are capped with a warning
/// - Duplicate real dates keep the last entry, with a warning
/// - Overlapping leave ranges produce one leave day per date
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::merge_leave_into_entries;
/// use attendance_engine::models::{DailyEntry, LeaveRequest};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let d = |day| NaiveDate::from_ymd_opt(2023, 4, day).unwrap();
/// let entries = vec![DailyEntry::new(d(11), Decimal::new(9, 0), "Hotfix")];
/// let leaves = vec![LeaveRequest::new(d(10), d(12), "Trip")];
///
/// let merge = merge_leave_into_entries(&entries, &leaves);
/// assert_eq!(merge.entries.len(), 3);
/// assert!(merge.entries[0].is_leave_day);
/// assert!(!merge.entries[1].is_leave_day); // the real entry stands
/// assert_eq!(merge.entries[2].task, "On Leave - Trip");
/// ```
pub fn merge_leave_into_entries(entries: &[DailyEntry], leaves: &[LeaveRequest]) -> LeaveMerge {
    let mut merged: BTreeMap<NaiveDate, MergedEntry> = BTreeMap::new();
    let mut warnings = Vec::new();

    for entry in entries {
        if entry.hours < Decimal::ZERO {
            warnings.push(AuditWarning::warning(
                "NEGATIVE_HOURS_CLAMPED",
                format!(
                    "Entry on {} logged {} hours; counted as 0",
                    entry.date,
                    entry.hours.normalize()
                ),
            ));
        }
        if entry.hours > MAX_DAILY_HOURS {
            warnings.push(AuditWarning::warning(
                "DAILY_HOURS_CAPPED",
                format!(
                    "Entry on {} logged {} hours; counted as {}",
                    entry.date,
                    entry.hours.normalize(),
                    MAX_DAILY_HOURS
                ),
            ));
        }
        if merged.insert(entry.date, MergedEntry::real(entry)).is_some() {
            warnings.push(AuditWarning::warning(
                "DUPLICATE_ENTRY_DATE",
                format!("More than one entry for {}; the last one was kept", entry.date),
            ));
        }
    }

    let mut overridden_leave_dates = 0;
    for leave in leaves {
        if leave.is_inverted() {
            warnings.push(AuditWarning::warning(
                "INVERTED_LEAVE_RANGE",
                format!(
                    "Leave from {} to {} ends before it starts; ignored",
                    leave.from_date, leave.to_date
                ),
            ));
            continue;
        }

        for date in leave.dates() {
            match merged.get(&date) {
                Some(existing) if !existing.is_leave_day => overridden_leave_dates += 1,
                Some(_) => {}
                None => {
                    merged.insert(date, MergedEntry::leave(date, &leave.reason));
                }
            }
        }
    }

    LeaveMerge {
        entries: merged.into_values().collect(),
        warnings,
        overridden_leave_dates,
    }
}
