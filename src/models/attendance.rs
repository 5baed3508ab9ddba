//! Attendance ledger models.
//!
//! This module contains the per-day [`ClassifiedDay`] rows produced by the
//! engine and the [`AttendanceSummary`] folded from them.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The attendance status assigned to a single day.
///
/// # Example
///
/// ```
/// use attendance_engine::models::AttendanceStatus;
///
/// assert_eq!(AttendanceStatus::HalfDay.to_string(), "Half Day");
/// assert_eq!(AttendanceStatus::HalfDay.code(), "HL");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Logged hours reached the full-day threshold.
    Present,
    /// Logged some hours, but fewer than the full-day threshold.
    HalfDay,
    /// No hours logged on a working day.
    Absent,
    /// A weekly off day.
    Weekend,
    /// Covered by a leave request.
    Leave,
}

impl AttendanceStatus {
    /// Every status, in display order.
    pub const ALL: [AttendanceStatus; 5] = [
        AttendanceStatus::Present,
        AttendanceStatus::HalfDay,
        AttendanceStatus::Absent,
        AttendanceStatus::Weekend,
        AttendanceStatus::Leave,
    ];

    /// Short legend code used on attendance sheets.
    pub fn code(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "P",
            AttendanceStatus::HalfDay => "HL",
            AttendanceStatus::Absent => "A",
            AttendanceStatus::Weekend => "W",
            AttendanceStatus::Leave => "L",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::HalfDay => "Half Day",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::Weekend => "Weekend",
            AttendanceStatus::Leave => "Leave",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the attendance ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedDay {
    /// The calendar date.
    pub date: NaiveDate,
    /// Hours counted for the day (never negative).
    pub hours: Decimal,
    /// The status the day was classified as.
    pub status: AttendanceStatus,
    /// Task label; synthetic leave days carry `On Leave - {reason}`.
    pub task: String,
    /// True if the day was synthesized from a leave request.
    pub is_leave_day: bool,
    /// True if the day is deducted from pay.
    pub loss_of_pay: bool,
}

/// Number of ledger days per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    /// Days classified [`AttendanceStatus::Present`].
    pub present: u32,
    /// Days classified [`AttendanceStatus::HalfDay`].
    pub half_day: u32,
    /// Days classified [`AttendanceStatus::Absent`].
    pub absent: u32,
    /// Days classified [`AttendanceStatus::Weekend`].
    pub weekend: u32,
    /// Days classified [`AttendanceStatus::Leave`].
    pub leave: u32,
}

impl StatusCounts {
    /// Tallies every day in a ledger.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::{AttendanceStatus, StatusCounts};
    ///
    /// let counts = StatusCounts::tally([
    ///     AttendanceStatus::Present,
    ///     AttendanceStatus::Present,
    ///     AttendanceStatus::Weekend,
    /// ]);
    /// assert_eq!(counts.present, 2);
    /// assert_eq!(counts.weekend, 1);
    /// assert_eq!(counts.total(), 3);
    /// ```
    pub fn tally(statuses: impl IntoIterator<Item = AttendanceStatus>) -> Self {
        let mut counts = Self::default();
        for status in statuses {
            *counts.slot_mut(status) += 1;
        }
        counts
    }

    /// Returns the count for one status.
    pub fn get(&self, status: AttendanceStatus) -> u32 {
        match status {
            AttendanceStatus::Present => self.present,
            AttendanceStatus::HalfDay => self.half_day,
            AttendanceStatus::Absent => self.absent,
            AttendanceStatus::Weekend => self.weekend,
            AttendanceStatus::Leave => self.leave,
        }
    }

    /// Total number of days counted.
    pub fn total(&self) -> u32 {
        self.present + self.half_day + self.absent + self.weekend + self.leave
    }

    fn slot_mut(&mut self, status: AttendanceStatus) -> &mut u32 {
        match status {
            AttendanceStatus::Present => &mut self.present,
            AttendanceStatus::HalfDay => &mut self.half_day,
            AttendanceStatus::Absent => &mut self.absent,
            AttendanceStatus::Weekend => &mut self.weekend,
            AttendanceStatus::Leave => &mut self.leave,
        }
    }
}

/// Aggregate figures derived from a classified ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// Days per status, after whole leave days beyond the balance were
    /// converted. A fractional remainder of excess shows only in `lop_days`.
    pub counts: StatusCounts,
    /// Sum of hours over every ledger day.
    pub total_hours: Decimal,
    /// Leave credit accrued as of the report date.
    pub available_leave_balance: Decimal,
    /// Leave credit consumed, capped at the accrued balance.
    pub leaves_taken: Decimal,
    /// Accrued credit not yet consumed, never negative.
    pub leaves_remaining: Decimal,
    /// Absences plus leave taken beyond the accrued balance.
    pub lop_days: Decimal,
    /// `lop_days` expressed in hours.
    pub lop_hours: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::HalfDay).unwrap(),
            "\"half_day\""
        );
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::Leave).unwrap(),
            "\"leave\""
        );
        let status: AttendanceStatus = serde_json::from_str("\"weekend\"").unwrap();
        assert_eq!(status, AttendanceStatus::Weekend);
    }

    #[test]
    fn test_status_labels_and_codes() {
        let labels: Vec<_> = AttendanceStatus::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels, vec!["Present", "Half Day", "Absent", "Weekend", "Leave"]);

        let codes: Vec<_> = AttendanceStatus::ALL.iter().map(|s| s.code()).collect();
        assert_eq!(codes, vec!["P", "HL", "A", "W", "L"]);
    }

    #[test]
    fn test_tally_empty_is_all_zero() {
        let counts = StatusCounts::tally([]);
        assert_eq!(counts, StatusCounts::default());
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn test_get_matches_tally() {
        let counts = StatusCounts::tally([
            AttendanceStatus::Absent,
            AttendanceStatus::Leave,
            AttendanceStatus::Leave,
            AttendanceStatus::HalfDay,
        ]);
        assert_eq!(counts.get(AttendanceStatus::Absent), 1);
        assert_eq!(counts.get(AttendanceStatus::Leave), 2);
        assert_eq!(counts.get(AttendanceStatus::HalfDay), 1);
        assert_eq!(counts.get(AttendanceStatus::Present), 0);
        assert_eq!(counts.total(), 4);
    }
}
