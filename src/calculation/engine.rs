//! The attendance engine.
//!
//! [`AttendanceEngine`] composes leave merging, accrual and summarizing into
//! a single [`AttendanceReport`] for one employee. It never touches storage:
//! callers pass in already-loaded collections.

use std::time::Instant;

use chrono::{NaiveDate, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::config::AttendancePolicy;
use crate::models::{AttendanceReport, AuditTrace, DailyEntry, Employee, LeaveRequest};

use super::accrual::calculate_accrual;
use super::leave_merge::merge_leave_into_entries;
use super::summary::summarize;

/// Evaluates attendance for one employee at a time.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::AttendanceEngine;
/// use attendance_engine::models::{AttendanceStatus, DailyEntry, Employee, LeaveRequest};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let d = |m, day| NaiveDate::from_ymd_opt(2023, m, day).unwrap();
/// let employee = Employee {
///     id: "1".to_string(),
///     name: "Gaurav P".to_string(),
///     email: "gaurav.p@talentBase.com".to_string(),
///     department: "IT".to_string(),
///     designation: "Backend Developer".to_string(),
///     joining_date: d(1, 15),
/// };
/// let entries = vec![DailyEntry::new(d(4, 3), Decimal::new(9, 0), "Sprint work")];
/// let leaves = vec![LeaveRequest::new(d(4, 10), d(4, 12), "Trip")];
///
/// let report = AttendanceEngine::default().evaluate(&employee, &entries, &leaves, d(4, 1));
/// assert_eq!(report.days.len(), 4);
/// assert_eq!(report.days[0].status, AttendanceStatus::Present);
/// assert_eq!(report.summary.available_leave_balance, Decimal::new(4, 0));
/// assert_eq!(report.summary.leaves_remaining, Decimal::ONE);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AttendanceEngine {
    policy: AttendancePolicy,
}

impl AttendanceEngine {
    /// Creates an engine using the given policy.
    pub fn new(policy: AttendancePolicy) -> Self {
        Self { policy }
    }

    /// Returns the policy the engine applies.
    pub fn policy(&self) -> &AttendancePolicy {
        &self.policy
    }

    /// Evaluates an employee's attendance as of a date.
    ///
    /// `as_of` only affects leave accrual; every entry and leave day is
    /// classified regardless of its date.
    pub fn evaluate(
        &self,
        employee: &Employee,
        entries: &[DailyEntry],
        leaves: &[LeaveRequest],
        as_of: NaiveDate,
    ) -> AttendanceReport {
        let start_time = Instant::now();
        let mut step_number: u32 = 1;
        let mut audit_trace = AuditTrace::default();

        let merge = merge_leave_into_entries(entries, leaves);
        audit_trace.steps.push(merge.audit_step(step_number));
        step_number += 1;

        let accrual = calculate_accrual(
            employee.joining_date,
            as_of,
            self.policy.monthly_earned_leaves,
            step_number,
        );
        audit_trace.steps.push(accrual.audit_step);
        step_number += 1;

        let outcome = summarize(
            &merge.entries,
            accrual.accrued_leaves,
            &self.policy,
            step_number,
        );
        audit_trace.steps.extend(outcome.audit_steps);
        audit_trace.warnings = merge.warnings;
        audit_trace.duration_us = start_time.elapsed().as_micros() as u64;

        debug!(
            employee_id = %employee.id,
            as_of = %as_of,
            days = outcome.days.len(),
            lop_days = %outcome.summary.lop_days,
            leaves_taken = %outcome.summary.leaves_taken,
            warnings = audit_trace.warnings.len(),
            "Attendance evaluated"
        );

        AttendanceReport {
            report_id: Uuid::new_v4(),
            calculated_at: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            employee_id: employee.id.clone(),
            as_of,
            days: outcome.days,
            summary: outcome.summary,
            audit_trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AttendanceStatus;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn employee(joining: &str) -> Employee {
        Employee {
            id: "emp_001".to_string(),
            name: "Test Employee".to_string(),
            email: "test@talentBase.com".to_string(),
            department: "IT".to_string(),
            designation: "Developer".to_string(),
            joining_date: date(joining),
        }
    }

    #[test]
    fn test_report_metadata() {
        let report =
            AttendanceEngine::default().evaluate(&employee("2023-01-15"), &[], &[], date("2023-04-01"));

        assert_eq!(report.employee_id, "emp_001");
        assert_eq!(report.as_of, date("2023-04-01"));
        assert_eq!(report.engine_version, env!("CARGO_PKG_VERSION"));
        assert!(report.days.is_empty());
        assert_eq!(report.summary.available_leave_balance, dec("4"));
        assert_eq!(report.summary.leaves_remaining, dec("4"));
    }

    #[test]
    fn test_audit_trace_order() {
        let entries = vec![DailyEntry::new(date("2023-04-03"), dec("9"), "work")];
        let leaves = vec![LeaveRequest::new(date("2023-04-10"), date("2023-04-10"), "rest")];

        let report = AttendanceEngine::default().evaluate(
            &employee("2023-01-15"),
            &entries,
            &leaves,
            date("2023-04-01"),
        );

        let rules: Vec<_> = report
            .audit_trace
            .steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();
        assert_eq!(
            rules,
            vec![
                "leave_merge",
                "leave_accrual",
                "day_classification",
                "day_classification",
                "leave_balance"
            ]
        );
        let numbers: Vec<_> = report.audit_trace.steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_merge_warnings_reach_report() {
        let leaves = vec![LeaveRequest::new(date("2023-04-12"), date("2023-04-10"), "typo")];

        let report = AttendanceEngine::default().evaluate(
            &employee("2023-01-15"),
            &[],
            &leaves,
            date("2023-04-01"),
        );

        assert!(report.days.is_empty());
        assert_eq!(report.audit_trace.warnings.len(), 1);
        assert_eq!(report.audit_trace.warnings[0].code, "INVERTED_LEAVE_RANGE");
    }

    #[test]
    fn test_leave_on_sunday_counts_as_leave() {
        // 2023-04-08 (Sat) to 2023-04-10 (Mon)
        let leaves = vec![LeaveRequest::new(date("2023-04-08"), date("2023-04-10"), "trip")];

        let report = AttendanceEngine::default().evaluate(
            &employee("2022-01-15"),
            &[],
            &leaves,
            date("2023-04-01"),
        );

        assert!(report
            .days
            .iter()
            .all(|day| day.status == AttendanceStatus::Leave));
        assert_eq!(report.summary.leaves_taken, dec("3"));
    }

    #[test]
    fn test_custom_policy_is_applied() {
        let policy = AttendancePolicy {
            full_day_threshold_hours: dec("8"),
            lop_hours_per_day: dec("8"),
            ..AttendancePolicy::default()
        };
        let entries = vec![
            DailyEntry::new(date("2023-04-03"), dec("8"), "work"),
            DailyEntry::new(date("2023-04-04"), dec("0"), "none"),
        ];

        let report = AttendanceEngine::new(policy).evaluate(
            &employee("2023-01-15"),
            &entries,
            &[],
            date("2023-04-01"),
        );

        assert_eq!(report.days[0].status, AttendanceStatus::Present);
        assert_eq!(report.summary.lop_hours, dec("8"));
    }
}
