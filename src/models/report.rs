//! Attendance report models.
//!
//! This module contains the [`AttendanceReport`] returned by the engine and
//! the audit structures that explain how each figure was derived.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AttendanceSummary, ClassifiedDay, Employee};

/// A single step in the audit trace.
///
/// # Example
///
/// ```
/// use attendance_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "leave_accrual".to_string(),
///     rule_name: "Leave Accrual".to_string(),
///     policy_ref: "monthly_earned_leaves".to_string(),
///     input: serde_json::json!({"joining_date": "2023-01-15", "as_of": "2023-04-01"}),
///     output: serde_json::json!({"months": 2, "accrued_leaves": "4"}),
///     reasoning: "2 months since February 2023 at 2 leaves per month".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number in the evaluation.
    pub step_number: u32,
    /// The unique identifier for the rule applied.
    pub rule_id: String,
    /// Human-readable name of the rule.
    pub rule_name: String,
    /// The policy settings the rule depends on.
    pub policy_ref: String,
    /// The input values for this step.
    pub input: serde_json::Value,
    /// The output values from this step.
    pub output: serde_json::Value,
    /// Explanation of why the rule produced this output.
    pub reasoning: String,
}

/// A tolerated anomaly in the input data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// Machine-readable warning code (e.g. "INVERTED_LEAVE_RANGE").
    pub code: String,
    /// Human-readable description.
    pub message: String,
    /// Severity level ("info" or "warning").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a warning with "warning" severity.
    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: "warning".to_string(),
        }
    }
}

/// The complete audit trace of an evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The evaluation steps, in order.
    pub steps: Vec<AuditStep>,
    /// Warnings raised while reading the input.
    pub warnings: Vec<AuditWarning>,
    /// Time taken for the evaluation in microseconds.
    pub duration_us: u64,
}

/// The result of evaluating one employee's attendance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceReport {
    /// Unique identifier for this report.
    pub report_id: Uuid,
    /// When the report was produced.
    pub calculated_at: DateTime<Utc>,
    /// Version of the engine that produced the report.
    pub engine_version: String,
    /// The employee the report covers.
    pub employee_id: String,
    /// The date leave accrual was measured at.
    pub as_of: NaiveDate,
    /// The classified ledger, in date order.
    pub days: Vec<ClassifiedDay>,
    /// Aggregate figures.
    pub summary: AttendanceSummary,
    /// How the figures were derived.
    pub audit_trace: AuditTrace,
}

/// One employee's line in the roster-wide attendance table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterAttendanceRow {
    /// The employee id.
    pub employee_id: String,
    /// The employee's display name.
    pub name: String,
    /// Number of ledger days.
    pub total_days: u32,
    /// Days marked present.
    pub present_days: u32,
    /// Loss-of-pay days, including leave beyond the balance.
    pub absent_days: Decimal,
    /// Leave credit consumed.
    pub leaves_taken: Decimal,
}

impl RosterAttendanceRow {
    /// Builds a roster row from an employee's report.
    pub fn from_report(employee: &Employee, report: &AttendanceReport) -> Self {
        let summary = &report.summary;
        Self {
            employee_id: employee.id.clone(),
            name: employee.name.clone(),
            total_days: report.days.len() as u32,
            present_days: summary.counts.present,
            absent_days: summary.lop_days,
            leaves_taken: summary.leaves_taken,
        }
    }
}
