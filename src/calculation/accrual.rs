//! Leave accrual.
//!
//! Leave credit is earned per elapsed month of service, starting from the
//! month after the joining month.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::models::AuditStep;

/// Default leave credit earned per month (2 days).
pub const MONTHLY_EARNED_LEAVES: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// Counts the months of accrual between joining and `as_of`.
///
/// Accrual starts the month after the joining month, so an employee who
/// joined in January first accrues in February. The day of month is ignored.
/// Dates before the first accrual month give zero.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::months_since_joining_next_month;
/// use chrono::NaiveDate;
///
/// let joined = NaiveDate::from_ymd_opt(2023, 1, 15).unwrap();
/// let as_of = NaiveDate::from_ymd_opt(2023, 4, 1).unwrap();
/// assert_eq!(months_since_joining_next_month(joined, as_of), 2);
/// ```
pub fn months_since_joining_next_month(joining_date: NaiveDate, as_of: NaiveDate) -> u32 {
    let months = (as_of.year() - joining_date.year()) * 12 + as_of.month() as i32
        - joining_date.month() as i32
        - 1;
    months.max(0) as u32
}

/// The leave credit accrued as of a date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveAccrual {
    /// Months of accrual counted.
    pub months: u32,
    /// Credit accrued (`months * monthly_earned_leaves`).
    pub accrued_leaves: Decimal,
    /// The audit step recording the accrual.
    pub audit_step: AuditStep,
}

/// Calculates the leave credit accrued between joining and `as_of`.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::{calculate_accrual, MONTHLY_EARNED_LEAVES};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let joined = NaiveDate::from_ymd_opt(2023, 1, 15).unwrap();
/// let as_of = NaiveDate::from_ymd_opt(2023, 4, 1).unwrap();
///
/// let accrual = calculate_accrual(joined, as_of, MONTHLY_EARNED_LEAVES, 1);
/// assert_eq!(accrual.accrued_leaves, Decimal::new(4, 0));
/// ```
pub fn calculate_accrual(
    joining_date: NaiveDate,
    as_of: NaiveDate,
    monthly_earned_leaves: Decimal,
    step_number: u32,
) -> LeaveAccrual {
    let months = months_since_joining_next_month(joining_date, as_of);
    let accrued_leaves = Decimal::from(months) * monthly_earned_leaves;

    let reasoning = if months == 0 {
        format!(
            "No full accrual month between joining on {} and {}; accrual starts the month after joining",
            joining_date, as_of
        )
    } else {
        format!(
            "{} months of accrual since the month after joining on {}, at {} per month",
            months,
            joining_date,
            monthly_earned_leaves.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "leave_accrual".to_string(),
        rule_name: "Leave Accrual".to_string(),
        policy_ref: "monthly_earned_leaves".to_string(),
        input: serde_json::json!({
            "joining_date": joining_date.to_string(),
            "as_of": as_of.to_string(),
            "monthly_earned_leaves": monthly_earned_leaves.normalize().to_string()
        }),
        output: serde_json::json!({
            "months": months,
            "accrued_leaves": accrued_leaves.normalize().to_string()
        }),
        reasoning,
    };

    LeaveAccrual {
        months,
        accrued_leaves,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_joining_month_accrues_nothing() {
        assert_eq!(
            months_since_joining_next_month(date("2023-01-15"), date("2023-01-31")),
            0
        );
    }

    #[test]
    fn test_next_month_accrues_nothing_yet() {
        assert_eq!(
            months_since_joining_next_month(date("2023-01-15"), date("2023-02-28")),
            0
        );
    }

    #[test]
    fn test_day_of_month_is_ignored() {
        assert_eq!(
            months_since_joining_next_month(date("2023-01-31"), date("2023-03-01")),
            1
        );
        assert_eq!(
            months_since_joining_next_month(date("2023-01-01"), date("2023-03-31")),
            1
        );
    }

    #[test]
    fn test_across_year_boundary() {
        assert_eq!(
            months_since_joining_next_month(date("2022-11-10"), date("2023-02-01")),
            2
        );
    }

    #[test]
    fn test_as_of_before_joining_is_zero() {
        assert_eq!(
            months_since_joining_next_month(date("2023-06-01"), date("2022-01-01")),
            0
        );
    }

    #[test]
    fn test_scenario_a_accrues_four_leaves() {
        let accrual = calculate_accrual(
            date("2023-01-15"),
            date("2023-04-01"),
            MONTHLY_EARNED_LEAVES,
            1,
        );
        assert_eq!(accrual.months, 2);
        assert_eq!(accrual.accrued_leaves, Decimal::from(4));
        assert_eq!(accrual.audit_step.output["accrued_leaves"], "4");
    }

    #[test]
    fn test_zero_months_reasoning() {
        let accrual = calculate_accrual(
            date("2023-03-20"),
            date("2023-03-25"),
            MONTHLY_EARNED_LEAVES,
            1,
        );
        assert_eq!(accrual.accrued_leaves, Decimal::ZERO);
        assert!(accrual.audit_step.reasoning.starts_with("No full accrual month"));
    }
}
