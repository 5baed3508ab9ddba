//! Configuration types for attendance evaluation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::HashSet;

use chrono::Weekday;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{
    FULL_DAY_THRESHOLD, HALF_DAY_LEAVE_WEIGHT, LOP_HOURS_PER_DAY, MAX_LEAVE_SPAN_DAYS,
    MONTHLY_EARNED_LEAVES,
};
use crate::error::{EngineError, EngineResult};
use crate::models::Employee;

/// Thresholds and constants that drive classification and accrual.
///
/// Missing fields in `policy.yaml` fall back to the defaults.
///
/// # Example
///
/// ```
/// use attendance_engine::config::AttendancePolicy;
/// use chrono::Weekday;
/// use rust_decimal::Decimal;
///
/// let policy = AttendancePolicy::default();
/// assert_eq!(policy.full_day_threshold_hours, Decimal::new(85, 1));
/// assert_eq!(policy.weekend_days, vec![Weekday::Sun]);
/// assert!(policy.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttendancePolicy {
    /// Hours at or above which a working day counts as present.
    pub full_day_threshold_hours: Decimal,
    /// Hours deducted per loss-of-pay day.
    pub lop_hours_per_day: Decimal,
    /// Leave credit earned per full month of service.
    pub monthly_earned_leaves: Decimal,
    /// Leave credit consumed by a half day.
    pub half_day_leave_weight: Decimal,
    /// Weekly off days.
    pub weekend_days: Vec<Weekday>,
    /// Longest leave range, in calendar days, accepted for recording.
    pub max_leave_span_days: u32,
}

impl Default for AttendancePolicy {
    fn default() -> Self {
        Self {
            full_day_threshold_hours: FULL_DAY_THRESHOLD,
            lop_hours_per_day: LOP_HOURS_PER_DAY,
            monthly_earned_leaves: MONTHLY_EARNED_LEAVES,
            half_day_leave_weight: HALF_DAY_LEAVE_WEIGHT,
            weekend_days: vec![Weekday::Sun],
            max_leave_span_days: MAX_LEAVE_SPAN_DAYS,
        }
    }
}

impl AttendancePolicy {
    /// Returns true if the weekday is a weekly off day.
    pub fn is_weekend(&self, weekday: Weekday) -> bool {
        self.weekend_days.contains(&weekday)
    }

    /// Checks every value is within its permitted range.
    pub fn validate(&self) -> EngineResult<()> {
        if self.full_day_threshold_hours <= Decimal::ZERO {
            return Err(invalid("full_day_threshold_hours", "must be greater than zero"));
        }
        if self.lop_hours_per_day.is_sign_negative() {
            return Err(invalid("lop_hours_per_day", "cannot be negative"));
        }
        if self.monthly_earned_leaves.is_sign_negative() {
            return Err(invalid("monthly_earned_leaves", "cannot be negative"));
        }
        if self.half_day_leave_weight < Decimal::ZERO || self.half_day_leave_weight > Decimal::ONE
        {
            return Err(invalid("half_day_leave_weight", "must be between 0 and 1"));
        }
        let distinct: HashSet<Weekday> = self.weekend_days.iter().copied().collect();
        if distinct.len() >= 7 {
            return Err(invalid("weekend_days", "at least one working day is required"));
        }
        if self.max_leave_span_days == 0 {
            return Err(invalid("max_leave_span_days", "must be greater than zero"));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidPolicy {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// Roster configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeRoster {
    /// Every employee the deployment reports on.
    pub employees: Vec<Employee>,
}
