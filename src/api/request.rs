//! Request types for the Attendance Engine API.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::MAX_DAILY_HOURS;
use crate::error::{EngineError, EngineResult};
use crate::models::{DailyEntry, LeaveRequest};

/// Request body for `POST /employees/:id/timesheet`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimesheetEntryRequest {
    /// The date worked.
    pub date: NaiveDate,
    /// Hours logged.
    pub hours: Decimal,
    /// Task description.
    #[serde(default)]
    pub task: String,
}

impl TimesheetEntryRequest {
    /// Rejects negative hours and more hours than a day holds.
    pub fn validate(&self) -> EngineResult<()> {
        if self.hours < Decimal::ZERO {
            return Err(EngineError::InvalidEntry {
                date: self.date,
                message: "hours cannot be negative".to_string(),
            });
        }
        if self.hours > MAX_DAILY_HOURS {
            return Err(EngineError::InvalidEntry {
                date: self.date,
                message: format!("hours cannot exceed {}", MAX_DAILY_HOURS),
            });
        }
        Ok(())
    }
}

impl From<TimesheetEntryRequest> for DailyEntry {
    fn from(req: TimesheetEntryRequest) -> Self {
        DailyEntry::new(req.date, req.hours, req.task)
    }
}

/// Request body for `POST /employees/:id/leaves`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveApplicationRequest {
    /// First day of leave.
    pub from_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub to_date: NaiveDate,
    /// Reason for the leave.
    #[serde(default)]
    pub reason: String,
    /// Manager the request is reported to.
    #[serde(default)]
    pub reporting_manager: Option<String>,
    /// Expected date of return.
    #[serde(default)]
    pub resume_date: Option<NaiveDate>,
    /// Emergency contact number.
    #[serde(default)]
    pub emergency_number: Option<String>,
}

impl LeaveApplicationRequest {
    /// Rejects ranges that end before they start or span more than
    /// `max_span_days` calendar days.
    pub fn validate(&self, max_span_days: u32) -> EngineResult<()> {
        if self.to_date < self.from_date {
            return Err(EngineError::InvalidEntry {
                date: self.from_date,
                message: format!("leave ends on {} before it starts", self.to_date),
            });
        }
        let span = (self.to_date - self.from_date).num_days() + 1;
        if span > i64::from(max_span_days) {
            return Err(EngineError::InvalidEntry {
                date: self.from_date,
                message: format!(
                    "leave covers {} days; at most {} can be requested at once",
                    span, max_span_days
                ),
            });
        }
        Ok(())
    }
}

impl From<LeaveApplicationRequest> for LeaveRequest {
    fn from(req: LeaveApplicationRequest) -> Self {
        LeaveRequest {
            from_date: req.from_date,
            to_date: req.to_date,
            reason: req.reason,
            reporting_manager: req.reporting_manager,
            resume_date: req.resume_date,
            emergency_number: req.emergency_number,
        }
    }
}

/// Query string accepted by the report endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportQuery {
    /// Date leave accrual is measured at; defaults to today.
    pub as_of: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_timesheet_request_accepts_numeric_hours() {
        let req: TimesheetEntryRequest =
            serde_json::from_str(r#"{"date": "2023-04-03", "hours": 8.5, "task": "API"}"#).unwrap();
        assert_eq!(req.hours, Decimal::new(85, 1));
        assert!(req.validate().is_ok());

        let entry: DailyEntry = req.into();
        assert_eq!(entry.task, "API");
    }

    #[test]
    fn test_negative_hours_rejected() {
        let req = TimesheetEntryRequest {
            date: date("2023-04-03"),
            hours: Decimal::new(-1, 0),
            task: String::new(),
        };
        assert!(matches!(req.validate(), Err(EngineError::InvalidEntry { .. })));
    }

    #[test]
    fn test_hours_beyond_a_day_rejected() {
        let over = TimesheetEntryRequest {
            date: date("2023-04-03"),
            hours: Decimal::new(2401, 2),
            task: String::new(),
        };
        assert!(matches!(over.validate(), Err(EngineError::InvalidEntry { .. })));

        let full = TimesheetEntryRequest {
            hours: Decimal::from(24),
            ..over
        };
        assert!(full.validate().is_ok());
    }

    #[test]
    fn test_inverted_leave_rejected() {
        let req: LeaveApplicationRequest = serde_json::from_str(
            r#"{"from_date": "2023-04-12", "to_date": "2023-04-10", "reason": "typo"}"#,
        )
        .unwrap();
        assert!(req.validate(366).is_err());
    }

    #[test]
    fn test_leave_span_limit_is_inclusive() {
        let req = LeaveApplicationRequest {
            from_date: date("2023-01-01"),
            to_date: date("2023-01-10"),
            reason: String::new(),
            reporting_manager: None,
            resume_date: None,
            emergency_number: None,
        };
        assert!(req.validate(10).is_ok());
        assert!(matches!(req.validate(9), Err(EngineError::InvalidEntry { .. })));
    }

    #[test]
    fn test_leave_request_conversion_keeps_optional_fields() {
        let req: LeaveApplicationRequest = serde_json::from_str(
            r#"{
                "from_date": "2023-04-10",
                "to_date": "2023-04-12",
                "reason": "Trip",
                "reporting_manager": "Sanket P",
                "resume_date": "2023-04-13"
            }"#,
        )
        .unwrap();
        assert!(req.validate(366).is_ok());

        let leave: LeaveRequest = req.into();
        assert_eq!(leave.reporting_manager.as_deref(), Some("Sanket P"));
        assert_eq!(leave.resume_date, Some(date("2023-04-13")));
        assert_eq!(leave.emergency_number, None);
    }
}
