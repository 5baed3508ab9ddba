//! Leave request model.
//!
//! A [`LeaveRequest`] covers an inclusive range of calendar dates. The
//! engine expands it into one synthetic leave day per date that has no
//! real timesheet entry.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// One applied leave span.
///
/// Both legacy camelCase keys (`fromDate`, `toDate`, `summary`) and
/// snake_case keys are accepted when reading persisted requests.
///
/// # Example
///
/// ```
/// use attendance_engine::models::LeaveRequest;
/// use chrono::NaiveDate;
///
/// let leave: LeaveRequest = serde_json::from_str(
///     r#"{"fromDate": "2023-04-10", "toDate": "2023-04-12", "summary": "Family trip"}"#,
/// ).unwrap();
/// assert_eq!(leave.reason, "Family trip");
/// assert_eq!(leave.day_count(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// First day of leave (inclusive).
    #[serde(alias = "fromDate")]
    pub from_date: NaiveDate,
    /// Last day of leave (inclusive).
    #[serde(alias = "toDate")]
    pub to_date: NaiveDate,
    /// Reason given for the leave.
    #[serde(default, alias = "summary")]
    pub reason: String,
    /// Manager the request was reported to.
    #[serde(
        default,
        alias = "reportingManager",
        skip_serializing_if = "Option::is_none"
    )]
    pub reporting_manager: Option<String>,
    /// Date the employee expects to resume work.
    #[serde(
        default,
        alias = "resumeDate",
        deserialize_with = "deserialize_optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub resume_date: Option<NaiveDate>,
    /// Emergency contact number while on leave.
    #[serde(
        default,
        alias = "emergencyNumber",
        skip_serializing_if = "Option::is_none"
    )]
    pub emergency_number: Option<String>,
}

impl LeaveRequest {
    /// Creates a leave request with only the range and reason set.
    pub fn new(from_date: NaiveDate, to_date: NaiveDate, reason: impl Into<String>) -> Self {
        Self {
            from_date,
            to_date,
            reason: reason.into(),
            reporting_manager: None,
            resume_date: None,
            emergency_number: None,
        }
    }

    /// Returns true if the range ends before it starts.
    pub fn is_inverted(&self) -> bool {
        self.to_date < self.from_date
    }

    /// Iterates every date in the range, inclusive. Inverted ranges yield nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::LeaveRequest;
    /// use chrono::NaiveDate;
    ///
    /// let d = |day| NaiveDate::from_ymd_opt(2023, 4, day).unwrap();
    ///
    /// let leave = LeaveRequest::new(d(10), d(12), "trip");
    /// assert_eq!(leave.dates().collect::<Vec<_>>(), vec![d(10), d(11), d(12)]);
    ///
    /// let inverted = LeaveRequest::new(d(12), d(10), "typo");
    /// assert_eq!(inverted.dates().count(), 0);
    /// ```
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.from_date
            .iter_days()
            .take_while(move |date| *date <= self.to_date)
    }

    /// Number of calendar days covered by the range.
    pub fn day_count(&self) -> i64 {
        if self.is_inverted() {
            0
        } else {
            (self.to_date - self.from_date).num_days() + 1
        }
    }
}

fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    // The leave form stores an empty string when the field is left blank.
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|text| NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_deserialize_full_legacy_form() {
        let json = r#"{
            "fromDate": "2023-04-10",
            "toDate": "2023-04-12",
            "reportingManager": "Sanket P",
            "resumeDate": "2023-04-13",
            "summary": "Sister's wedding",
            "emergencyNumber": "9876543210"
        }"#;

        let leave: LeaveRequest = serde_json::from_str(json).unwrap();
        assert_eq!(leave.from_date, d(2023, 4, 10));
        assert_eq!(leave.to_date, d(2023, 4, 12));
        assert_eq!(leave.reason, "Sister's wedding");
        assert_eq!(leave.reporting_manager.as_deref(), Some("Sanket P"));
        assert_eq!(leave.resume_date, Some(d(2023, 4, 13)));
        assert_eq!(leave.emergency_number.as_deref(), Some("9876543210"));
    }

    #[test]
    fn test_blank_resume_date_reads_as_none() {
        let json = r#"{"from_date": "2023-04-10", "to_date": "2023-04-10", "resumeDate": ""}"#;
        let leave: LeaveRequest = serde_json::from_str(json).unwrap();
        assert_eq!(leave.resume_date, None);
        assert!(leave.reason.is_empty());
    }

    #[test]
    fn test_single_day_range() {
        let leave = LeaveRequest::new(d(2023, 4, 10), d(2023, 4, 10), "doctor");
        assert_eq!(leave.day_count(), 1);
        assert_eq!(leave.dates().collect::<Vec<_>>(), vec![d(2023, 4, 10)]);
    }

    #[test]
    fn test_range_across_month_boundary() {
        let leave = LeaveRequest::new(d(2023, 1, 30), d(2023, 2, 2), "travel");
        assert_eq!(leave.day_count(), 4);
        assert_eq!(leave.dates().last(), Some(d(2023, 2, 2)));
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let leave = LeaveRequest::new(d(2023, 4, 12), d(2023, 4, 10), "typo");
        assert!(leave.is_inverted());
        assert_eq!(leave.day_count(), 0);
        assert_eq!(leave.dates().count(), 0);
    }

    #[test]
    fn test_serialize_skips_empty_optionals() {
        let leave = LeaveRequest::new(d(2023, 4, 10), d(2023, 4, 11), "rest");
        let json = serde_json::to_value(&leave).unwrap();
        assert_eq!(json["from_date"], "2023-04-10");
        assert!(json.get("reporting_manager").is_none());
        assert!(json.get("resume_date").is_none());
    }
}
