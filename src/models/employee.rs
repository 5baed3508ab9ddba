//! Employee model.
//!
//! This module defines the [`Employee`] roster record and the storage keys
//! under which an employee's timesheet and leave history are persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Storage key prefix for an employee's timesheet entries.
pub const TIMESHEET_KEY_PREFIX: &str = "timesheet_entries_";

/// Storage key prefix for an employee's leave requests.
pub const LEAVES_KEY_PREFIX: &str = "leaves_";

/// Represents an employee on the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Work e-mail; also the identity used for storage keys.
    pub email: String,
    /// Department the employee belongs to.
    #[serde(default)]
    pub department: String,
    /// Job title.
    #[serde(default)]
    pub designation: String,
    /// The date the employee joined. Leave accrues from the following month.
    #[serde(alias = "joiningDate")]
    pub joining_date: NaiveDate,
}

impl Employee {
    /// Returns the key under which this employee's timesheet entries are stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::Employee;
    /// use chrono::NaiveDate;
    ///
    /// let employee = Employee {
    ///     id: "1".to_string(),
    ///     name: "Gaurav P".to_string(),
    ///     email: "gaurav.p@talentBase.com".to_string(),
    ///     department: "IT".to_string(),
    ///     designation: "Backend Developer".to_string(),
    ///     joining_date: NaiveDate::from_ymd_opt(2022, 1, 15).unwrap(),
    /// };
    /// assert_eq!(employee.timesheet_key(), "timesheet_entries_gaurav.p@talentBase.com");
    /// assert_eq!(employee.leaves_key(), "leaves_gaurav.p@talentBase.com");
    /// ```
    pub fn timesheet_key(&self) -> String {
        format!("{}{}", TIMESHEET_KEY_PREFIX, self.email)
    }

    /// Returns the key under which this employee's leave requests are stored.
    pub fn leaves_key(&self) -> String {
        format!("{}{}", LEAVES_KEY_PREFIX, self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_employee() {
        let json = r#"{
            "id": "3",
            "name": "Biswajit P",
            "email": "biswajit.p@talentBase.com",
            "department": "Design",
            "designation": "Designer",
            "joining_date": "2023-03-20"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, "3");
        assert_eq!(employee.department, "Design");
        assert_eq!(
            employee.joining_date,
            NaiveDate::from_ymd_opt(2023, 3, 20).unwrap()
        );
    }

    #[test]
    fn test_deserialize_employee_with_legacy_joining_date_key() {
        let json = r#"{
            "id": "2",
            "name": "Sanket P",
            "email": "sanket.p@talentBase.com",
            "joiningDate": "2021-08-10"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(
            employee.joining_date,
            NaiveDate::from_ymd_opt(2021, 8, 10).unwrap()
        );
        assert!(employee.department.is_empty());
    }

    #[test]
    fn test_storage_keys_use_email() {
        let employee = Employee {
            id: "5".to_string(),
            name: "Rahul G".to_string(),
            email: "rahul.g@talentBase.com".to_string(),
            department: "Marketing".to_string(),
            designation: "Manager".to_string(),
            joining_date: NaiveDate::from_ymd_opt(2023, 3, 20).unwrap(),
        };

        assert_eq!(employee.timesheet_key(), "timesheet_entries_rahul.g@talentBase.com");
        assert_eq!(employee.leaves_key(), "leaves_rahul.g@talentBase.com");
    }
}
