//! Per-employee timesheet and leave persistence.
//!
//! Collections are stored as JSON arrays under the employee's storage keys.
//! Reading never fails on bad data: an absent key or a value that is not a
//! JSON array loads as an empty collection, and individual records that do
//! not parse are skipped.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::{DailyEntry, Employee, LeaveRequest};

use super::store::KeyValueStore;

/// Loads and saves employees' timesheet entries and leave requests.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{DailyEntry, Employee};
/// use attendance_engine::storage::{AttendanceRepository, InMemoryStore};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "1".to_string(),
///     name: "Gaurav P".to_string(),
///     email: "gaurav.p@talentBase.com".to_string(),
///     department: "IT".to_string(),
///     designation: "Backend Developer".to_string(),
///     joining_date: NaiveDate::from_ymd_opt(2022, 1, 15).unwrap(),
/// };
/// let mut repository = AttendanceRepository::new(InMemoryStore::new());
/// assert!(repository.load_entries(&employee)?.is_empty());
///
/// let entry = DailyEntry::new(NaiveDate::from_ymd_opt(2023, 4, 3).unwrap(), Decimal::new(9, 0), "API");
/// repository.record_entry(&employee, entry.clone())?;
/// assert_eq!(repository.load_entries(&employee)?, vec![entry]);
/// # Ok::<(), attendance_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct AttendanceRepository<S> {
    store: S,
}

impl<S: KeyValueStore> AttendanceRepository<S> {
    /// Creates a repository over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads an employee's timesheet entries.
    pub fn load_entries(&self, employee: &Employee) -> EngineResult<Vec<DailyEntry>> {
        self.load_collection(&employee.timesheet_key())
    }

    /// Loads an employee's leave requests.
    pub fn load_leaves(&self, employee: &Employee) -> EngineResult<Vec<LeaveRequest>> {
        self.load_collection(&employee.leaves_key())
    }

    /// Replaces an employee's timesheet entries.
    pub fn save_entries(&mut self, employee: &Employee, entries: &[DailyEntry]) -> EngineResult<()> {
        self.save_collection(&employee.timesheet_key(), entries)
    }

    /// Replaces an employee's leave requests.
    pub fn save_leaves(&mut self, employee: &Employee, leaves: &[LeaveRequest]) -> EngineResult<()> {
        self.save_collection(&employee.leaves_key(), leaves)
    }

    /// Records a timesheet entry, replacing any entry for the same date.
    pub fn record_entry(&mut self, employee: &Employee, entry: DailyEntry) -> EngineResult<()> {
        let mut entries = self.load_entries(employee)?;
        entries.retain(|existing| existing.date != entry.date);
        entries.push(entry);
        entries.sort_by_key(|existing| existing.date);
        self.save_entries(employee, &entries)
    }

    /// Appends a leave request.
    pub fn apply_leave(&mut self, employee: &Employee, leave: LeaveRequest) -> EngineResult<()> {
        let mut leaves = self.load_leaves(employee)?;
        leaves.push(leave);
        self.save_leaves(employee, &leaves)
    }

    fn load_collection<T: DeserializeOwned>(&self, key: &str) -> EngineResult<Vec<T>> {
        let Some(bytes) = self.store.get(key)? else {
            return Ok(Vec::new());
        };

        let values = match serde_json::from_slice::<Vec<serde_json::Value>>(&bytes) {
            Ok(values) => values,
            Err(err) => {
                warn!(key = %key, error = %err, "Stored value is not a JSON array; treating as empty");
                return Ok(Vec::new());
            }
        };

        let mut items = Vec::with_capacity(values.len());
        for (index, value) in values.into_iter().enumerate() {
            match serde_json::from_value(value) {
                Ok(item) => items.push(item),
                Err(err) => {
                    warn!(key = %key, index, error = %err, "Skipping malformed stored record");
                }
            }
        }
        Ok(items)
    }

    fn save_collection<T: Serialize>(&mut self, key: &str, items: &[T]) -> EngineResult<()> {
        let bytes = serde_json::to_vec(items).map_err(|e| EngineError::StorageError {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.store.put(key, bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 4, day).unwrap()
    }

    fn employee() -> Employee {
        Employee {
            id: "1".to_string(),
            name: "Gaurav P".to_string(),
            email: "gaurav.p@talentBase.com".to_string(),
            department: "IT".to_string(),
            designation: "Backend Developer".to_string(),
            joining_date: NaiveDate::from_ymd_opt(2022, 1, 15).unwrap(),
        }
    }

    fn repository_with(key: &str, raw: &str) -> AttendanceRepository<InMemoryStore> {
        let mut store = InMemoryStore::new();
        store.put(key, raw.as_bytes().to_vec()).unwrap();
        AttendanceRepository::new(store)
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, key: &str) -> EngineResult<Option<Vec<u8>>> {
            Err(EngineError::StorageError {
                key: key.to_string(),
                message: "unavailable".to_string(),
            })
        }

        fn put(&mut self, key: &str, _value: Vec<u8>) -> EngineResult<()> {
            Err(EngineError::StorageError {
                key: key.to_string(),
                message: "read-only".to_string(),
            })
        }
    }

    #[test]
    fn test_absent_keys_load_empty() {
        let repository = AttendanceRepository::new(InMemoryStore::new());
        assert!(repository.load_entries(&employee()).unwrap().is_empty());
        assert!(repository.load_leaves(&employee()).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_json_loads_empty() {
        let repository = repository_with("timesheet_entries_gaurav.p@talentBase.com", "{not json");
        assert!(repository.load_entries(&employee()).unwrap().is_empty());
    }

    #[test]
    fn test_non_array_json_loads_empty() {
        let repository = repository_with("leaves_gaurav.p@talentBase.com", r#"{"fromDate": "2023-04-10"}"#);
        assert!(repository.load_leaves(&employee()).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_records_are_skipped() {
        let raw = r#"[
            {"date": "2023-04-03", "task": "API", "hours": 9},
            {"date": "not a date", "task": "bad", "hours": 9},
            {"date": "2023-04-04", "task": "Docs", "hours": "4"}
        ]"#;
        let repository = repository_with("timesheet_entries_gaurav.p@talentBase.com", raw);

        let entries = repository.load_entries(&employee()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].hours, dec("4"));
    }

    #[test]
    fn test_legacy_leave_records_load() {
        let raw = r#"[{
            "fromDate": "2023-04-10",
            "toDate": "2023-04-12",
            "reportingManager": "Sanket P",
            "resumeDate": "2023-04-13",
            "summary": "Trip",
            "emergencyNumber": "9876543210"
        }]"#;
        let repository = repository_with("leaves_gaurav.p@talentBase.com", raw);

        let leaves = repository.load_leaves(&employee()).unwrap();
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].day_count(), 3);
    }

    #[test]
    fn test_record_entry_replaces_same_date_and_sorts() {
        let mut repository = AttendanceRepository::new(InMemoryStore::new());
        let employee = employee();

        repository
            .record_entry(&employee, DailyEntry::new(d(5), dec("9"), "later"))
            .unwrap();
        repository
            .record_entry(&employee, DailyEntry::new(d(3), dec("4"), "first try"))
            .unwrap();
        repository
            .record_entry(&employee, DailyEntry::new(d(3), dec("9"), "corrected"))
            .unwrap();

        let entries = repository.load_entries(&employee).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].date, d(3));
        assert_eq!(entries[0].task, "corrected");
        assert_eq!(entries[1].date, d(5));
    }

    #[test]
    fn test_apply_leave_appends() {
        let mut repository = AttendanceRepository::new(InMemoryStore::new());
        let employee = employee();

        repository
            .apply_leave(&employee, LeaveRequest::new(d(10), d(12), "Trip"))
            .unwrap();
        repository
            .apply_leave(&employee, LeaveRequest::new(d(20), d(20), "Doctor"))
            .unwrap();

        let leaves = repository.load_leaves(&employee).unwrap();
        assert_eq!(leaves.len(), 2);
        assert_eq!(leaves[1].reason, "Doctor");
    }

    #[test]
    fn test_store_failures_propagate() {
        let mut repository = AttendanceRepository::new(FailingStore);
        let employee = employee();

        assert!(matches!(
            repository.load_entries(&employee),
            Err(EngineError::StorageError { .. })
        ));
        assert!(matches!(
            repository.save_leaves(&employee, &[]),
            Err(EngineError::StorageError { .. })
        ));
    }
}
