//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the attendance
//! policy and employee roster from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::Employee;

use super::types::{AttendancePolicy, EmployeeRoster};

/// Loads and provides access to the attendance configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── policy.yaml     # Thresholds, LOP hours, accrual rate, weekend days
/// └── employees.yaml  # Roster with joining dates
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// let employee = loader.get_employee("1")?;
/// println!("{} joined on {}", employee.name, employee.joining_date);
/// # Ok::<(), attendance_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    policy: AttendancePolicy,
    employees: Vec<Employee>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if either file is missing, contains invalid YAML,
    /// or the policy fails validation.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy = Self::load_yaml::<AttendancePolicy>(&path.join("policy.yaml"))?;
        let roster = Self::load_yaml::<EmployeeRoster>(&path.join("employees.yaml"))?;

        Self::from_parts(policy, roster.employees)
    }

    /// Builds a loader from an in-memory policy and roster.
    pub fn from_parts(policy: AttendancePolicy, employees: Vec<Employee>) -> EngineResult<Self> {
        policy.validate()?;
        Ok(Self { policy, employees })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the attendance policy.
    pub fn policy(&self) -> &AttendancePolicy {
        &self.policy
    }

    /// Returns every employee on the roster.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Gets an employee by id.
    ///
    /// Returns `EmployeeNotFound` if the id is not on the roster.
    pub fn get_employee(&self, id: &str) -> EngineResult<&Employee> {
        self.employees
            .iter()
            .find(|employee| employee.id == id)
            .ok_or_else(|| EngineError::EmployeeNotFound { id: id.to_string() })
    }
}
