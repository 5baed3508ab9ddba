//! Configuration loading and management for the Attendance Engine.
//!
//! This module loads the attendance policy (thresholds, loss-of-pay hours,
//! accrual rate, weekend days) and the employee roster from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Full day from {} hours", config.policy().full_day_threshold_hours);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AttendancePolicy, EmployeeRoster};
