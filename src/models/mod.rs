//! Core data models for the Attendance Engine.
//!
//! One shared definition of each record is used everywhere classification
//! happens: raw timesheet entries, leave requests, the classified ledger,
//! and the reports built from it.

mod attendance;
mod daily_entry;
mod employee;
mod leave_request;
mod report;

pub use attendance::{AttendanceStatus, AttendanceSummary, ClassifiedDay, StatusCounts};
pub use daily_entry::DailyEntry;
pub use employee::{Employee, LEAVES_KEY_PREFIX, TIMESHEET_KEY_PREFIX};
pub use leave_request::LeaveRequest;
pub use report::{AttendanceReport, AuditStep, AuditTrace, AuditWarning, RosterAttendanceRow};
