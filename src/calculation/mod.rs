//! Calculation logic for the Attendance Engine.
//!
//! This module contains the pure attendance rules: merging leave requests
//! into the timesheet, classifying each day, accruing leave credit, and
//! folding the ledger into a summary with loss-of-pay figures.

mod accrual;
mod classification;
mod engine;
mod leave_merge;
mod summary;

pub use accrual::{
    LeaveAccrual, MONTHLY_EARNED_LEAVES, calculate_accrual, months_since_joining_next_month,
};
pub use classification::{FULL_DAY_THRESHOLD, classify_day};
pub use engine::AttendanceEngine;
pub use leave_merge::{
    LEAVE_TASK_PREFIX, LeaveMerge, MAX_DAILY_HOURS, MAX_LEAVE_SPAN_DAYS, MergedEntry,
    merge_leave_into_entries,
};
pub use summary::{HALF_DAY_LEAVE_WEIGHT, LOP_HOURS_PER_DAY, SummaryOutcome, summarize};
