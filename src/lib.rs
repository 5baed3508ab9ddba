//! Attendance and Leave Accrual Engine
//!
//! This crate classifies an employee's daily timesheet entries and leave
//! requests into an attendance ledger, and derives leave accrual balances
//! and loss-of-pay (LOP) figures from it.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod storage;
