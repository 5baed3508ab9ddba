//! HTTP API module for the Attendance Engine.
//!
//! This module provides the REST endpoints for recording timesheets and
//! leave, and for reading attendance reports per employee and per roster.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{LeaveApplicationRequest, ReportQuery, TimesheetEntryRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
