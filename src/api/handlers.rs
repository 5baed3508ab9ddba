//! HTTP request handlers for the Attendance Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use serde::de::DeserializeOwned;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineResult;
use crate::export::ledger_to_csv;
use crate::models::{AttendanceReport, DailyEntry, Employee, LeaveRequest, RosterAttendanceRow};

use super::request::{LeaveApplicationRequest, ReportQuery, TimesheetEntryRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/employees", get(list_employees_handler))
        .route("/employees/:id/attendance", get(attendance_report_handler))
        .route("/employees/:id/attendance.csv", get(attendance_csv_handler))
        .route("/employees/:id/timesheet", post(record_timesheet_handler))
        .route("/employees/:id/leaves", post(apply_leave_handler))
        .route("/attendance", get(roster_attendance_handler))
        .with_state(state)
}

/// Handler for GET /employees.
async fn list_employees_handler(State(state): State<AppState>) -> impl IntoResponse {
    json_response(StatusCode::OK, state.config().employees())
}

/// Handler for GET /employees/:id/attendance.
///
/// Returns the classified ledger, summary and audit trace for one employee.
async fn attendance_report_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ReportQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = %id, "Processing attendance report request");

    match build_report(&state, &id, resolve_as_of(&query)).await {
        Ok((_, report)) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %id,
                days = report.days.len(),
                lop_days = %report.summary.lop_days,
                duration_us = report.audit_trace.duration_us,
                "Attendance report completed successfully"
            );
            json_response(StatusCode::OK, &report)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Attendance report failed");
            error_response(err.into())
        }
    }
}

/// Handler for GET /employees/:id/attendance.csv.
///
/// Streams the ledger as a CSV attachment named after the employee.
async fn attendance_csv_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ReportQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = %id, "Processing attendance export request");

    match build_report(&state, &id, resolve_as_of(&query)).await {
        Ok((employee, report)) => {
            let disposition = format!(
                "attachment; filename=\"{}_Attendance.csv\"",
                employee.name.replace('"', "")
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                ledger_to_csv(&report.days),
            )
                .into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Attendance export failed");
            error_response(err.into())
        }
    }
}

/// Handler for POST /employees/:id/timesheet.
///
/// Records one day's timesheet entry, replacing any entry for the same date.
async fn record_timesheet_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<TimesheetEntryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = %id, "Processing timesheet entry");

    let request = match parse_payload(payload, correlation_id) {
        Ok(req) => req,
        Err(response) => return response,
    };

    let result = async {
        request.validate()?;
        let employee = state.config().get_employee(&id)?.clone();
        let entry: DailyEntry = request.into();
        state
            .repository()
            .write()
            .await
            .record_entry(&employee, entry.clone())?;
        EngineResult::Ok(entry)
    }
    .await;

    match result {
        Ok(entry) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %id,
                date = %entry.date,
                hours = %entry.hours,
                "Timesheet entry recorded"
            );
            json_response(StatusCode::CREATED, &entry)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Timesheet entry rejected");
            error_response(err.into())
        }
    }
}

/// Handler for POST /employees/:id/leaves.
async fn apply_leave_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<LeaveApplicationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = %id, "Processing leave application");

    let request = match parse_payload(payload, correlation_id) {
        Ok(req) => req,
        Err(response) => return response,
    };

    let result = async {
        request.validate(state.config().policy().max_leave_span_days)?;
        let employee = state.config().get_employee(&id)?.clone();
        let leave: LeaveRequest = request.into();
        state
            .repository()
            .write()
            .await
            .apply_leave(&employee, leave.clone())?;
        EngineResult::Ok(leave)
    }
    .await;

    match result {
        Ok(leave) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %id,
                from_date = %leave.from_date,
                to_date = %leave.to_date,
                "Leave application recorded"
            );
            json_response(StatusCode::CREATED, &leave)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Leave application rejected");
            error_response(err.into())
        }
    }
}

/// Handler for GET /attendance.
///
/// Returns one summary row per employee on the roster.
async fn roster_attendance_handler(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let as_of = resolve_as_of(&query);
    info!(correlation_id = %correlation_id, as_of = %as_of, "Processing roster attendance request");

    let mut rows = Vec::with_capacity(state.config().employees().len());
    for employee in state.config().employees() {
        match evaluate_employee(&state, employee, as_of).await {
            Ok(report) => rows.push(RosterAttendanceRow::from_report(employee, &report)),
            Err(err) => {
                warn!(
                    correlation_id = %correlation_id,
                    employee_id = %employee.id,
                    error = %err,
                    "Roster attendance failed"
                );
                return error_response(err.into());
            }
        }
    }

    json_response(StatusCode::OK, &rows)
}

/// Loads an employee's records and evaluates them.
async fn build_report(
    state: &AppState,
    id: &str,
    as_of: NaiveDate,
) -> EngineResult<(Employee, AttendanceReport)> {
    let employee = state.config().get_employee(id)?.clone();
    let report = evaluate_employee(state, &employee, as_of).await?;
    Ok((employee, report))
}

async fn evaluate_employee(
    state: &AppState,
    employee: &Employee,
    as_of: NaiveDate,
) -> EngineResult<AttendanceReport> {
    let (entries, leaves) = {
        let repository = state.repository().read().await;
        (
            repository.load_entries(employee)?,
            repository.load_leaves(employee)?,
        )
    };
    Ok(state.engine().evaluate(employee, &entries, &leaves, as_of))
}

fn resolve_as_of(query: &ReportQuery) -> NaiveDate {
    query.as_of.unwrap_or_else(|| Utc::now().date_naive())
}

/// Unwraps a JSON body, turning extractor rejections into 400 responses.
fn parse_payload<T: DeserializeOwned>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, Response> {
    match payload {
        Ok(Json(req)) => Ok(req),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err(error_response(ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error,
            }))
        }
    }
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    json_response(api_error.status, api_error.error)
}
