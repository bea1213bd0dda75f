use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::attendance::dtos::{
    AttendanceRangeQuery, AttendanceRecordDto, AttendanceReportDto, CreateAttendanceDto,
    CreateAttendanceResponseDto,
};
use crate::features::attendance::models::NewAttendanceRecord;
use crate::features::attendance::services::{AttendanceService, ReportService};
use crate::shared::constants::REQUIRED_ATTENDANCE_FIELDS_MESSAGE;
use crate::shared::types::ErrorResponse;

#[derive(Clone)]
pub struct AttendanceState {
    pub attendance_service: Arc<AttendanceService>,
    pub report_service: Arc<ReportService>,
}

/// Record an attendance scan
///
/// Stores the scan and links it to the student identified by `indexNo`.
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = CreateAttendanceDto,
    responses(
        (status = 200, description = "Attendance recorded", body = CreateAttendanceResponseDto),
        (status = 400, description = "Missing fields or unknown student", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "attendance"
)]
pub async fn create_attendance(
    State(state): State<AttendanceState>,
    AppJson(dto): AppJson<CreateAttendanceDto>,
) -> Result<Json<CreateAttendanceResponseDto>> {
    dto.validate().map_err(|e| {
        tracing::debug!("Rejected attendance payload: {}", e);
        AppError::Validation(REQUIRED_ATTENDANCE_FIELDS_MESSAGE.to_string())
    })?;

    let record = NewAttendanceRecord::try_from(dto)?;
    let response = state.attendance_service.record(record).await?;
    Ok(Json(response))
}

/// List attendance records
///
/// Optional inclusive `from`/`to` bounds filter by record date.
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceRangeQuery),
    responses(
        (status = 200, description = "Attendance records", body = Vec<AttendanceRecordDto>),
        (status = 400, description = "Invalid date parameter", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "attendance"
)]
pub async fn list_attendance(
    State(state): State<AttendanceState>,
    AppQuery(query): AppQuery<AttendanceRangeQuery>,
) -> Result<Json<Vec<AttendanceRecordDto>>> {
    let filter = query.to_filter()?;
    let records = state.attendance_service.list(filter).await?;
    Ok(Json(records))
}

/// Attendance report
///
/// With `from` and/or `to`: per-day totals broken down by grade and class.
/// Without: distinct students per day over all records.
#[utoipa::path(
    get,
    path = "/api/attendance/report",
    params(AttendanceRangeQuery),
    responses(
        (status = 200, description = "Attendance report", body = AttendanceReportDto),
        (status = 400, description = "Invalid date parameter", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "attendance"
)]
pub async fn get_attendance_report(
    State(state): State<AttendanceState>,
    AppQuery(query): AppQuery<AttendanceRangeQuery>,
) -> Result<Json<AttendanceReportDto>> {
    let filter = query.to_filter()?;
    let report = state.report_service.report(filter).await?;
    Ok(Json(report))
}
