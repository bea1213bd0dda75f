use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::attendance::handlers::{self, AttendanceState};
use crate::features::attendance::services::{AttendanceService, ReportService};

/// Create routes for the attendance feature
pub fn routes(
    attendance_service: Arc<AttendanceService>,
    report_service: Arc<ReportService>,
) -> Router {
    let state = AttendanceState {
        attendance_service,
        report_service,
    };

    Router::new()
        .route(
            "/api/attendance",
            get(handlers::list_attendance).post(handlers::create_attendance),
        )
        .route(
            "/api/attendance/report",
            get(handlers::get_attendance_report),
        )
        .with_state(state)
}
