use utoipa::{Modify, OpenApi};

use crate::features::attendance::{dtos as attendance_dtos, handlers as attendance_handlers};
use crate::features::users::{
    dtos as users_dtos, handlers as users_handlers, models as users_models,
};
use crate::shared::types::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Attendance
        attendance_handlers::create_attendance,
        attendance_handlers::list_attendance,
        attendance_handlers::get_attendance_report,
        // Users
        users_handlers::list_users,
    ),
    components(
        schemas(
            ErrorResponse,
            // Attendance
            attendance_dtos::CreateAttendanceDto,
            attendance_dtos::CreateAttendanceResponseDto,
            attendance_dtos::AttendanceRecordDto,
            attendance_dtos::StudentDto,
            attendance_dtos::DailyAttendanceDto,
            attendance_dtos::RangedReportDto,
            attendance_dtos::DailyCountReportDto,
            attendance_dtos::AttendanceReportDto,
            // Users
            users_models::UserType,
            users_dtos::UserResponseDto,
        )
    ),
    tags(
        (name = "attendance", description = "Attendance recording, listing and reports"),
        (name = "users", description = "User directory"),
    ),
    info(
        title = "Attendance API",
        version = "0.1.0",
        description = "Student attendance recording and reporting",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
