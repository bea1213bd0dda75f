mod attendance_service;
mod report_service;

pub use attendance_service::AttendanceService;
pub use report_service::ReportService;
