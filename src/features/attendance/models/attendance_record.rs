use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a single entry/exit scan
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub student_id: Uuid,
    pub index_no: String,
    pub attendance_date: NaiveDate,
    pub attendance_time: String,
    pub recorded_at: DateTime<Utc>,
    pub is_entered: bool,
    pub created_at: DateTime<Utc>,
}

/// Validated scan ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttendanceRecord {
    pub index_no: String,
    pub attendance_date: NaiveDate,
    pub attendance_time: String,
    pub recorded_at: DateTime<Utc>,
    pub is_entered: bool,
}

/// One scan joined to the scanning student's grade and section
#[derive(Debug, Clone, FromRow)]
pub struct PresenceRow {
    pub attendance_date: NaiveDate,
    pub index_no: String,
    pub grade: Option<String>,
    pub section: Option<String>,
}

/// (student, day) key of a scan
#[derive(Debug, Clone, FromRow)]
pub struct DailyScan {
    pub attendance_date: NaiveDate,
    pub index_no: String,
}
