//! Persistence access for students, attendance records and users.
//!
//! Services talk to the [`Storage`] trait; [`PgStorage`] is the production
//! implementation on top of a `PgPool` created at startup.

#[cfg(test)]
pub mod memory;
mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::attendance::models::{
    AttendanceRecord, DailyScan, DateFilter, NewAttendanceRecord, PresenceRow, Student,
};
use crate::features::users::models::User;

pub use postgres::PgStorage;

#[async_trait]
pub trait Storage: Send + Sync {
    // Student directory
    async fn find_student_by_index_no(&self, index_no: &str) -> Result<Option<Student>>;

    // Attendance records

    /// Insert `record` for the student and append its id to the student's
    /// attendance list as a single unit. Either both writes land or neither.
    async fn record_attendance(
        &self,
        student_id: Uuid,
        record: NewAttendanceRecord,
    ) -> Result<(AttendanceRecord, Student)>;

    /// Records matching `filter`, in insertion order.
    async fn list_attendance(&self, filter: DateFilter) -> Result<Vec<AttendanceRecord>>;

    /// Scans matching `filter` joined to their student, ordered by date.
    async fn presence_rows(&self, filter: DateFilter) -> Result<Vec<PresenceRow>>;

    /// (date, index number) keys of every scan, ordered by date.
    async fn daily_scans(&self) -> Result<Vec<DailyScan>>;

    // Users
    async fn list_users(&self) -> Result<Vec<User>>;
}
