use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for student
#[derive(Debug, Clone, FromRow)]
pub struct Student {
    pub id: Uuid,
    pub index_no: String,
    pub name: Option<String>,
    pub grade: Option<String>,
    pub section: Option<String>,
    /// Ids of the attendance records written for this student, oldest first
    pub attendance: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
