use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::Storage;
use crate::core::error::{AppError, Result};
use crate::features::attendance::models::{
    AttendanceRecord, DailyScan, DateFilter, NewAttendanceRecord, PresenceRow, Student,
};
use crate::features::users::models::User;

const STUDENT_COLUMNS: &str =
    "id, index_no, name, grade, section, attendance, created_at, updated_at";

const RECORD_COLUMNS: &str = "id, student_id, index_no, attendance_date, attendance_time, \
     recorded_at, is_entered, created_at";

/// PostgreSQL-backed storage
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Append the WHERE clause for `filter` on `column`.
fn push_date_predicate(builder: &mut QueryBuilder<'_, Postgres>, column: &str, filter: DateFilter) {
    match filter {
        DateFilter::NoBound => {}
        DateFilter::LowerOnly(from) => {
            builder
                .push(" WHERE ")
                .push(column)
                .push(" >= ")
                .push_bind(from);
        }
        DateFilter::UpperOnly(to) => {
            builder
                .push(" WHERE ")
                .push(column)
                .push(" <= ")
                .push_bind(to);
        }
        DateFilter::Range(from, to) => {
            builder
                .push(" WHERE ")
                .push(column)
                .push(" >= ")
                .push_bind(from)
                .push(" AND ")
                .push(column)
                .push(" <= ")
                .push_bind(to);
        }
    }
}

#[async_trait]
impl Storage for PgStorage {
    async fn find_student_by_index_no(&self, index_no: &str) -> Result<Option<Student>> {
        sqlx::query_as::<_, Student>(&format!(
            "SELECT {} FROM students WHERE index_no = $1",
            STUDENT_COLUMNS
        ))
        .bind(index_no)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to find student by index no: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn record_attendance(
        &self,
        student_id: Uuid,
        record: NewAttendanceRecord,
    ) -> Result<(AttendanceRecord, Student)> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin attendance transaction: {:?}", e);
            AppError::Database(e)
        })?;

        let saved = sqlx::query_as::<_, AttendanceRecord>(&format!(
            r#"
            INSERT INTO attendance_records
                (student_id, index_no, attendance_date, attendance_time, recorded_at, is_entered)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            RECORD_COLUMNS
        ))
        .bind(student_id)
        .bind(&record.index_no)
        .bind(record.attendance_date)
        .bind(&record.attendance_time)
        .bind(record.recorded_at)
        .bind(record.is_entered)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert attendance record: {:?}", e);
            AppError::Database(e)
        })?;

        // Dropping `tx` on any early return below rolls the insert back
        let student = sqlx::query_as::<_, Student>(&format!(
            r#"
            UPDATE students
            SET attendance = array_append(attendance, $1), updated_at = NOW()
            WHERE id = $2
            RETURNING {}
            "#,
            STUDENT_COLUMNS
        ))
        .bind(saved.id)
        .bind(student_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to link attendance record to student: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Student not found for index no. - {}",
                record.index_no
            ))
        })?;

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit attendance transaction: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((saved, student))
    }

    async fn list_attendance(&self, filter: DateFilter) -> Result<Vec<AttendanceRecord>> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM attendance_records",
            RECORD_COLUMNS
        ));
        push_date_predicate(&mut builder, "attendance_date", filter);
        builder.push(" ORDER BY created_at, id");

        builder
            .build_query_as::<AttendanceRecord>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list attendance records: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn presence_rows(&self, filter: DateFilter) -> Result<Vec<PresenceRow>> {
        let mut builder = QueryBuilder::<Postgres>::new(
            r#"
            SELECT DISTINCT a.attendance_date, a.index_no, s.grade, s.section
            FROM attendance_records a
            JOIN students s ON s.id = a.student_id
            "#,
        );
        push_date_predicate(&mut builder, "a.attendance_date", filter);
        builder.push(" ORDER BY a.attendance_date, a.index_no");

        builder
            .build_query_as::<PresenceRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to aggregate attendance by date: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn daily_scans(&self) -> Result<Vec<DailyScan>> {
        sqlx::query_as::<_, DailyScan>(
            r#"
            SELECT DISTINCT attendance_date, index_no
            FROM attendance_records
            ORDER BY attendance_date, index_no
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to aggregate daily attendance: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password, name, email, contact, is_active, user_type,
                   created_at, updated_at
            FROM users
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list users: {:?}", e);
            AppError::Database(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sql_for(filter: DateFilter) -> String {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT 1 FROM attendance_records");
        push_date_predicate(&mut builder, "attendance_date", filter);
        builder.sql().to_string()
    }

    #[test]
    fn test_date_predicate_per_variant() {
        let a = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let b = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();

        assert_eq!(sql_for(DateFilter::NoBound), "SELECT 1 FROM attendance_records");
        assert_eq!(
            sql_for(DateFilter::LowerOnly(a)),
            "SELECT 1 FROM attendance_records WHERE attendance_date >= $1"
        );
        assert_eq!(
            sql_for(DateFilter::UpperOnly(b)),
            "SELECT 1 FROM attendance_records WHERE attendance_date <= $1"
        );
        assert_eq!(
            sql_for(DateFilter::Range(a, b)),
            "SELECT 1 FROM attendance_records WHERE attendance_date >= $1 AND attendance_date <= $2"
        );
    }
}
