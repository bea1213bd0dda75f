//! In-memory storage for tests

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::Storage;
use crate::core::error::{AppError, Result};
use crate::features::attendance::models::{
    AttendanceRecord, DailyScan, DateFilter, NewAttendanceRecord, PresenceRow, Student,
};
use crate::features::users::models::{User, UserType};

#[derive(Default)]
struct State {
    students: Vec<Student>,
    records: Vec<AttendanceRecord>,
    users: Vec<User>,
}

#[derive(Default)]
pub struct InMemoryStorage {
    state: RwLock<State>,
    unavailable: AtomicBool,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail like a dropped database connection
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    pub async fn add_student(
        &self,
        index_no: &str,
        name: Option<&str>,
        grade: Option<&str>,
        section: Option<&str>,
    ) -> Student {
        let now = Utc::now();
        let student = Student {
            id: Uuid::new_v4(),
            index_no: index_no.to_string(),
            name: name.map(String::from),
            grade: grade.map(String::from),
            section: section.map(String::from),
            attendance: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.state.write().await.students.push(student.clone());
        student
    }

    pub async fn add_user(&self, username: &str, password: &str, user_type: UserType) -> User {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password: password.to_string(),
            name: None,
            email: Some(format!("{}@school.test", username)),
            contact: None,
            is_active: Some(true),
            user_type: Some(user_type),
            created_at: now,
            updated_at: now,
        };
        self.state.write().await.users.push(user.clone());
        user
    }

    pub async fn records(&self) -> Vec<AttendanceRecord> {
        self.state.read().await.records.clone()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn find_student_by_index_no(&self, index_no: &str) -> Result<Option<Student>> {
        self.check_available()?;
        let state = self.state.read().await;
        Ok(state
            .students
            .iter()
            .find(|s| s.index_no == index_no)
            .cloned())
    }

    async fn record_attendance(
        &self,
        student_id: Uuid,
        record: NewAttendanceRecord,
    ) -> Result<(AttendanceRecord, Student)> {
        self.check_available()?;
        let mut state = self.state.write().await;

        let position = state
            .students
            .iter()
            .position(|s| s.id == student_id)
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Student not found for index no. - {}",
                    record.index_no
                ))
            })?;

        let now = Utc::now();
        let saved = AttendanceRecord {
            id: Uuid::new_v4(),
            student_id,
            index_no: record.index_no,
            attendance_date: record.attendance_date,
            attendance_time: record.attendance_time,
            recorded_at: record.recorded_at,
            is_entered: record.is_entered,
            created_at: now,
        };

        let student = &mut state.students[position];
        student.attendance.push(saved.id);
        student.updated_at = now;
        let student = student.clone();

        state.records.push(saved.clone());
        Ok((saved, student))
    }

    async fn list_attendance(&self, filter: DateFilter) -> Result<Vec<AttendanceRecord>> {
        self.check_available()?;
        let state = self.state.read().await;
        Ok(state
            .records
            .iter()
            .filter(|r| filter.contains(r.attendance_date))
            .cloned()
            .collect())
    }

    async fn presence_rows(&self, filter: DateFilter) -> Result<Vec<PresenceRow>> {
        self.check_available()?;
        let state = self.state.read().await;

        let mut rows: Vec<PresenceRow> = state
            .records
            .iter()
            .filter(|r| filter.contains(r.attendance_date))
            .filter_map(|r| {
                let student = state.students.iter().find(|s| s.id == r.student_id)?;
                Some(PresenceRow {
                    attendance_date: r.attendance_date,
                    index_no: r.index_no.clone(),
                    grade: student.grade.clone(),
                    section: student.section.clone(),
                })
            })
            .collect();
        rows.sort_by_key(|r| r.attendance_date);
        Ok(rows)
    }

    async fn daily_scans(&self) -> Result<Vec<DailyScan>> {
        self.check_available()?;
        let state = self.state.read().await;

        let mut scans: Vec<DailyScan> = state
            .records
            .iter()
            .map(|r| DailyScan {
                attendance_date: r.attendance_date,
                index_no: r.index_no.clone(),
            })
            .collect();
        scans.sort_by_key(|s| s.attendance_date);
        Ok(scans)
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.check_available()?;
        Ok(self.state.read().await.users.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn scan(index_no: &str) -> NewAttendanceRecord {
        NewAttendanceRecord {
            index_no: index_no.to_string(),
            attendance_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            attendance_time: "07:30:00".to_string(),
            recorded_at: Utc::now(),
            is_entered: true,
        }
    }

    #[tokio::test]
    async fn test_record_for_missing_student_persists_nothing() {
        let storage = InMemoryStorage::new();
        storage
            .add_student("S001", None, Some("10"), Some("A"))
            .await;

        let result = storage
            .record_attendance(Uuid::new_v4(), scan("S001"))
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(storage.records().await.is_empty());
    }

    #[tokio::test]
    async fn test_record_while_unavailable_persists_nothing() {
        let storage = InMemoryStorage::new();
        let student = storage.add_student("S001", None, None, None).await;
        storage.set_unavailable(true);

        let result = storage.record_attendance(student.id, scan("S001")).await;
        assert!(matches!(result, Err(AppError::Database(_))));

        storage.set_unavailable(false);
        assert!(storage.records().await.is_empty());
        let stored = storage.find_student_by_index_no("S001").await.unwrap();
        assert!(stored.unwrap().attendance.is_empty());
    }
}
