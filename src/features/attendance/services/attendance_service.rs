use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::attendance::dtos::{AttendanceRecordDto, CreateAttendanceResponseDto};
use crate::features::attendance::models::{DateFilter, NewAttendanceRecord};
use crate::modules::storage::Storage;
use crate::shared::constants::SUCCESS_MESSAGE;

/// Service for recording and listing attendance scans
pub struct AttendanceService {
    storage: Arc<dyn Storage>,
}

impl AttendanceService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Record one scan for an existing student.
    ///
    /// The record insert and the append to the student's attendance list are
    /// committed together by the storage layer, so a failure leaves neither.
    pub async fn record(&self, record: NewAttendanceRecord) -> Result<CreateAttendanceResponseDto> {
        let student = self
            .storage
            .find_student_by_index_no(&record.index_no)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Student not found for index no. - {}",
                    record.index_no
                ))
            })?;

        let (saved, updated) = self.storage.record_attendance(student.id, record).await?;

        tracing::info!(
            "Attendance recorded: id={}, index_no={}, date={}, entered={}",
            saved.id,
            saved.index_no,
            saved.attendance_date,
            saved.is_entered
        );

        Ok(CreateAttendanceResponseDto {
            message: SUCCESS_MESSAGE.to_string(),
            saved_record: saved.into(),
            updated_student: updated.into(),
        })
    }

    /// List records inside `filter`, in insertion order
    pub async fn list(&self, filter: DateFilter) -> Result<Vec<AttendanceRecordDto>> {
        if filter.is_bounded() {
            tracing::info!(
                "Attendance records from: {:?}, to: {:?}",
                filter.from(),
                filter.to()
            );
        }

        let records = self.storage.list_attendance(filter).await?;
        Ok(records.into_iter().map(|r| r.into()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::storage::memory::InMemoryStorage;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn scan(index_no: &str, day: u32) -> NewAttendanceRecord {
        NewAttendanceRecord {
            index_no: index_no.to_string(),
            attendance_date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            attendance_time: "07:30:00".to_string(),
            recorded_at: Utc.with_ymd_and_hms(2024, 1, day, 7, 30, 0).unwrap(),
            is_entered: true,
        }
    }

    #[tokio::test]
    async fn test_record_appends_exactly_one_reference() {
        let storage = Arc::new(InMemoryStorage::new());
        let student = storage
            .add_student("S001", None, Some("10"), Some("A"))
            .await;
        let service = AttendanceService::new(storage.clone());

        let first = service.record(scan("S001", 2)).await.unwrap();
        assert_eq!(first.message, "SUCCESS");
        assert_eq!(first.updated_student.id, student.id);
        assert_eq!(
            first.updated_student.attendance,
            vec![first.saved_record.id]
        );
        assert_eq!(first.saved_record.student, student.id);

        let second = service.record(scan("S001", 3)).await.unwrap();
        assert_eq!(
            second.updated_student.attendance,
            vec![first.saved_record.id, second.saved_record.id]
        );
        assert_eq!(storage.records().await.len(), 2);
    }

    #[tokio::test]
    async fn test_record_unknown_student_persists_nothing() {
        let storage = Arc::new(InMemoryStorage::new());
        let service = AttendanceService::new(storage.clone());

        let err = service.record(scan("NOPE", 2)).await.unwrap_err();
        match err {
            AppError::NotFound(msg) => assert_eq!(msg, "Student not found for index no. - NOPE"),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(storage.records().await.is_empty());
    }

    #[tokio::test]
    async fn test_record_surfaces_store_failure() {
        let storage = Arc::new(InMemoryStorage::new());
        storage.add_student("S001", None, None, None).await;
        storage.set_unavailable(true);
        let service = AttendanceService::new(storage.clone());

        let err = service.record(scan("S001", 2)).await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }

    #[tokio::test]
    async fn test_list_filters_inclusive_range_in_insertion_order() {
        let storage = Arc::new(InMemoryStorage::new());
        storage.add_student("S001", None, None, None).await;
        let service = AttendanceService::new(storage.clone());

        for day in [31, 1, 15, 2] {
            service.record(scan("S001", day)).await.unwrap();
        }
        // Outside January
        let mut february = scan("S001", 1);
        february.attendance_date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        service.record(february).await.unwrap();

        let filter = DateFilter::Range(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        );
        let days: Vec<u32> = service
            .list(filter)
            .await
            .unwrap()
            .iter()
            .map(|r| chrono::Datelike::day(&r.date))
            .collect();
        assert_eq!(days, vec![31, 1, 15, 2]);

        assert_eq!(service.list(DateFilter::NoBound).await.unwrap().len(), 5);
    }
}
