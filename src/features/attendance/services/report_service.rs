use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::NaiveDate;

use crate::core::error::Result;
use crate::features::attendance::dtos::{
    AttendanceReportDto, DailyAttendanceDto, DailyCountReportDto, RangedReportDto,
};
use crate::features::attendance::models::{DailyScan, DateFilter, PresenceRow};
use crate::modules::storage::Storage;
use crate::shared::constants::{DATE_FORMAT, UNASSIGNED_KEY};

/// Service for aggregated attendance reports
pub struct ReportService {
    storage: Arc<dyn Storage>,
}

impl ReportService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Build the report for `filter`.
    ///
    /// With any bound the report is broken down by grade and class per day;
    /// without bounds it is a plain distinct-student count per day.
    pub async fn report(&self, filter: DateFilter) -> Result<AttendanceReportDto> {
        if filter.is_bounded() {
            tracing::info!(
                "Attendance report from: {:?}, to: {:?}",
                filter.from(),
                filter.to()
            );
            let rows = self.storage.presence_rows(filter).await?;
            tracing::debug!("Presence rows fetched: {}", rows.len());
            let report = build_ranged_report(filter, rows);
            Ok(AttendanceReportDto::Ranged(report))
        } else {
            let scans = self.storage.daily_scans().await?;
            tracing::debug!("Daily scans fetched: {}", scans.len());
            Ok(AttendanceReportDto::Daily(build_daily_report(scans)))
        }
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn bucket(value: Option<String>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| UNASSIGNED_KEY.to_string())
}

fn tally(counts: &mut BTreeMap<String, usize>, key: String) {
    *counts.entry(key).or_insert(0) += 1;
}

/// Group presence rows by day, counting each student once per day.
///
/// Rows dated outside `filter` are ignored.
pub fn build_ranged_report(filter: DateFilter, rows: Vec<PresenceRow>) -> RangedReportDto {
    let mut seen: BTreeSet<(NaiveDate, String)> = BTreeSet::new();
    let mut days: BTreeMap<NaiveDate, DailyAttendanceDto> = BTreeMap::new();

    for row in rows {
        if !filter.contains(row.attendance_date) {
            continue;
        }
        if !seen.insert((row.attendance_date, row.index_no)) {
            continue;
        }

        let day = days.entry(row.attendance_date).or_default();
        day.total += 1;
        tally(&mut day.attendance_by_grade, bucket(row.grade));
        tally(&mut day.attendance_by_class, bucket(row.section));
    }

    RangedReportDto {
        report_from: filter.from().map(format_date),
        report_to: filter.to().map(format_date),
        no_of_days: days.len(),
        report: days
            .into_iter()
            .map(|(date, day)| (format_date(date), day))
            .collect(),
    }
}

/// Count distinct (student, day) pairs per day.
pub fn build_daily_report(scans: Vec<DailyScan>) -> DailyCountReportDto {
    let distinct: BTreeSet<(NaiveDate, String)> = scans
        .into_iter()
        .map(|s| (s.attendance_date, s.index_no))
        .collect();

    let mut report: BTreeMap<String, usize> = BTreeMap::new();
    for (date, _) in distinct {
        *report.entry(format_date(date)).or_insert(0) += 1;
    }

    DailyCountReportDto { report }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    use crate::features::attendance::models::NewAttendanceRecord;
    use crate::modules::storage::memory::InMemoryStorage;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(day: NaiveDate, index_no: &str, grade: &str, section: &str) -> PresenceRow {
        PresenceRow {
            attendance_date: day,
            index_no: index_no.to_string(),
            grade: Some(grade.to_string()),
            section: Some(section.to_string()),
        }
    }

    fn scan(day: NaiveDate, index_no: &str) -> DailyScan {
        DailyScan {
            attendance_date: day,
            index_no: index_no.to_string(),
        }
    }

    #[test]
    fn test_ranged_report_breaks_down_by_grade_and_class() {
        let day = date(2024, 1, 2);
        let filter = DateFilter::Range(date(2024, 1, 1), date(2024, 1, 31));

        let report = build_ranged_report(
            filter,
            vec![row(day, "S001", "10", "A"), row(day, "S002", "10", "B")],
        );

        assert_eq!(report.report_from.as_deref(), Some("2024-01-01"));
        assert_eq!(report.report_to.as_deref(), Some("2024-01-31"));
        assert_eq!(report.no_of_days, 1);

        let daily = &report.report["2024-01-02"];
        assert_eq!(daily.total, 2);
        assert_eq!(
            daily.attendance_by_grade,
            BTreeMap::from([("10".to_string(), 2)])
        );
        assert_eq!(
            daily.attendance_by_class,
            BTreeMap::from([("A".to_string(), 1), ("B".to_string(), 1)])
        );
    }

    #[test]
    fn test_ranged_report_counts_repeat_scans_once() {
        let day = date(2024, 1, 2);
        let report = build_ranged_report(
            DateFilter::LowerOnly(day),
            vec![
                row(day, "S001", "10", "A"),
                row(day, "S001", "10", "A"),
                row(day, "S002", "11", "A"),
            ],
        );

        let daily = &report.report["2024-01-02"];
        assert_eq!(daily.total, 2);
        assert_eq!(daily.attendance_by_class["A"], 2);
        assert_eq!(report.report_to, None);
    }

    #[test]
    fn test_no_of_days_counts_only_dates_with_records() {
        let filter = DateFilter::Range(date(2024, 1, 1), date(2024, 1, 31));
        let report = build_ranged_report(
            filter,
            vec![
                row(date(2024, 1, 2), "S001", "10", "A"),
                row(date(2024, 1, 9), "S001", "10", "A"),
                row(date(2024, 1, 9), "S002", "10", "A"),
            ],
        );

        assert_eq!(report.no_of_days, 2);
        let keys: Vec<&str> = report.report.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["2024-01-02", "2024-01-09"]);
    }

    #[test]
    fn test_missing_grade_or_section_is_unassigned() {
        let day = date(2024, 1, 2);
        let rows = vec![PresenceRow {
            attendance_date: day,
            index_no: "S001".to_string(),
            grade: None,
            section: Some("  ".to_string()),
        }];

        let report = build_ranged_report(DateFilter::UpperOnly(day), rows);
        let daily = &report.report["2024-01-02"];
        assert_eq!(daily.attendance_by_grade["unassigned"], 1);
        assert_eq!(daily.attendance_by_class["unassigned"], 1);
    }

    #[test]
    fn test_rows_outside_range_are_ignored() {
        let filter = DateFilter::Range(date(2024, 1, 1), date(2024, 1, 31));
        let report = build_ranged_report(
            filter,
            vec![
                row(date(2023, 12, 31), "S001", "10", "A"),
                row(date(2024, 1, 15), "S001", "10", "A"),
            ],
        );

        assert_eq!(report.no_of_days, 1);
        assert!(report.report.contains_key("2024-01-15"));
    }

    #[test]
    fn test_empty_range_has_zero_days() {
        let report = build_ranged_report(DateFilter::LowerOnly(date(2024, 1, 1)), vec![]);
        assert_eq!(report.no_of_days, 0);
        assert!(report.report.is_empty());
    }

    #[test]
    fn test_daily_report_dedups_student_per_day() {
        let report = build_daily_report(vec![
            scan(date(2024, 1, 2), "S001"),
            scan(date(2024, 1, 2), "S001"),
            scan(date(2024, 1, 2), "S002"),
            scan(date(2024, 1, 3), "S001"),
        ]);

        assert_eq!(
            report.report,
            BTreeMap::from([("2024-01-02".to_string(), 2), ("2024-01-03".to_string(), 1)])
        );
    }

    #[tokio::test]
    async fn test_report_mode_follows_bounds() {
        let storage = Arc::new(InMemoryStorage::new());
        let student = storage
            .add_student("S001", None, Some("10"), Some("A"))
            .await;
        for hour in [7, 15] {
            storage
                .record_attendance(
                    student.id,
                    NewAttendanceRecord {
                        index_no: "S001".to_string(),
                        attendance_date: date(2024, 1, 2),
                        attendance_time: format!("{:02}:00:00", hour),
                        recorded_at: Utc.with_ymd_and_hms(2024, 1, 2, hour, 0, 0).unwrap(),
                        is_entered: hour == 7,
                    },
                )
                .await
                .unwrap();
        }
        let service = ReportService::new(storage);

        match service.report(DateFilter::NoBound).await.unwrap() {
            AttendanceReportDto::Daily(daily) => assert_eq!(daily.report["2024-01-02"], 1),
            other => panic!("expected daily report, got {:?}", other),
        }

        match service
            .report(DateFilter::UpperOnly(date(2024, 1, 2)))
            .await
            .unwrap()
        {
            AttendanceReportDto::Ranged(ranged) => {
                assert_eq!(ranged.no_of_days, 1);
                assert_eq!(ranged.report["2024-01-02"].total, 1);
            }
            other => panic!("expected ranged report, got {:?}", other),
        }
    }
}
