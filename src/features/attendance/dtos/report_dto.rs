use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Presence breakdown for one day
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyAttendanceDto {
    /// Distinct students seen that day
    pub total: usize,
    pub attendance_by_grade: BTreeMap<String, usize>,
    pub attendance_by_class: BTreeMap<String, usize>,
}

/// Report over an explicit date range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RangedReportDto {
    /// Lower bound as requested (YYYY-MM-DD), null when open
    pub report_from: Option<String>,
    /// Upper bound as requested (YYYY-MM-DD), null when open
    pub report_to: Option<String>,
    /// Number of dates that actually have attendance in the range
    pub no_of_days: usize,
    /// Keyed by YYYY-MM-DD, ascending
    pub report: BTreeMap<String, DailyAttendanceDto>,
}

/// Whole-history report: distinct students per day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DailyCountReportDto {
    /// Keyed by YYYY-MM-DD, ascending
    pub report: BTreeMap<String, usize>,
}

/// Report body; the shape depends on whether a date bound was given
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum AttendanceReportDto {
    Ranged(RangedReportDto),
    Daily(DailyCountReportDto),
}
