use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::AppError;
use crate::features::attendance::models::{
    AttendanceRecord, DateFilter, NewAttendanceRecord, Student,
};
use crate::shared::constants::{REQUIRED_ATTENDANCE_FIELDS_MESSAGE, TIME_FORMAT};
use crate::shared::validation::{parse_calendar_date, parse_date_param};

/// Request DTO for recording a scan
///
/// `indexNo`, `isEntered` and `timestamp` are required; `isEntered: false` is a
/// valid exit scan. `date` and `time` default to the timestamp's UTC date and
/// time of day.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAttendanceDto {
    /// Student index number, as a string or a number
    #[serde(default, deserialize_with = "string_or_number")]
    #[schema(value_type = Option<String>)]
    #[validate(
        required(message = "indexNo is required"),
        length(min = 1, message = "indexNo must not be empty")
    )]
    pub index_no: Option<String>,

    /// Entry (`true`) or exit (`false`) scan
    #[serde(default, deserialize_with = "optional_flag")]
    #[schema(value_type = Option<bool>)]
    #[validate(required(message = "isEntered is required"))]
    pub is_entered: Option<bool>,

    /// RFC 3339 date-time or epoch milliseconds
    #[serde(default, deserialize_with = "flexible_timestamp")]
    #[schema(value_type = Option<String>)]
    #[validate(required(message = "timestamp is required"))]
    pub timestamp: Option<DateTime<Utc>>,

    /// Calendar date of the scan (YYYY-MM-DD or an RFC 3339 date-time)
    #[serde(default, deserialize_with = "flexible_date")]
    #[schema(value_type = Option<String>)]
    pub date: Option<NaiveDate>,

    /// Time of day of the scan, stored as given
    pub time: Option<String>,
}

impl TryFrom<CreateAttendanceDto> for NewAttendanceRecord {
    type Error = AppError;

    fn try_from(dto: CreateAttendanceDto) -> Result<Self, Self::Error> {
        let (Some(index_no), Some(is_entered), Some(recorded_at)) =
            (dto.index_no, dto.is_entered, dto.timestamp)
        else {
            return Err(AppError::Validation(
                REQUIRED_ATTENDANCE_FIELDS_MESSAGE.to_string(),
            ));
        };

        let index_no = index_no.trim().to_string();
        if index_no.is_empty() {
            return Err(AppError::Validation(
                REQUIRED_ATTENDANCE_FIELDS_MESSAGE.to_string(),
            ));
        }

        let attendance_time = dto
            .time
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| recorded_at.format(TIME_FORMAT).to_string());

        Ok(Self {
            index_no,
            attendance_date: dto.date.unwrap_or_else(|| recorded_at.date_naive()),
            attendance_time,
            recorded_at,
            is_entered,
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Integer(i64),
    Float(f64),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        StringOrNumber::Text(s) => s,
        StringOrNumber::Integer(n) => n.to_string(),
        StringOrNumber::Float(n) => n.to_string(),
    }))
}

/// A blank string is treated like a missing flag
fn optional_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(flag)) => Ok(Some(flag)),
        Some(Value::String(raw)) if raw.trim().is_empty() => Ok(None),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a boolean, got {}",
            other
        ))),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TimestampInput {
    Millis(i64),
    Text(String),
}

fn flexible_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<TimestampInput>::deserialize(deserializer)? {
        None => Ok(None),
        Some(TimestampInput::Text(raw)) if raw.trim().is_empty() => Ok(None),
        Some(TimestampInput::Text(raw)) => raw
            .trim()
            .parse::<DateTime<Utc>>()
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("invalid timestamp {}: {}", raw, e))),
        Some(TimestampInput::Millis(ms)) => Utc
            .timestamp_millis_opt(ms)
            .single()
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom("timestamp out of range")),
    }
}

fn flexible_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse_calendar_date(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", raw))),
    }
}

/// Query params shared by listing and reporting
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AttendanceRangeQuery {
    /// Inclusive lower bound (YYYY-MM-DD)
    pub from: Option<String>,
    /// Inclusive upper bound (YYYY-MM-DD)
    pub to: Option<String>,
}

impl AttendanceRangeQuery {
    pub fn to_filter(&self) -> Result<DateFilter, AppError> {
        let from = parse_date_param("from", self.from.as_deref())?;
        let to = parse_date_param("to", self.to.as_deref())?;
        Ok(DateFilter::from_bounds(from, to))
    }
}

/// Response DTO for an attendance record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecordDto {
    pub id: Uuid,
    /// Id of the owning student
    pub student: Uuid,
    pub index_no: String,
    pub date: NaiveDate,
    pub time: String,
    pub timestamp: DateTime<Utc>,
    pub is_entered: bool,
    pub created_at: DateTime<Utc>,
}

impl From<AttendanceRecord> for AttendanceRecordDto {
    fn from(r: AttendanceRecord) -> Self {
        Self {
            id: r.id,
            student: r.student_id,
            index_no: r.index_no,
            date: r.attendance_date,
            time: r.attendance_time,
            timestamp: r.recorded_at,
            is_entered: r.is_entered,
            created_at: r.created_at,
        }
    }
}

/// Response DTO for a student
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentDto {
    pub id: Uuid,
    pub index_no: String,
    pub name: Option<String>,
    pub grade: Option<String>,
    pub section: Option<String>,
    pub attendance: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Student> for StudentDto {
    fn from(s: Student) -> Self {
        Self {
            id: s.id,
            index_no: s.index_no,
            name: s.name,
            grade: s.grade,
            section: s.section,
            attendance: s.attendance,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

/// Response DTO for a recorded scan
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAttendanceResponseDto {
    pub message: String,
    pub saved_record: AttendanceRecordDto,
    pub updated_student: StudentDto,
}
