/// Calendar date format used for report keys and range echoes
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time-of-day format used when a scan arrives without an explicit time
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Bucket for students whose grade or section is not recorded
pub const UNASSIGNED_KEY: &str = "unassigned";

// ================================
// Messages
// ================================

pub const REQUIRED_ATTENDANCE_FIELDS_MESSAGE: &str =
    "Required attendance record details can not be empty";

pub const SUCCESS_MESSAGE: &str = "SUCCESS";
