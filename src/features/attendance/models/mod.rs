mod attendance_record;
mod date_filter;
mod student;

pub use attendance_record::{AttendanceRecord, DailyScan, NewAttendanceRecord, PresenceRow};
pub use date_filter::DateFilter;
pub use student::Student;
