mod attendance_dto;
mod report_dto;

pub use attendance_dto::*;
pub use report_dto::*;
