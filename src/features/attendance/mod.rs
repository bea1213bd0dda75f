//! Attendance recording and reporting.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/attendance` | Record a scan for a student |
//! | GET | `/api/attendance` | List records, optionally bounded by `from`/`to` |
//! | GET | `/api/attendance/report` | Per-day presence report |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{AttendanceService, ReportService};
