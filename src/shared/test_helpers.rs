#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
use axum::Router;
#[cfg(test)]
use fake::{faker::name::en::Name, Fake};

#[cfg(test)]
use crate::features::attendance::{routes as attendance_routes, AttendanceService, ReportService};
#[cfg(test)]
use crate::modules::storage::memory::InMemoryStorage;

/// Seed three students: S001 (10/A), S002 (10/B), S003 (11/A)
#[cfg(test)]
pub async fn seed_students(storage: &InMemoryStorage) {
    for (index_no, grade, section) in [
        ("S001", "10", "A"),
        ("S002", "10", "B"),
        ("S003", "11", "A"),
    ] {
        let name: String = Name().fake();
        storage
            .add_student(index_no, Some(&name), Some(grade), Some(section))
            .await;
    }
}

/// Attendance routes wired to `storage`
#[cfg(test)]
pub fn attendance_router(storage: Arc<InMemoryStorage>) -> Router {
    attendance_routes::routes(
        Arc::new(AttendanceService::new(storage.clone())),
        Arc::new(ReportService::new(storage)),
    )
}
