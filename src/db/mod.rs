use async_trait::async_trait;

use crate::error::StoreError;
use crate::model::attendance::{Attendance, NewAttendance};
use crate::model::employee::{Employee, EmployeeUpdate, NewEmployee};

pub mod mysql;

#[cfg(test)]
pub mod memory;

pub use mysql::MySqlStore;

/// Persistence client shared by every handler.
///
/// Implementations own all durable state; handlers keep none.
#[async_trait]
pub trait HrStore: Send + Sync {
    /// Newest first.
    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError>;

    async fn find_employee(&self, id: &str) -> Result<Option<Employee>, StoreError>;

    /// Any employee holding either the business id or the email.
    async fn find_employee_by_code_or_email(
        &self,
        employee_id: &str,
        email: &str,
    ) -> Result<Option<Employee>, StoreError>;

    async fn find_employee_by_email(&self, email: &str) -> Result<Option<Employee>, StoreError>;

    async fn create_employee(&self, employee: NewEmployee) -> Result<Employee, StoreError>;

    async fn update_employee(
        &self,
        id: &str,
        update: EmployeeUpdate,
    ) -> Result<Employee, StoreError>;

    /// Returns the record as it was before removal.
    async fn delete_employee(&self, id: &str) -> Result<Employee, StoreError>;

    /// Ordered by `date`, newest first.
    async fn list_attendance(
        &self,
        employee_id: Option<&str>,
    ) -> Result<Vec<Attendance>, StoreError>;

    async fn find_attendance(&self, id: &str) -> Result<Option<Attendance>, StoreError>;

    async fn create_attendance(
        &self,
        attendance: NewAttendance,
    ) -> Result<Attendance, StoreError>;

    async fn update_attendance_status(
        &self,
        id: &str,
        status: &str,
    ) -> Result<Attendance, StoreError>;
}

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
