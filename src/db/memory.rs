//! In-memory [`HrStore`] for handler tests. Mirrors the unique keys and the
//! cascading foreign key of the MySQL schema, including the case-insensitive
//! comparison the default collation applies to `employee_id` and `email`.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use super::{HrStore, new_id};
use crate::error::StoreError;
use crate::model::attendance::{Attendance, NewAttendance};
use crate::model::employee::{Employee, EmployeeUpdate, NewEmployee};

#[derive(Default)]
pub struct MemoryStore {
    employees: Mutex<Vec<Employee>>,
    attendance: Mutex<Vec<Attendance>>,
    fail_writes: AtomicBool,
    hide_duplicates: AtomicBool,
}

fn same_key(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write fail with a driver error.
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    /// Makes the duplicate lookup miss, as when a concurrent create lands
    /// between the lookup and the insert. The unique keys still apply.
    pub fn hide_duplicates(&self) {
        self.hide_duplicates.store(true, Ordering::SeqCst);
    }

    pub fn employee_count(&self) -> usize {
        self.employees.lock().unwrap().len()
    }

    pub fn attendance_count(&self) -> usize {
        self.attendance.lock().unwrap().len()
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::Protocol(
                "connection reset by peer".to_string(),
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl HrStore for MemoryStore {
    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        let mut employees: Vec<Employee> =
            self.employees.lock().unwrap().iter().rev().cloned().collect();
        employees.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(employees)
    }

    async fn find_employee(&self, id: &str) -> Result<Option<Employee>, StoreError> {
        Ok(self
            .employees
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned())
    }

    async fn find_employee_by_code_or_email(
        &self,
        employee_id: &str,
        email: &str,
    ) -> Result<Option<Employee>, StoreError> {
        if self.hide_duplicates.load(Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(self
            .employees
            .lock()
            .unwrap()
            .iter()
            .find(|e| same_key(&e.employee_id, employee_id) || same_key(&e.email, email))
            .cloned())
    }

    async fn find_employee_by_email(&self, email: &str) -> Result<Option<Employee>, StoreError> {
        Ok(self
            .employees
            .lock()
            .unwrap()
            .iter()
            .find(|e| same_key(&e.email, email))
            .cloned())
    }

    async fn create_employee(&self, employee: NewEmployee) -> Result<Employee, StoreError> {
        self.check_writable()?;
        let mut employees = self.employees.lock().unwrap();

        if employees
            .iter()
            .any(|e| {
                same_key(&e.employee_id, &employee.employee_id)
                    || same_key(&e.email, &employee.email)
            })
        {
            return Err(StoreError::Conflict);
        }

        let now = Utc::now();
        let record = Employee {
            id: new_id(),
            employee_id: employee.employee_id,
            full_name: employee.full_name,
            email: employee.email,
            department: employee.department,
            created_at: now,
            updated_at: now,
        };
        employees.push(record.clone());
        Ok(record)
    }

    async fn update_employee(
        &self,
        id: &str,
        update: EmployeeUpdate,
    ) -> Result<Employee, StoreError> {
        self.check_writable()?;
        let mut employees = self.employees.lock().unwrap();

        if let Some(email) = &update.email {
            if employees.iter().any(|e| e.id != id && same_key(&e.email, email)) {
                return Err(StoreError::Conflict);
            }
        }

        let record = employees
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(StoreError::NotFound)?;

        if let Some(full_name) = update.full_name {
            record.full_name = full_name;
        }
        if let Some(email) = update.email {
            record.email = email;
        }
        if let Some(department) = update.department {
            record.department = department;
        }
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn delete_employee(&self, id: &str) -> Result<Employee, StoreError> {
        self.check_writable()?;
        let mut employees = self.employees.lock().unwrap();

        let index = employees
            .iter()
            .position(|e| e.id == id)
            .ok_or(StoreError::NotFound)?;
        let removed = employees.remove(index);

        self.attendance
            .lock()
            .unwrap()
            .retain(|a| a.employee_id != removed.id);
        Ok(removed)
    }

    async fn list_attendance(
        &self,
        employee_id: Option<&str>,
    ) -> Result<Vec<Attendance>, StoreError> {
        let mut records: Vec<Attendance> = self
            .attendance
            .lock()
            .unwrap()
            .iter()
            .filter(|a| employee_id.is_none_or(|id| a.employee_id == id))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(records)
    }

    async fn find_attendance(&self, id: &str) -> Result<Option<Attendance>, StoreError> {
        Ok(self
            .attendance
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn create_attendance(
        &self,
        attendance: NewAttendance,
    ) -> Result<Attendance, StoreError> {
        self.check_writable()?;

        if !self
            .employees
            .lock()
            .unwrap()
            .iter()
            .any(|e| e.id == attendance.employee_id)
        {
            return Err(StoreError::Conflict);
        }

        let mut records = self.attendance.lock().unwrap();
        let day = attendance.day();
        if records
            .iter()
            .any(|a| a.employee_id == attendance.employee_id && a.date.date_naive() == day)
        {
            return Err(StoreError::Conflict);
        }

        let now = Utc::now();
        let record = Attendance {
            id: new_id(),
            employee_id: attendance.employee_id,
            status: attendance.status,
            date: attendance.date,
            created_at: now,
            updated_at: now,
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn update_attendance_status(
        &self,
        id: &str,
        status: &str,
    ) -> Result<Attendance, StoreError> {
        self.check_writable()?;
        let mut records = self.attendance.lock().unwrap();

        let record = records
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(StoreError::NotFound)?;
        record.status = status.to_string();
        record.updated_at = Utc::now();
        Ok(record.clone())
    }
}
