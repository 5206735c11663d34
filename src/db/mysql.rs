use async_trait::async_trait;
use sqlx::MySqlPool;
use tracing::{debug, info};

use super::{HrStore, new_id};
use crate::error::StoreError;
use crate::model::attendance::{Attendance, NewAttendance};
use crate::model::employee::{Employee, EmployeeUpdate, NewEmployee};
use crate::utils::db_utils::{build_update_sql, execute_update};

const EMPLOYEE_COLUMNS: &str =
    "id, employee_id, full_name, email, department, created_at, updated_at";

const ATTENDANCE_COLUMNS: &str = "id, employee_id, status, `date`, created_at, updated_at";

#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = MySqlPool::connect(database_url).await?;
        info!("Connected to database");
        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations applied");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Disconnected from database");
    }

    async fn fetch_employee(&self, id: &str) -> Result<Option<Employee>, StoreError> {
        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ?");
        sqlx::query_as::<_, Employee>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)
    }

    async fn fetch_attendance(&self, id: &str) -> Result<Option<Attendance>, StoreError> {
        let sql = format!("SELECT {ATTENDANCE_COLUMNS} FROM attendance WHERE id = ?");
        sqlx::query_as::<_, Attendance>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)
    }
}

#[async_trait]
impl HrStore for MySqlStore {
    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        let sql = format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Employee>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)
    }

    async fn find_employee(&self, id: &str) -> Result<Option<Employee>, StoreError> {
        self.fetch_employee(id).await
    }

    async fn find_employee_by_code_or_email(
        &self,
        employee_id: &str,
        email: &str,
    ) -> Result<Option<Employee>, StoreError> {
        let sql = format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE employee_id = ? OR email = ? LIMIT 1"
        );
        sqlx::query_as::<_, Employee>(&sql)
            .bind(employee_id)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)
    }

    async fn find_employee_by_email(&self, email: &str) -> Result<Option<Employee>, StoreError> {
        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE email = ? LIMIT 1");
        sqlx::query_as::<_, Employee>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)
    }

    async fn create_employee(&self, employee: NewEmployee) -> Result<Employee, StoreError> {
        let id = new_id();

        sqlx::query(
            r#"
            INSERT INTO employees (id, employee_id, full_name, email, department)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&employee.employee_id)
        .bind(&employee.full_name)
        .bind(&employee.email)
        .bind(&employee.department)
        .execute(&self.pool)
        .await
        .map_err(StoreError::from_sqlx)?;

        self.fetch_employee(&id).await?.ok_or(StoreError::NotFound)
    }

    async fn update_employee(
        &self,
        id: &str,
        update: EmployeeUpdate,
    ) -> Result<Employee, StoreError> {
        let assignments = [
            ("full_name", update.full_name.as_deref()),
            ("email", update.email.as_deref()),
            ("department", update.department.as_deref()),
        ];

        if let Some(sql_update) = build_update_sql("employees", &assignments, "id") {
            debug!(sql = %sql_update.sql, "Updating employee");
            execute_update(&self.pool, sql_update, id)
                .await
                .map_err(StoreError::from_sqlx)?;
        }

        // rows_affected is 0 for a no-op update on MySQL, so existence is read back
        self.fetch_employee(id).await?.ok_or(StoreError::NotFound)
    }

    async fn delete_employee(&self, id: &str) -> Result<Employee, StoreError> {
        let existing = self.fetch_employee(id).await?.ok_or(StoreError::NotFound)?;

        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(existing)
    }

    async fn list_attendance(
        &self,
        employee_id: Option<&str>,
    ) -> Result<Vec<Attendance>, StoreError> {
        let query = match employee_id {
            Some(employee_id) => {
                let sql = format!(
                    "SELECT {ATTENDANCE_COLUMNS} FROM attendance WHERE employee_id = ? ORDER BY `date` DESC"
                );
                sqlx::query_as::<_, Attendance>(&sql)
                    .bind(employee_id)
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                let sql = format!("SELECT {ATTENDANCE_COLUMNS} FROM attendance ORDER BY `date` DESC");
                sqlx::query_as::<_, Attendance>(&sql)
                    .fetch_all(&self.pool)
                    .await
            }
        };
        query.map_err(StoreError::from_sqlx)
    }

    async fn find_attendance(&self, id: &str) -> Result<Option<Attendance>, StoreError> {
        self.fetch_attendance(id).await
    }

    async fn create_attendance(
        &self,
        attendance: NewAttendance,
    ) -> Result<Attendance, StoreError> {
        let id = new_id();

        sqlx::query(
            r#"
            INSERT INTO attendance (id, employee_id, status, `date`, `day`)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&attendance.employee_id)
        .bind(&attendance.status)
        .bind(attendance.date)
        .bind(attendance.day())
        .execute(&self.pool)
        .await
        .map_err(StoreError::from_sqlx)?;

        self.fetch_attendance(&id).await?.ok_or(StoreError::NotFound)
    }

    async fn update_attendance_status(
        &self,
        id: &str,
        status: &str,
    ) -> Result<Attendance, StoreError> {
        sqlx::query("UPDATE attendance SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)?;

        self.fetch_attendance(id).await?.ok_or(StoreError::NotFound)
    }
}
