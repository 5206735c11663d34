use chrono::{DateTime, Utc};
use email_address::EmailAddress;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;

// Column widths in the employees table, in characters.
pub const EMPLOYEE_ID_MAX: usize = 64;
pub const FULL_NAME_MAX: usize = 255;
pub const EMAIL_MAX: usize = 255;
pub const DEPARTMENT_MAX: usize = 128;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": "5f0c2d7e-8f4b-4a43-9a7e-0e7b5a1c9d12",
        "employeeId": "EMP-001",
        "fullName": "John Doe",
        "email": "john.doe@company.com",
        "department": "Engineering",
        "createdAt": "2026-01-05T09:12:44.120Z",
        "updatedAt": "2026-01-05T09:12:44.120Z"
    })
)]
pub struct Employee {
    #[schema(example = "5f0c2d7e-8f4b-4a43-9a7e-0e7b5a1c9d12")]
    pub id: String,

    #[schema(example = "EMP-001")]
    pub employee_id: String,

    #[schema(example = "John Doe")]
    pub full_name: String,

    #[schema(example = "john.doe@company.com", format = "email")]
    pub email: String,

    #[schema(example = "Engineering")]
    pub department: String,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,

    #[schema(value_type = String, format = "date-time")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeCreate {
    #[schema(example = "EMP-001")]
    pub employee_id: String,
    #[schema(example = "John Doe")]
    pub full_name: String,
    #[schema(example = "john.doe@company.com", format = "email")]
    pub email: String,
    #[schema(example = "Engineering")]
    pub department: String,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdate {
    #[schema(example = "John A. Doe")]
    pub full_name: Option<String>,
    #[schema(example = "john.a.doe@company.com", format = "email")]
    pub email: Option<String>,
    #[schema(example = "Platform")]
    pub department: Option<String>,
}

/// A validated [`EmployeeCreate`], ready to persist.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
}

impl EmployeeCreate {
    pub fn validate(self) -> Result<NewEmployee, ApiError> {
        Ok(NewEmployee {
            employee_id: required("employeeId", &self.employee_id, EMPLOYEE_ID_MAX)?,
            full_name: required("fullName", &self.full_name, FULL_NAME_MAX)?,
            email: normalize_email(&self.email)?,
            department: required("department", &self.department, DEPARTMENT_MAX)?,
        })
    }
}

impl EmployeeUpdate {
    pub fn validate(self) -> Result<EmployeeUpdate, ApiError> {
        let update = EmployeeUpdate {
            full_name: self
                .full_name
                .as_deref()
                .map(|v| required("fullName", v, FULL_NAME_MAX))
                .transpose()?,
            email: self.email.as_deref().map(normalize_email).transpose()?,
            department: self
                .department
                .as_deref()
                .map(|v| required("department", v, DEPARTMENT_MAX))
                .transpose()?,
        };

        if update.is_empty() {
            return Err(ApiError::ValidationFailed(
                "No fields provided for update".to_string(),
            ));
        }
        Ok(update)
    }

    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.email.is_none() && self.department.is_none()
    }
}

/// Trims `value` and checks it is non-empty and at most `max` characters.
pub(crate) fn required(field: &str, value: &str, max: usize) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::ValidationFailed(format!(
            "{field}: must not be empty"
        )));
    }
    check_length(field, trimmed, max)?;
    Ok(trimmed.to_string())
}

fn check_length(field: &str, value: &str, max: usize) -> Result<(), ApiError> {
    if value.chars().count() > max {
        return Err(ApiError::ValidationFailed(format!(
            "{field}: must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Trims and lowercases; emails are compared case-insensitively.
pub fn normalize_email(email: &str) -> Result<String, ApiError> {
    let trimmed = email.trim();
    check_length("email", trimmed, EMAIL_MAX)?;

    if !EmailAddress::is_valid(trimmed) {
        return Err(ApiError::ValidationFailed(
            "email: value is not a valid email address".to_string(),
        ));
    }

    // the domain must carry a TLD
    let has_tld = trimmed
        .rsplit_once('@')
        .is_some_and(|(_, domain)| domain.contains('.'));
    if !has_tld {
        return Err(ApiError::ValidationFailed(
            "email: domain must include a TLD".to_string(),
        ));
    }

    Ok(trimmed.to_lowercase())
}
