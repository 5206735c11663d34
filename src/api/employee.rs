use actix_web::{HttpResponse, web};
use tracing::{info, instrument, warn};

use crate::{
    db::HrStore,
    error::{ApiError, StoreError},
    model::employee::{EmployeeCreate, EmployeeUpdate},
};

const DUPLICATE_EMPLOYEE: &str = "Employee with this ID or Email already exists";
const DUPLICATE_EMAIL: &str = "Employee with this Email already exists";
const EMPLOYEE_NOT_FOUND: &str = "Employee not found";

/// List Employees
#[utoipa::path(
    get,
    path = "/api/v1/employees",
    responses(
        (status = 200, description = "All employees, newest first", body = [Employee]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Employee"
)]
pub async fn list_employees(store: web::Data<dyn HrStore>) -> Result<HttpResponse, ApiError> {
    let employees = store.list_employees().await?;
    Ok(HttpResponse::Ok().json(employees))
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/v1/employees",
    request_body = EmployeeCreate,
    responses(
        (status = 200, description = "Employee created", body = Employee),
        (status = 400, description = "Duplicate employee id or email", body = ErrorResponse, example = json!({
            "detail": "Employee with this ID or Email already exists"
        })),
        (status = 422, description = "Invalid request body", body = ErrorResponse)
    ),
    tag = "Employee"
)]
#[instrument(skip(store, payload))]
pub async fn create_employee(
    store: web::Data<dyn HrStore>,
    payload: web::Json<EmployeeCreate>,
) -> Result<HttpResponse, ApiError> {
    let new = payload.into_inner().validate()?;

    if let Some(existing) = store
        .find_employee_by_code_or_email(&new.employee_id, &new.email)
        .await?
    {
        warn!(employee_id = %new.employee_id, existing = %existing.id, "Duplicate employee rejected");
        return Err(ApiError::Conflict(DUPLICATE_EMPLOYEE.to_string()));
    }

    // a concurrent create can still win the race; the unique keys catch it
    let employee = match store.create_employee(new).await {
        Ok(employee) => employee,
        Err(StoreError::Conflict) => {
            return Err(ApiError::Conflict(DUPLICATE_EMPLOYEE.to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    info!(id = %employee.id, employee_id = %employee.employee_id, "Employee created");
    Ok(HttpResponse::Ok().json(employee))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/v1/employees/{id}",
    params(
        ("id" = String, Path, description = "Internal employee id")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = ErrorResponse)
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    store: web::Data<dyn HrStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    match store.find_employee(&id).await? {
        Some(employee) => Ok(HttpResponse::Ok().json(employee)),
        None => Err(ApiError::NotFound(EMPLOYEE_NOT_FOUND.to_string())),
    }
}

/// Update Employee
#[utoipa::path(
    put,
    path = "/api/v1/employees/{id}",
    params(
        ("id" = String, Path, description = "Internal employee id")
    ),
    request_body = EmployeeUpdate,
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 400, description = "Email already in use", body = ErrorResponse),
        (status = 404, description = "Employee not found", body = ErrorResponse),
        (status = 422, description = "Invalid request body", body = ErrorResponse)
    ),
    tag = "Employee"
)]
#[instrument(skip(store, body))]
pub async fn update_employee(
    store: web::Data<dyn HrStore>,
    path: web::Path<String>,
    body: web::Json<EmployeeUpdate>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let update = body.into_inner().validate()?;

    if store.find_employee(&id).await?.is_none() {
        return Err(ApiError::NotFound(EMPLOYEE_NOT_FOUND.to_string()));
    }

    if let Some(email) = &update.email {
        if let Some(other) = store.find_employee_by_email(email).await? {
            if other.id != id {
                return Err(ApiError::Conflict(DUPLICATE_EMAIL.to_string()));
            }
        }
    }

    match store.update_employee(&id, update).await {
        Ok(employee) => {
            info!(id = %employee.id, "Employee updated");
            Ok(HttpResponse::Ok().json(employee))
        }
        Err(StoreError::NotFound) => Err(ApiError::NotFound(EMPLOYEE_NOT_FOUND.to_string())),
        Err(StoreError::Conflict) => Err(ApiError::Conflict(DUPLICATE_EMAIL.to_string())),
        Err(e) => Err(e.into()),
    }
}

/// Delete Employee
#[utoipa::path(
    delete,
    path = "/api/v1/employees/{id}",
    params(
        ("id" = String, Path, description = "Internal employee id")
    ),
    responses(
        (status = 200, description = "Deleted employee", body = Employee),
        (status = 404, description = "Employee not found", body = ErrorResponse, example = json!({
            "detail": "Employee not found"
        })),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Employee"
)]
#[instrument(skip(store))]
pub async fn delete_employee(
    store: web::Data<dyn HrStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    match store.delete_employee(&id).await {
        Ok(employee) => {
            info!(id = %employee.id, employee_id = %employee.employee_id, "Employee deleted");
            Ok(HttpResponse::Ok().json(employee))
        }
        Err(StoreError::NotFound) => Err(ApiError::NotFound(EMPLOYEE_NOT_FOUND.to_string())),
        Err(e) => Err(e.into()),
    }
}
