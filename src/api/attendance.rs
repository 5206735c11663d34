use actix_web::{HttpResponse, web};
use tracing::{info, instrument, warn};

use crate::{
    db::HrStore,
    error::ApiError,
    model::attendance::AttendanceCreate,
};

const ALREADY_MARKED: &str = "Attendance already marked for this employee on this date";

/// List attendance records
#[utoipa::path(
    get,
    path = "/api/v1/attendance",
    responses(
        (status = 200, description = "All records, newest date first", body = [Attendance]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(store: web::Data<dyn HrStore>) -> Result<HttpResponse, ApiError> {
    let records = store.list_attendance(None).await?;
    Ok(HttpResponse::Ok().json(records))
}

/// Mark attendance
#[utoipa::path(
    post,
    path = "/api/v1/attendance",
    request_body = AttendanceCreate,
    responses(
        (status = 200, description = "Attendance marked", body = Attendance),
        (status = 400, description = "Already marked for that day", body = ErrorResponse, example = json!({
            "detail": "Attendance already marked for this employee on this date"
        })),
        (status = 404, description = "Employee not found", body = ErrorResponse),
        (status = 422, description = "Invalid request body", body = ErrorResponse)
    ),
    tag = "Attendance"
)]
#[instrument(skip(store, payload))]
pub async fn mark_attendance(
    store: web::Data<dyn HrStore>,
    payload: web::Json<AttendanceCreate>,
) -> Result<HttpResponse, ApiError> {
    let new = payload.into_inner().validate()?;

    if store.find_employee(&new.employee_id).await?.is_none() {
        return Err(ApiError::NotFound("Employee not found".to_string()));
    }

    let employee_id = new.employee_id.clone();
    let day = new.day();

    // every store failure here is reported as a duplicate mark
    match store.create_attendance(new).await {
        Ok(record) => {
            info!(id = %record.id, employee_id = %record.employee_id, %day, "Attendance marked");
            Ok(HttpResponse::Ok().json(record))
        }
        Err(e) => {
            warn!(error = %e, %employee_id, %day, "Attendance mark rejected");
            Err(ApiError::Conflict(ALREADY_MARKED.to_string()))
        }
    }
}

/// Update attendance status
#[utoipa::path(
    put,
    path = "/api/v1/attendance/{id}",
    params(
        ("id" = String, Path, description = "Attendance record id")
    ),
    request_body(content = AttendanceCreate, description = "Only `status` is applied"),
    responses(
        (status = 200, description = "Attendance updated", body = Attendance),
        (status = 400, description = "Update failed", body = ErrorResponse),
        (status = 404, description = "Attendance record not found", body = ErrorResponse)
    ),
    tag = "Attendance"
)]
#[instrument(skip(store, payload))]
pub async fn update_attendance(
    store: web::Data<dyn HrStore>,
    path: web::Path<String>,
    payload: web::Json<AttendanceCreate>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let change = payload.into_inner().validate()?;

    if store.find_attendance(&id).await?.is_none() {
        return Err(ApiError::NotFound("Attendance record not found".to_string()));
    }

    match store.update_attendance_status(&id, &change.status).await {
        Ok(record) => {
            info!(id = %record.id, status = %record.status, "Attendance updated");
            Ok(HttpResponse::Ok().json(record))
        }
        Err(e) => {
            warn!(error = %e, %id, "Attendance update failed");
            Err(ApiError::BadRequest(format!(
                "Failed to update attendance: {e}"
            )))
        }
    }
}

/// List attendance records of one employee
///
/// An unknown employee id yields an empty list.
#[utoipa::path(
    get,
    path = "/api/v1/attendance/employee/{employee_id}",
    params(
        ("employee_id" = String, Path, description = "Internal employee id")
    ),
    responses(
        (status = 200, description = "The employee's records, newest date first", body = [Attendance])
    ),
    tag = "Attendance"
)]
pub async fn list_employee_attendance(
    store: web::Data<dyn HrStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();
    let records = store.list_attendance(Some(&employee_id)).await?;
    Ok(HttpResponse::Ok().json(records))
}
