use crate::api::health::HealthResponse;
use crate::error::ErrorResponse;
use crate::model::attendance::{Attendance, AttendanceCreate};
use crate::model::employee::{Employee, EmployeeCreate, EmployeeUpdate};
use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS Backend",
        version = "0.1.0",
        description = r#"
## HRMS Lite

A small Human Resource Management backend with two resources.

### Resources
- **Employees**: list, create, view, update and delete employee profiles.
  `employeeId` and `email` are unique across employees.
- **Attendance**: mark one attendance record per employee per day, correct its
  status, and list records newest date first.

### Errors
Every failure answers with `{"detail": "<message>"}`.
- `400` duplicate employee, duplicate attendance mark, or failed update
- `404` referenced employee or record does not exist
- `422` malformed or invalid request body
"#,
    ),
    paths(
        crate::api::employee::list_employees,
        crate::api::employee::create_employee,
        crate::api::employee::get_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,

        crate::api::attendance::list_attendance,
        crate::api::attendance::mark_attendance,
        crate::api::attendance::update_attendance,
        crate::api::attendance::list_employee_attendance,

        crate::api::health::health_check
    ),
    components(
        schemas(
            Employee,
            EmployeeCreate,
            EmployeeUpdate,
            Attendance,
            AttendanceCreate,
            ErrorResponse,
            HealthResponse
        )
    ),
    tags(
        (name = "Employee", description = "Employee management APIs"),
        (name = "Attendance", description = "Attendance management APIs"),
        (name = "Health", description = "Service liveness"),
    )
)]
pub struct ApiDoc;

/// Mounts Swagger UI and the OpenAPI document. `NormalizePath::trim` turns
/// `/swagger-ui/` into `/swagger-ui`, which the UI's wildcard route does not
/// match, so that path redirects to the index page.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::redirect("/swagger-ui", "/swagger-ui/index.html"))
        .service(
            SwaggerUi::new("/swagger-ui/{_:.*}") // wildcard {_:.*} matches JS/CSS files
                .url("/api-doc/openapi.json", ApiDoc::openapi()),
        );
}
