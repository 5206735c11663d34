use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::model::employee::required;

pub const STATUS_MAX: usize = 32;
/// Internal ids are UUID strings.
pub const EMPLOYEE_REF_MAX: usize = 36;
/// Range of a MySQL DATETIME column.
pub const YEARS: std::ops::RangeInclusive<i32> = 1000..=9999;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": "b7a9e3c1-2d44-4f0e-8c55-3f1a6d2e9b70",
        "employeeId": "5f0c2d7e-8f4b-4a43-9a7e-0e7b5a1c9d12",
        "status": "Present",
        "date": "2026-01-05T00:00:00Z",
        "createdAt": "2026-01-05T09:15:02.481Z",
        "updatedAt": "2026-01-05T09:15:02.481Z"
    })
)]
pub struct Attendance {
    pub id: String,

    /// Internal id of the employee.
    pub employee_id: String,

    #[schema(example = "Present")]
    pub status: String,

    #[schema(value_type = String, format = "date-time")]
    pub date: DateTime<Utc>,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,

    #[schema(value_type = String, format = "date-time")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceCreate {
    #[schema(example = "5f0c2d7e-8f4b-4a43-9a7e-0e7b5a1c9d12")]
    pub employee_id: String,

    /// Conventionally "Present" or "Absent".
    #[schema(example = "Present")]
    pub status: String,

    /// Defaults to the time the request is received.
    #[serde(default = "Utc::now", deserialize_with = "deserialize_date")]
    #[schema(value_type = Option<String>, format = "date-time", example = "2026-01-05T00:00:00Z")]
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAttendance {
    pub employee_id: String,
    pub status: String,
    pub date: DateTime<Utc>,
}

impl NewAttendance {
    /// Calendar day (UTC) used for the one-mark-per-day key.
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }
}

impl AttendanceCreate {
    pub fn validate(self) -> Result<NewAttendance, ApiError> {
        if !YEARS.contains(&self.date.year()) {
            return Err(ApiError::ValidationFailed(format!(
                "date: year must be between {} and {}",
                YEARS.start(),
                YEARS.end()
            )));
        }

        Ok(NewAttendance {
            employee_id: required("employeeId", &self.employee_id, EMPLOYEE_REF_MAX)?,
            status: required("status", &self.status, STATUS_MAX)?,
            date: self.date,
        })
    }
}

/// Parses RFC 3339, a naive date-time (taken as UTC) or a bare date (midnight UTC).
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("date: invalid datetime {raw:?}")))
}
