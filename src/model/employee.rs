use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Status an employee must carry to be listed for attendance.
pub const ACTIVE_STATUS: &str = "active";

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "nombre": "Carlos",
        "apellido": "González",
        "dni": "12345678",
        "telefono": "+54 9 11 1111-1111",
        "cargo": "Albañil",
        "fecha_ingreso": "2024-01-15",
        "estado": "active",
        "foto": null,
        "created_at": "2024-01-15T08:00:00"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: i64,

    #[serde(rename = "nombre")]
    #[schema(example = "Carlos")]
    pub first_name: String,

    #[serde(rename = "apellido")]
    #[schema(example = "González")]
    pub last_name: String,

    #[serde(rename = "dni")]
    #[schema(example = "12345678", nullable = true)]
    pub national_id: Option<String>,

    #[serde(rename = "telefono")]
    #[schema(example = "+54 9 11 1111-1111", nullable = true)]
    pub phone: Option<String>,

    #[serde(rename = "cargo")]
    #[schema(example = "Albañil", nullable = true)]
    pub role: Option<String>,

    #[serde(rename = "fecha_ingreso")]
    #[schema(example = "2024-01-15", value_type = Option<String>, format = "date")]
    pub hire_date: Option<NaiveDate>,

    #[serde(rename = "estado")]
    #[schema(example = "active")]
    pub status: String,

    #[serde(rename = "foto")]
    pub photo: Option<String>,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct EmployeePayload {
    #[serde(rename = "nombre")]
    #[schema(example = "Carlos")]
    pub first_name: Option<String>,
    #[serde(rename = "apellido")]
    #[schema(example = "González")]
    pub last_name: Option<String>,
    #[serde(rename = "dni")]
    pub national_id: Option<String>,
    #[serde(rename = "telefono")]
    pub phone: Option<String>,
    #[serde(rename = "cargo")]
    pub role: Option<String>,
    #[serde(rename = "fecha_ingreso")]
    #[schema(example = "2024-01-15", value_type = Option<String>, format = "date")]
    pub hire_date: Option<NaiveDate>,
    /// Defaults to `active` when omitted.
    #[serde(rename = "estado")]
    pub status: Option<String>,
    #[serde(rename = "foto")]
    pub photo: Option<String>,
}
