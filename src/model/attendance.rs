use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Attendance row joined with every display field the reports need.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceEntry {
    pub id: i64,
    #[serde(rename = "fecha")]
    #[schema(example = "2024-01-15", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[serde(rename = "obra_id")]
    pub site_id: i64,
    #[serde(rename = "empleado_id")]
    pub employee_id: i64,
    #[serde(rename = "presente")]
    pub present: bool,
    #[serde(rename = "tipo_jornada")]
    #[schema(example = "dia")]
    pub shift_type: Option<String>,
    #[serde(rename = "horas_extras")]
    #[schema(example = 2.0)]
    pub overtime_hours: f64,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: Option<NaiveDateTime>,

    #[serde(rename = "obra_nombre")]
    pub site_name: String,
    #[serde(rename = "cliente_id")]
    pub client_id: Option<i64>,
    #[serde(rename = "cliente_nombre")]
    pub client_name: Option<String>,
    #[serde(rename = "lider_id")]
    pub leader_id: Option<i64>,
    #[serde(rename = "lider_nombre")]
    pub leader_first_name: Option<String>,
    #[serde(rename = "lider_apellido")]
    pub leader_last_name: Option<String>,
    #[serde(rename = "empleado_nombre")]
    pub employee_first_name: String,
    #[serde(rename = "empleado_apellido")]
    pub employee_last_name: String,
    #[serde(rename = "cargo")]
    pub employee_role: Option<String>,
}

/// Attendance row for one (date, site) pair, as shown before editing.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct RegisteredAttendance {
    pub id: i64,
    #[serde(rename = "fecha")]
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    #[serde(rename = "obra_id")]
    pub site_id: i64,
    #[serde(rename = "empleado_id")]
    pub employee_id: i64,
    #[serde(rename = "presente")]
    pub present: bool,
    #[serde(rename = "tipo_jornada")]
    pub shift_type: Option<String>,
    #[serde(rename = "horas_extras")]
    pub overtime_hours: f64,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
}

/// Employee already marked present at another site on the same date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Conflict {
    #[serde(rename = "empleado_id")]
    #[schema(example = 3)]
    pub employee_id: i64,
    #[serde(rename = "empleado_nombre")]
    #[schema(example = "Pedro Martínez")]
    pub employee_name: String,
    #[serde(rename = "obra_nombre")]
    #[schema(example = "Edificio Central")]
    pub site_name: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AttendanceInput {
    #[serde(rename = "empleado_id")]
    #[schema(example = 1)]
    pub employee_id: i64,
    #[serde(rename = "presente")]
    #[schema(example = true)]
    pub present: bool,
    #[serde(rename = "tipo_jornada")]
    #[schema(example = "dia")]
    pub shift_type: Option<String>,
    #[serde(rename = "horas_extras")]
    #[schema(example = 0.0)]
    pub overtime_hours: Option<f64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterAttendance {
    #[serde(rename = "fecha")]
    #[schema(example = "2024-01-15", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[serde(rename = "obra_id")]
    #[schema(example = 1)]
    pub site_id: i64,
    #[serde(rename = "lider_id")]
    #[schema(example = 1)]
    pub leader_id: Option<i64>,
    #[serde(rename = "registros")]
    pub records: Vec<AttendanceInput>,
}

/// Optional filters of the attendance listing; absent keys do not filter.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct AttendanceFilter {
    #[serde(rename = "fecha_desde")]
    pub date_from: Option<NaiveDate>,
    #[serde(rename = "fecha_hasta")]
    pub date_to: Option<NaiveDate>,
    #[serde(rename = "cliente_id")]
    pub client_id: Option<i64>,
    #[serde(rename = "obra_id")]
    pub site_id: Option<i64>,
    #[serde(rename = "empleado_id")]
    pub employee_id: Option<i64>,
    #[serde(rename = "lider_id")]
    pub leader_id: Option<i64>,
}
