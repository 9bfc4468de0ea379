use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use utoipa::IntoParams;

use crate::model::attendance::{
    AttendanceEntry, AttendanceFilter, RegisterAttendance, RegisteredAttendance,
};
use crate::repository::attendance;

#[derive(Debug, Deserialize, IntoParams)]
pub struct VerifyQuery {
    #[param(value_type = String, example = "2024-01-15")]
    pub fecha: NaiveDate,
    pub obra_id: i64,
}

/// Register the day's attendance for a site
#[utoipa::path(
    post,
    path = "/api/asistencias/registrar",
    request_body = RegisterAttendance,
    responses(
        (status = 201, description = "Attendance replaced for the date and site", body = Object, example = json!({
            "message": "3 asistencias guardadas exitosamente",
            "registrados": 3
        })),
        (status = 400, description = "Invalid overtime hours"),
        (status = 404, description = "Site or employee not found"),
        (status = 409, description = "Employees already present at another site", body = Object, example = json!({
            "error": "SCHEDULING_CONFLICT",
            "message": "Hay empleados ya registrados como presentes en otra obra en esta fecha",
            "conflictos": [{"empleado_id": 3, "empleado_nombre": "Pedro Martínez", "obra_nombre": "Edificio Central"}]
        }))
    ),
    tag = "Asistencias"
)]
pub async fn register_attendance(
    pool: web::Data<SqlitePool>,
    payload: web::Json<RegisterAttendance>,
) -> actix_web::Result<impl Responder> {
    let written = attendance::register(pool.get_ref(), &payload).await?;

    Ok(HttpResponse::Created().json(json!({
        "message": format!("{} asistencias guardadas exitosamente", written),
        "registrados": written
    })))
}

/// Filtered attendance listing
#[utoipa::path(
    get,
    path = "/api/asistencias",
    params(AttendanceFilter),
    responses(
        (status = 200, description = "Rows ordered by date desc, then employee name", body = [AttendanceEntry]),
        (status = 400, description = "fecha_desde after fecha_hasta or malformed filter")
    ),
    tag = "Asistencias"
)]
pub async fn list_attendance(
    pool: web::Data<SqlitePool>,
    query: web::Query<AttendanceFilter>,
) -> actix_web::Result<impl Responder> {
    let rows = attendance::query(pool.get_ref(), &query).await?;
    Ok(HttpResponse::Ok().json(rows))
}

/// Attendance already registered for a date and site
#[utoipa::path(
    get,
    path = "/api/asistencias/verificar",
    params(VerifyQuery),
    responses(
        (status = 200, description = "Registered rows with employee names", body = [RegisteredAttendance]),
        (status = 400, description = "Missing fecha or obra_id")
    ),
    tag = "Asistencias"
)]
pub async fn verify_attendance(
    pool: web::Data<SqlitePool>,
    query: web::Query<VerifyQuery>,
) -> actix_web::Result<impl Responder> {
    let rows = attendance::verify(pool.get_ref(), query.fecha, query.obra_id).await?;
    Ok(HttpResponse::Ok().json(rows))
}
