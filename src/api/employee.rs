use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use utoipa::IntoParams;

use crate::model::employee::{Employee, EmployeePayload};
use crate::repository::employee;

#[derive(Debug, Deserialize, IntoParams)]
pub struct EmployeeQuery {
    /// Only employees with this status, e.g. `active`
    pub estado: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/empleados",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Employees ordered by first and last name", body = [Employee])
    ),
    tag = "Empleados"
)]
pub async fn list_employees(
    pool: web::Data<SqlitePool>,
    query: web::Query<EmployeeQuery>,
) -> actix_web::Result<impl Responder> {
    let employees = employee::list(pool.get_ref(), query.estado.as_deref()).await?;
    Ok(HttpResponse::Ok().json(employees))
}

#[utoipa::path(
    get,
    path = "/api/empleados/{id}",
    params(("id", Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found")
    ),
    tag = "Empleados"
)]
pub async fn get_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let employee = employee::get(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(employee))
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/empleados",
    request_body = EmployeePayload,
    responses(
        (status = 201, description = "Employee created", body = Object, example = json!({
            "id": 4,
            "message": "Empleado creado exitosamente"
        })),
        (status = 400, description = "Missing required field", body = Object, example = json!({
            "error": "VALIDATION_ERROR",
            "message": "El campo 'apellido' es obligatorio"
        }))
    ),
    tag = "Empleados"
)]
pub async fn create_employee(
    pool: web::Data<SqlitePool>,
    payload: web::Json<EmployeePayload>,
) -> actix_web::Result<impl Responder> {
    let id = employee::create(pool.get_ref(), &payload).await?;

    Ok(HttpResponse::Created().json(json!({
        "id": id,
        "message": "Empleado creado exitosamente"
    })))
}

/// Update Employee
#[utoipa::path(
    put,
    path = "/api/empleados/{id}",
    params(("id", Path, description = "Employee ID")),
    request_body = EmployeePayload,
    responses(
        (status = 200, description = "Employee updated", body = Object, example = json!({
            "message": "Empleado actualizado exitosamente"
        })),
        (status = 404, description = "Employee not found")
    ),
    tag = "Empleados"
)]
pub async fn update_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<EmployeePayload>,
) -> actix_web::Result<impl Responder> {
    employee::update(pool.get_ref(), path.into_inner(), &payload).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Empleado actualizado exitosamente"
    })))
}

/// Delete Employee
#[utoipa::path(
    delete,
    path = "/api/empleados/{id}",
    params(("id", Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee deleted", body = Object, example = json!({
            "message": "Empleado eliminado exitosamente"
        })),
        (status = 404, description = "Employee not found")
    ),
    tag = "Empleados"
)]
pub async fn delete_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    employee::delete(pool.get_ref(), path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Empleado eliminado exitosamente"
    })))
}
