use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use sqlx::SqlitePool;

use crate::model::employee::Employee;
use crate::model::site::{Site, SitePayload};
use crate::repository::{employee, site};

#[utoipa::path(
    get,
    path = "/api/obras",
    responses((status = 200, description = "Sites with client and leader names", body = [Site])),
    tag = "Obras"
)]
pub async fn list_sites(pool: web::Data<SqlitePool>) -> actix_web::Result<impl Responder> {
    Ok(HttpResponse::Ok().json(site::list(pool.get_ref()).await?))
}

#[utoipa::path(
    get,
    path = "/api/obras/{id}",
    params(("id", Path, description = "Site ID")),
    responses(
        (status = 200, description = "Site found", body = Site),
        (status = 404, description = "Site not found")
    ),
    tag = "Obras"
)]
pub async fn get_site(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    Ok(HttpResponse::Ok().json(site::get(pool.get_ref(), path.into_inner()).await?))
}

/// Create a site and assign `empleados_ids` to it
#[utoipa::path(
    post,
    path = "/api/obras",
    request_body = SitePayload,
    responses(
        (status = 201, description = "Site created", body = Object, example = json!({
            "id": 2,
            "message": "Obra creada exitosamente"
        })),
        (status = 400, description = "Missing required field"),
        (status = 404, description = "Referenced client, leader or employee not found")
    ),
    tag = "Obras"
)]
pub async fn create_site(
    pool: web::Data<SqlitePool>,
    payload: web::Json<SitePayload>,
) -> actix_web::Result<impl Responder> {
    let id = site::create(pool.get_ref(), &payload).await?;

    Ok(HttpResponse::Created().json(json!({
        "id": id,
        "message": "Obra creada exitosamente"
    })))
}

/// Update a site; its assignments become exactly `empleados_ids`
#[utoipa::path(
    put,
    path = "/api/obras/{id}",
    params(("id", Path, description = "Site ID")),
    request_body = SitePayload,
    responses(
        (status = 200, description = "Site updated"),
        (status = 404, description = "Site or referenced entity not found")
    ),
    tag = "Obras"
)]
pub async fn update_site(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<SitePayload>,
) -> actix_web::Result<impl Responder> {
    site::update(pool.get_ref(), path.into_inner(), &payload).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Obra actualizada exitosamente"
    })))
}

#[utoipa::path(
    delete,
    path = "/api/obras/{id}",
    params(("id", Path, description = "Site ID")),
    responses(
        (status = 200, description = "Site deleted, attendance history kept"),
        (status = 404, description = "Site not found")
    ),
    tag = "Obras"
)]
pub async fn delete_site(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    site::delete(pool.get_ref(), path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Obra eliminada exitosamente"
    })))
}

/// Active employees assigned to a site
#[utoipa::path(
    get,
    path = "/api/obras/{id}/empleados",
    params(("id", Path, description = "Site ID")),
    responses((status = 200, description = "Active assigned employees", body = [Employee])),
    tag = "Obras"
)]
pub async fn list_site_employees(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let employees = employee::list_active_for_site(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(employees))
}

/// Every employee id assigned to a site, any status
#[utoipa::path(
    get,
    path = "/api/obras/{id}/asignaciones",
    params(("id", Path, description = "Site ID")),
    responses((status = 200, description = "Assigned employee ids", body = [i64])),
    tag = "Obras"
)]
pub async fn list_site_assignments(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let ids = site::assigned_employee_ids(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ids))
}
