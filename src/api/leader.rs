use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use sqlx::SqlitePool;

use crate::model::leader::{Leader, LeaderPayload};
use crate::repository::leader;

#[utoipa::path(
    get,
    path = "/api/lideres",
    responses((status = 200, description = "Leaders ordered by name", body = [Leader])),
    tag = "Lideres"
)]
pub async fn list_leaders(pool: web::Data<SqlitePool>) -> actix_web::Result<impl Responder> {
    Ok(HttpResponse::Ok().json(leader::list(pool.get_ref()).await?))
}

#[utoipa::path(
    get,
    path = "/api/lideres/{id}",
    params(("id", Path, description = "Leader ID")),
    responses(
        (status = 200, description = "Leader found", body = Leader),
        (status = 404, description = "Leader not found")
    ),
    tag = "Lideres"
)]
pub async fn get_leader(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    Ok(HttpResponse::Ok().json(leader::get(pool.get_ref(), path.into_inner()).await?))
}

#[utoipa::path(
    post,
    path = "/api/lideres",
    request_body = LeaderPayload,
    responses(
        (status = 201, description = "Leader created", body = Object, example = json!({
            "id": 1,
            "message": "Líder creado exitosamente"
        })),
        (status = 400, description = "Missing required field")
    ),
    tag = "Lideres"
)]
pub async fn create_leader(
    pool: web::Data<SqlitePool>,
    payload: web::Json<LeaderPayload>,
) -> actix_web::Result<impl Responder> {
    let id = leader::create(pool.get_ref(), &payload).await?;

    Ok(HttpResponse::Created().json(json!({
        "id": id,
        "message": "Líder creado exitosamente"
    })))
}

#[utoipa::path(
    put,
    path = "/api/lideres/{id}",
    params(("id", Path, description = "Leader ID")),
    request_body = LeaderPayload,
    responses(
        (status = 200, description = "Leader updated"),
        (status = 404, description = "Leader not found")
    ),
    tag = "Lideres"
)]
pub async fn update_leader(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<LeaderPayload>,
) -> actix_web::Result<impl Responder> {
    leader::update(pool.get_ref(), path.into_inner(), &payload).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Líder actualizado exitosamente"
    })))
}

#[utoipa::path(
    delete,
    path = "/api/lideres/{id}",
    params(("id", Path, description = "Leader ID")),
    responses(
        (status = 200, description = "Leader deleted"),
        (status = 404, description = "Leader not found")
    ),
    tag = "Lideres"
)]
pub async fn delete_leader(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    leader::delete(pool.get_ref(), path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Líder eliminado exitosamente"
    })))
}
