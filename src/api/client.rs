use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use sqlx::SqlitePool;

use crate::model::client::{Client, ClientPayload};
use crate::repository::client;

/// List clients
#[utoipa::path(
    get,
    path = "/api/clientes",
    responses(
        (status = 200, description = "Clients ordered by name", body = [Client]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Clientes"
)]
pub async fn list_clients(pool: web::Data<SqlitePool>) -> actix_web::Result<impl Responder> {
    let clients = client::list(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(clients))
}

/// Get client by ID
#[utoipa::path(
    get,
    path = "/api/clientes/{id}",
    params(("id", Path, description = "Client ID")),
    responses(
        (status = 200, description = "Client found", body = Client),
        (status = 404, description = "Client not found")
    ),
    tag = "Clientes"
)]
pub async fn get_client(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let client = client::get(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(client))
}

/// Create client
#[utoipa::path(
    post,
    path = "/api/clientes",
    request_body = ClientPayload,
    responses(
        (status = 201, description = "Client created", body = Object, example = json!({
            "id": 1,
            "message": "Cliente creado exitosamente"
        })),
        (status = 400, description = "Missing required field")
    ),
    tag = "Clientes"
)]
pub async fn create_client(
    pool: web::Data<SqlitePool>,
    payload: web::Json<ClientPayload>,
) -> actix_web::Result<impl Responder> {
    let id = client::create(pool.get_ref(), &payload).await?;

    Ok(HttpResponse::Created().json(json!({
        "id": id,
        "message": "Cliente creado exitosamente"
    })))
}

/// Update client
#[utoipa::path(
    put,
    path = "/api/clientes/{id}",
    params(("id", Path, description = "Client ID")),
    request_body = ClientPayload,
    responses(
        (status = 200, description = "Client updated"),
        (status = 400, description = "Missing required field"),
        (status = 404, description = "Client not found")
    ),
    tag = "Clientes"
)]
pub async fn update_client(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<ClientPayload>,
) -> actix_web::Result<impl Responder> {
    client::update(pool.get_ref(), path.into_inner(), &payload).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Cliente actualizado exitosamente"
    })))
}

/// Delete client
#[utoipa::path(
    delete,
    path = "/api/clientes/{id}",
    params(("id", Path, description = "Client ID")),
    responses(
        (status = 200, description = "Client deleted"),
        (status = 404, description = "Client not found")
    ),
    tag = "Clientes"
)]
pub async fn delete_client(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    client::delete(pool.get_ref(), path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Cliente eliminado exitosamente"
    })))
}
