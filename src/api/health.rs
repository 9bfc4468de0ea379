use actix_web::{HttpResponse, Responder, get, web};
use serde_json::json;
use sqlx::SqlitePool;

#[get("/health")]
pub async fn health(pool: web::Data<SqlitePool>) -> actix_web::Result<impl Responder> {
    sqlx::query("SELECT 1")
        .execute(pool.get_ref())
        .await
        .map_err(crate::error::AppError::from)?;

    Ok(HttpResponse::Ok().json(json!({ "status": "ok" })))
}
