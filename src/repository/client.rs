use sqlx::SqlitePool;

use crate::error::{AppError, AppResult};
use crate::model::client::{Client, ClientPayload};
use crate::utils::validation::required;
use crate::utils::write_lock;

const SELECT_CLIENT: &str = r#"
    SELECT id, name, legal_name, tax_id, phone, email, address, created_at
    FROM clients
"#;

pub async fn list(pool: &SqlitePool) -> AppResult<Vec<Client>> {
    let sql = format!("{} ORDER BY name", SELECT_CLIENT);
    Ok(sqlx::query_as::<_, Client>(&sql).fetch_all(pool).await?)
}

pub async fn get(pool: &SqlitePool, id: i64) -> AppResult<Client> {
    let sql = format!("{} WHERE id = ?", SELECT_CLIENT);
    sqlx::query_as::<_, Client>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found("Cliente", id))
}

pub async fn create(pool: &SqlitePool, payload: &ClientPayload) -> AppResult<i64> {
    let name = required(payload.name.as_deref(), "nombre")?;

    let _write = write_lock::acquire().await;
    let result = sqlx::query(
        r#"
        INSERT INTO clients (name, legal_name, tax_id, phone, email, address)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(name)
    .bind(payload.legal_name.as_deref())
    .bind(payload.tax_id.as_deref())
    .bind(payload.phone.as_deref())
    .bind(payload.email.as_deref())
    .bind(payload.address.as_deref())
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn update(pool: &SqlitePool, id: i64, payload: &ClientPayload) -> AppResult<()> {
    let name = required(payload.name.as_deref(), "nombre")?;

    let _write = write_lock::acquire().await;
    let result = sqlx::query(
        r#"
        UPDATE clients
        SET name = ?, legal_name = ?, tax_id = ?, phone = ?, email = ?, address = ?
        WHERE id = ?
        "#,
    )
    .bind(name)
    .bind(payload.legal_name.as_deref())
    .bind(payload.tax_id.as_deref())
    .bind(payload.phone.as_deref())
    .bind(payload.email.as_deref())
    .bind(payload.address.as_deref())
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Cliente", id));
    }
    Ok(())
}

pub async fn delete(pool: &SqlitePool, id: i64) -> AppResult<()> {
    let _write = write_lock::acquire().await;
    let result = sqlx::query("DELETE FROM clients WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Cliente", id));
    }
    Ok(())
}
