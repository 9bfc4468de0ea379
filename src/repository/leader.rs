use sqlx::SqlitePool;

use crate::error::{AppError, AppResult};
use crate::model::leader::{Leader, LeaderPayload};
use crate::utils::validation::required;
use crate::utils::write_lock;

pub async fn list(pool: &SqlitePool) -> AppResult<Vec<Leader>> {
    let leaders = sqlx::query_as::<_, Leader>(
        r#"
        SELECT id, first_name, last_name, phone, email, created_at
        FROM leaders
        ORDER BY last_name, first_name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(leaders)
}

pub async fn get(pool: &SqlitePool, id: i64) -> AppResult<Leader> {
    sqlx::query_as::<_, Leader>(
        r#"
        SELECT id, first_name, last_name, phone, email, created_at
        FROM leaders
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::not_found("Líder", id))
}

pub async fn create(pool: &SqlitePool, payload: &LeaderPayload) -> AppResult<i64> {
    let first_name = required(payload.first_name.as_deref(), "nombre")?;
    let last_name = required(payload.last_name.as_deref(), "apellido")?;

    let _write = write_lock::acquire().await;
    let result = sqlx::query(
        "INSERT INTO leaders (first_name, last_name, phone, email) VALUES (?, ?, ?, ?)",
    )
    .bind(first_name)
    .bind(last_name)
    .bind(payload.phone.as_deref())
    .bind(payload.email.as_deref())
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn update(pool: &SqlitePool, id: i64, payload: &LeaderPayload) -> AppResult<()> {
    let first_name = required(payload.first_name.as_deref(), "nombre")?;
    let last_name = required(payload.last_name.as_deref(), "apellido")?;

    let _write = write_lock::acquire().await;
    let result = sqlx::query(
        "UPDATE leaders SET first_name = ?, last_name = ?, phone = ?, email = ? WHERE id = ?",
    )
    .bind(first_name)
    .bind(last_name)
    .bind(payload.phone.as_deref())
    .bind(payload.email.as_deref())
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Líder", id));
    }
    Ok(())
}

pub async fn delete(pool: &SqlitePool, id: i64) -> AppResult<()> {
    let _write = write_lock::acquire().await;
    let result = sqlx::query("DELETE FROM leaders WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Líder", id));
    }
    Ok(())
}
