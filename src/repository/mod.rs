pub mod attendance;
pub mod client;
pub mod employee;
pub mod leader;
pub mod site;

use sqlx::SqliteConnection;

use crate::error::{AppError, AppResult};
use crate::utils::db_utils::placeholders;

/// Fails with `NotFound` unless `table` holds a row with `id`.
pub(crate) async fn ensure_exists(
    conn: &mut SqliteConnection,
    table: &'static str,
    resource: &str,
    id: i64,
) -> AppResult<()> {
    let sql = format!("SELECT COUNT(*) FROM {} WHERE id = ?", table);
    let count: i64 = sqlx::query_scalar(&sql).bind(id).fetch_one(conn).await?;

    if count == 0 {
        return Err(AppError::not_found(resource, id));
    }
    Ok(())
}

/// Fails with `NotFound` on the first id in `ids` with no employee row.
pub(crate) async fn ensure_employees_exist(conn: &mut SqliteConnection, ids: &[i64]) -> AppResult<()> {
    if ids.is_empty() {
        return Ok(());
    }

    let sql = format!(
        "SELECT id FROM employees WHERE id IN ({})",
        placeholders(ids.len())
    );
    let mut query = sqlx::query_scalar::<_, i64>(&sql);
    for id in ids {
        query = query.bind(*id);
    }
    let found = query.fetch_all(conn).await?;

    match ids.iter().find(|id| !found.contains(id)) {
        Some(missing) => Err(AppError::not_found("Empleado", *missing)),
        None => Ok(()),
    }
}
