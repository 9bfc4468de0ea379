use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::model::employee::{ACTIVE_STATUS, Employee, EmployeePayload};
use crate::utils::validation::{non_blank, required};
use crate::utils::write_lock;

const SELECT_EMPLOYEE: &str = r#"
    SELECT e.id, e.first_name, e.last_name, e.national_id, e.phone, e.role,
           e.hire_date, e.status, e.photo, e.created_at
    FROM employees e
"#;

/// All employees, or only those whose status equals `status`.
pub async fn list(pool: &SqlitePool, status: Option<&str>) -> AppResult<Vec<Employee>> {
    let status = non_blank(status);
    let filter = if status.is_some() { "WHERE e.status = ?" } else { "" };
    let sql = format!("{} {} ORDER BY e.last_name, e.first_name", SELECT_EMPLOYEE, filter);
    debug!(sql = %sql, status = ?status, "Fetching employees");

    let mut query = sqlx::query_as::<_, Employee>(&sql);
    if let Some(status) = status {
        query = query.bind(status);
    }

    Ok(query.fetch_all(pool).await?)
}

pub async fn get(pool: &SqlitePool, id: i64) -> AppResult<Employee> {
    let sql = format!("{} WHERE e.id = ?", SELECT_EMPLOYEE);
    sqlx::query_as::<_, Employee>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found("Empleado", id))
}

/// Active employees currently assigned to `site_id`.
pub async fn list_active_for_site(pool: &SqlitePool, site_id: i64) -> AppResult<Vec<Employee>> {
    let sql = format!(
        r#"{}
        INNER JOIN site_employees se ON e.id = se.employee_id
        WHERE se.site_id = ? AND e.status = ?
        ORDER BY e.last_name, e.first_name
        "#,
        SELECT_EMPLOYEE
    );

    let employees = sqlx::query_as::<_, Employee>(&sql)
        .bind(site_id)
        .bind(ACTIVE_STATUS)
        .fetch_all(pool)
        .await?;

    Ok(employees)
}

pub async fn create(pool: &SqlitePool, payload: &EmployeePayload) -> AppResult<i64> {
    let first_name = required(payload.first_name.as_deref(), "nombre")?;
    let last_name = required(payload.last_name.as_deref(), "apellido")?;
    let status = payload.status.as_deref().unwrap_or(ACTIVE_STATUS);

    let _write = write_lock::acquire().await;
    let result = sqlx::query(
        r#"
        INSERT INTO employees
        (first_name, last_name, national_id, phone, role, hire_date, status, photo)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(first_name)
    .bind(last_name)
    .bind(payload.national_id.as_deref())
    .bind(payload.phone.as_deref())
    .bind(payload.role.as_deref())
    .bind(payload.hire_date)
    .bind(status)
    .bind(payload.photo.as_deref())
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn update(pool: &SqlitePool, id: i64, payload: &EmployeePayload) -> AppResult<()> {
    let first_name = required(payload.first_name.as_deref(), "nombre")?;
    let last_name = required(payload.last_name.as_deref(), "apellido")?;
    let status = payload.status.as_deref().unwrap_or(ACTIVE_STATUS);

    let _write = write_lock::acquire().await;
    let result = sqlx::query(
        r#"
        UPDATE employees
        SET first_name = ?, last_name = ?, national_id = ?, phone = ?, role = ?,
            hire_date = ?, status = ?, photo = ?
        WHERE id = ?
        "#,
    )
    .bind(first_name)
    .bind(last_name)
    .bind(payload.national_id.as_deref())
    .bind(payload.phone.as_deref())
    .bind(payload.role.as_deref())
    .bind(payload.hire_date)
    .bind(status)
    .bind(payload.photo.as_deref())
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Empleado", id));
    }
    Ok(())
}

pub async fn delete(pool: &SqlitePool, id: i64) -> AppResult<()> {
    let _write = write_lock::acquire().await;
    let result = sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Empleado", id));
    }
    Ok(())
}
