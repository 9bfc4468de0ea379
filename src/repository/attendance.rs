use chrono::NaiveDate;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::model::attendance::{
    AttendanceEntry, AttendanceFilter, Conflict, RegisterAttendance, RegisteredAttendance,
};
use crate::repository::{ensure_employees_exist, ensure_exists};
use crate::utils::db_utils::{Conditions, placeholders};
use crate::utils::write_lock;

/// Replaces the attendance of (`date`, `site_id`) with `request.records`.
///
/// Runs under the write lock in a single transaction, so the cross-site
/// check and the delete+insert see the same state. Returns the number of
/// rows written.
pub async fn register(pool: &SqlitePool, request: &RegisterAttendance) -> AppResult<usize> {
    for record in &request.records {
        if let Some(hours) = record.overtime_hours {
            if !hours.is_finite() || hours < 0.0 {
                return Err(AppError::validation(format!(
                    "horas_extras inválidas para el empleado {}",
                    record.employee_id
                )));
            }
        }
    }

    let mut employee_ids: Vec<i64> = request.records.iter().map(|r| r.employee_id).collect();
    employee_ids.sort_unstable();
    employee_ids.dedup();

    let present: Vec<i64> = employee_ids
        .iter()
        .copied()
        .filter(|id| {
            request
                .records
                .iter()
                .any(|r| r.employee_id == *id && r.present)
        })
        .collect();

    let _write = write_lock::acquire().await;

    let mut tx = pool.begin().await?;

    ensure_exists(&mut *tx, "sites", "Obra", request.site_id).await?;
    ensure_employees_exist(&mut *tx, &employee_ids).await?;

    if !present.is_empty() {
        let conflicts = find_conflicts(&mut *tx, request.date, request.site_id, &present).await?;
        if !conflicts.is_empty() {
            info!(
                date = %request.date,
                site_id = request.site_id,
                conflicts = conflicts.len(),
                "Attendance rejected: employees present at another site"
            );
            return Err(AppError::SchedulingConflict { conflicts });
        }
    }

    sqlx::query("DELETE FROM attendance WHERE date = ? AND site_id = ?")
        .bind(request.date)
        .bind(request.site_id)
        .execute(&mut *tx)
        .await?;

    for record in &request.records {
        sqlx::query(
            r#"
            INSERT INTO attendance (date, site_id, employee_id, present, shift_type, overtime_hours)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(request.date)
        .bind(request.site_id)
        .bind(record.employee_id)
        .bind(record.present)
        .bind(record.shift_type.as_deref())
        .bind(record.overtime_hours.unwrap_or(0.0))
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    info!(
        date = %request.date,
        site_id = request.site_id,
        leader_id = ?request.leader_id,
        records = request.records.len(),
        present = present.len(),
        "Attendance registered"
    );

    Ok(request.records.len())
}

/// Employees of `present` already marked present on `date` at a site other than `site_id`.
async fn find_conflicts(
    conn: &mut SqliteConnection,
    date: NaiveDate,
    site_id: i64,
    present: &[i64],
) -> AppResult<Vec<Conflict>> {
    let sql = format!(
        r#"
        SELECT a.employee_id,
               e.first_name || ' ' || e.last_name AS employee_name,
               o.name AS site_name
        FROM attendance a
        INNER JOIN employees e ON a.employee_id = e.id
        INNER JOIN sites o ON a.site_id = o.id
        WHERE a.date = ?
          AND a.site_id != ?
          AND a.present = 1
          AND a.employee_id IN ({})
        ORDER BY e.first_name, e.last_name
        "#,
        placeholders(present.len())
    );

    let mut query = sqlx::query_as::<_, Conflict>(&sql).bind(date).bind(site_id);
    for id in present {
        query = query.bind(*id);
    }

    Ok(query.fetch_all(conn).await?)
}

/// Attendance joined with site, client, leader and employee, filtered by
/// whichever keys of `filter` are set.
pub async fn query(pool: &SqlitePool, filter: &AttendanceFilter) -> AppResult<Vec<AttendanceEntry>> {
    if let (Some(from), Some(to)) = (filter.date_from, filter.date_to) {
        if from > to {
            return Err(AppError::invalid_input(
                "fecha_desde no puede ser posterior a fecha_hasta",
            ));
        }
    }

    let mut conditions = Conditions::new();
    conditions.push_opt("a.date >= ?", filter.date_from);
    conditions.push_opt("a.date <= ?", filter.date_to);
    conditions.push_opt("c.id = ?", filter.client_id);
    conditions.push_opt("a.site_id = ?", filter.site_id);
    conditions.push_opt("a.employee_id = ?", filter.employee_id);
    conditions.push_opt("l.id = ?", filter.leader_id);

    let sql = format!(
        r#"
        SELECT a.id, a.date, a.site_id, a.employee_id, a.present, a.shift_type,
               a.overtime_hours, a.created_at,
               o.name AS site_name,
               c.id AS client_id, c.name AS client_name,
               l.id AS leader_id, l.first_name AS leader_first_name,
               l.last_name AS leader_last_name,
               e.first_name AS employee_first_name, e.last_name AS employee_last_name,
               e.role AS employee_role
        FROM attendance a
        INNER JOIN sites o ON a.site_id = o.id
        LEFT JOIN clients c ON o.client_id = c.id
        LEFT JOIN leaders l ON o.leader_id = l.id
        INNER JOIN employees e ON a.employee_id = e.id
        {}
        ORDER BY a.date DESC, e.first_name
        "#,
        conditions.where_clause()
    );
    debug!(sql = %sql, bindings = ?conditions.values(), "Querying attendance");

    let query = conditions.bind(sqlx::query_as::<_, AttendanceEntry>(&sql));
    Ok(query.fetch_all(pool).await?)
}

/// What is already registered for (`date`, `site_id`).
pub async fn verify(
    pool: &SqlitePool,
    date: NaiveDate,
    site_id: i64,
) -> AppResult<Vec<RegisteredAttendance>> {
    let rows = sqlx::query_as::<_, RegisteredAttendance>(
        r#"
        SELECT a.id, a.date, a.site_id, a.employee_id, a.present, a.shift_type,
               a.overtime_hours, e.first_name, e.last_name
        FROM attendance a
        INNER JOIN employees e ON a.employee_id = e.id
        WHERE a.date = ? AND a.site_id = ?
        ORDER BY e.first_name, e.last_name
        "#,
    )
    .bind(date)
    .bind(site_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
