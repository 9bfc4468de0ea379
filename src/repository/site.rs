use sqlx::{SqliteConnection, SqlitePool};

use crate::error::{AppError, AppResult};
use crate::model::employee::ACTIVE_STATUS;
use crate::model::site::{Site, SitePayload};
use crate::repository::{ensure_employees_exist, ensure_exists};
use crate::utils::validation::required;
use crate::utils::write_lock;

const SELECT_SITE: &str = r#"
    SELECT o.id, o.name, o.client_id, o.leader_id, o.address, o.start_date, o.end_date,
           o.status, o.created_at,
           c.name AS client_name,
           l.first_name || ' ' || l.last_name AS leader_name
    FROM sites o
    LEFT JOIN clients c ON o.client_id = c.id
    LEFT JOIN leaders l ON o.leader_id = l.id
"#;

pub async fn list(pool: &SqlitePool) -> AppResult<Vec<Site>> {
    let sql = format!("{} ORDER BY o.name", SELECT_SITE);
    Ok(sqlx::query_as::<_, Site>(&sql).fetch_all(pool).await?)
}

pub async fn get(pool: &SqlitePool, id: i64) -> AppResult<Site> {
    let sql = format!("{} WHERE o.id = ?", SELECT_SITE);
    sqlx::query_as::<_, Site>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found("Obra", id))
}

/// Every employee id assigned to the site, whatever the employee's status.
pub async fn assigned_employee_ids(pool: &SqlitePool, site_id: i64) -> AppResult<Vec<i64>> {
    let ids = sqlx::query_scalar::<_, i64>(
        "SELECT employee_id FROM site_employees WHERE site_id = ? ORDER BY employee_id",
    )
    .bind(site_id)
    .fetch_all(pool)
    .await?;

    Ok(ids)
}

pub async fn create(pool: &SqlitePool, payload: &SitePayload) -> AppResult<i64> {
    let name = required(payload.name.as_deref(), "nombre")?;
    let status = payload.status.as_deref().unwrap_or(ACTIVE_STATUS);

    let _write = write_lock::acquire().await;
    let mut tx = pool.begin().await?;
    check_references(&mut *tx, payload).await?;

    let site_id = sqlx::query(
        r#"
        INSERT INTO sites (name, client_id, leader_id, address, start_date, end_date, status)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(name)
    .bind(payload.client_id)
    .bind(payload.leader_id)
    .bind(payload.address.as_deref())
    .bind(payload.start_date)
    .bind(payload.end_date)
    .bind(status)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    replace_assignments(&mut *tx, site_id, &payload.employee_ids).await?;
    tx.commit().await?;

    Ok(site_id)
}

pub async fn update(pool: &SqlitePool, id: i64, payload: &SitePayload) -> AppResult<()> {
    let name = required(payload.name.as_deref(), "nombre")?;
    let status = payload.status.as_deref().unwrap_or(ACTIVE_STATUS);

    let _write = write_lock::acquire().await;
    let mut tx = pool.begin().await?;
    check_references(&mut *tx, payload).await?;

    let result = sqlx::query(
        r#"
        UPDATE sites
        SET name = ?, client_id = ?, leader_id = ?, address = ?,
            start_date = ?, end_date = ?, status = ?
        WHERE id = ?
        "#,
    )
    .bind(name)
    .bind(payload.client_id)
    .bind(payload.leader_id)
    .bind(payload.address.as_deref())
    .bind(payload.start_date)
    .bind(payload.end_date)
    .bind(status)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Obra", id));
    }

    replace_assignments(&mut *tx, id, &payload.employee_ids).await?;
    tx.commit().await?;

    Ok(())
}

/// Attendance history of the site is kept.
pub async fn delete(pool: &SqlitePool, id: i64) -> AppResult<()> {
    let _write = write_lock::acquire().await;
    let result = sqlx::query("DELETE FROM sites WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Obra", id));
    }
    Ok(())
}

async fn check_references(conn: &mut SqliteConnection, payload: &SitePayload) -> AppResult<()> {
    if let Some(client_id) = payload.client_id {
        ensure_exists(conn, "clients", "Cliente", client_id).await?;
    }
    if let Some(leader_id) = payload.leader_id {
        ensure_exists(conn, "leaders", "Líder", leader_id).await?;
    }
    ensure_employees_exist(conn, &payload.employee_ids).await
}

/// Makes the site's assignments exactly `employee_ids`.
async fn replace_assignments(
    conn: &mut SqliteConnection,
    site_id: i64,
    employee_ids: &[i64],
) -> AppResult<()> {
    sqlx::query("DELETE FROM site_employees WHERE site_id = ?")
        .bind(site_id)
        .execute(&mut *conn)
        .await?;

    for employee_id in employee_ids {
        // duplicates in the request collapse onto the unique pair
        sqlx::query("INSERT OR IGNORE INTO site_employees (site_id, employee_id) VALUES (?, ?)")
            .bind(site_id)
            .bind(*employee_id)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::model::client::ClientPayload;
    use crate::model::employee::EmployeePayload;
    use crate::model::leader::LeaderPayload;
    use crate::repository::{client, employee, leader};

    async fn new_employee(pool: &SqlitePool, first: &str) -> i64 {
        let payload = EmployeePayload {
            first_name: Some(first.to_string()),
            last_name: Some("Test".to_string()),
            ..Default::default()
        };
        employee::create(pool, &payload).await.unwrap()
    }

    fn site(name: &str, employee_ids: Vec<i64>) -> SitePayload {
        SitePayload {
            name: Some(name.to_string()),
            employee_ids,
            ..Default::default()
        }
    }

    #[actix_web::test]
    async fn list_joins_client_and_leader_names() {
        let pool = test_pool().await;
        let client_id = client::create(
            &pool,
            &ClientPayload {
                name: Some("Construcciones SA".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let leader_id = leader::create(
            &pool,
            &LeaderPayload {
                first_name: Some("Juan".to_string()),
                last_name: Some("Pérez".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let payload = SitePayload {
            client_id: Some(client_id),
            leader_id: Some(leader_id),
            ..site("Edificio Central", vec![])
        };
        create(&pool, &payload).await.unwrap();
        create(&pool, &site("Anexo", vec![])).await.unwrap();

        let sites = list(&pool).await.unwrap();
        assert_eq!(sites[0].name, "Anexo");
        assert_eq!(sites[0].client_name, None);
        assert_eq!(sites[1].client_name.as_deref(), Some("Construcciones SA"));
        assert_eq!(sites[1].leader_name.as_deref(), Some("Juan Pérez"));
        assert_eq!(sites[1].status, ACTIVE_STATUS);
    }

    #[actix_web::test]
    async fn update_replaces_assignments_exactly() {
        let pool = test_pool().await;
        let a = new_employee(&pool, "A").await;
        let b = new_employee(&pool, "B").await;
        let c = new_employee(&pool, "C").await;

        let id = create(&pool, &site("Torre", vec![a, b, b])).await.unwrap();
        assert_eq!(assigned_employee_ids(&pool, id).await.unwrap(), vec![a, b]);

        update(&pool, id, &site("Torre", vec![c])).await.unwrap();
        assert_eq!(assigned_employee_ids(&pool, id).await.unwrap(), vec![c]);

        update(&pool, id, &site("Torre", vec![])).await.unwrap();
        assert!(assigned_employee_ids(&pool, id).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn unknown_employee_aborts_site_creation() {
        let pool = test_pool().await;

        let err = create(&pool, &site("Torre", vec![42])).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
        assert!(list(&pool).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn deleting_site_or_employee_cascades_assignments() {
        let pool = test_pool().await;
        let a = new_employee(&pool, "A").await;
        let b = new_employee(&pool, "B").await;
        let id = create(&pool, &site("Torre", vec![a, b])).await.unwrap();

        employee::delete(&pool, a).await.unwrap();
        assert_eq!(assigned_employee_ids(&pool, id).await.unwrap(), vec![b]);

        delete(&pool, id).await.unwrap();
        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM site_employees")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(remaining, 0);
    }

    #[actix_web::test]
    async fn deleting_client_clears_site_reference() {
        let pool = test_pool().await;
        let client_id = client::create(
            &pool,
            &ClientPayload {
                name: Some("Cliente".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let id = create(
            &pool,
            &SitePayload {
                client_id: Some(client_id),
                ..site("Torre", vec![])
            },
        )
        .await
        .unwrap();

        client::delete(&pool, client_id).await.unwrap();

        assert_eq!(get(&pool, id).await.unwrap().client_id, None);
    }
}
