use std::path::Path;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use tracing::info;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS clients (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        legal_name TEXT,
        tax_id TEXT,
        phone TEXT,
        email TEXT,
        address TEXT,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS leaders (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        phone TEXT,
        email TEXT,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS employees (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        national_id TEXT,
        phone TEXT,
        role TEXT,
        hire_date DATE,
        status TEXT NOT NULL DEFAULT 'active',
        photo TEXT,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS sites (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        client_id INTEGER REFERENCES clients(id) ON DELETE SET NULL,
        leader_id INTEGER REFERENCES leaders(id) ON DELETE SET NULL,
        address TEXT,
        start_date DATE,
        end_date DATE,
        status TEXT NOT NULL DEFAULT 'active',
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS site_employees (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        site_id INTEGER NOT NULL REFERENCES sites(id) ON DELETE CASCADE,
        employee_id INTEGER NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        UNIQUE(site_id, employee_id)
    )
    "#,
    // no FK on purpose: history outlives the site and the employee
    r#"
    CREATE TABLE IF NOT EXISTS attendance (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date DATE NOT NULL,
        site_id INTEGER NOT NULL,
        employee_id INTEGER NOT NULL,
        present BOOLEAN NOT NULL,
        shift_type TEXT,
        overtime_hours REAL NOT NULL DEFAULT 0,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_attendance_date_site ON attendance (date, site_id)",
    "CREATE INDEX IF NOT EXISTS idx_attendance_employee ON attendance (employee_id, date)",
];

pub async fn init_db(database_path: &Path, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(database_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    create_schema(&pool).await?;
    info!(path = %database_path.display(), "Database ready");

    Ok(pool)
}

pub async fn create_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

/// Inserts a small demo data set when the database has no clients yet.
pub async fn seed_demo_data(pool: &SqlitePool) -> Result<bool, sqlx::Error> {
    let clients: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clients")
        .fetch_one(pool)
        .await?;
    if clients > 0 {
        return Ok(false);
    }

    let mut tx = pool.begin().await?;

    let client_id = sqlx::query(
        r#"
        INSERT INTO clients (name, legal_name, tax_id, phone, email, address)
        VALUES ('Construcciones SA', 'Construcciones SA', '20123456789', '+54 9 11 1234-5678',
                'contacto@construcciones.com', 'Av. Principal 123')
        "#,
    )
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    let leader_id = sqlx::query(
        r#"
        INSERT INTO leaders (first_name, last_name, phone, email)
        VALUES ('Juan', 'Pérez', '+54 9 11 9876-5432', 'juan.perez@email.com')
        "#,
    )
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    let site_id = sqlx::query(
        r#"
        INSERT INTO sites (name, client_id, leader_id, address, start_date, end_date, status)
        VALUES ('Edificio Central', ?, ?, 'Calle 1 #123', '2024-01-01', '2024-12-31', 'active')
        "#,
    )
    .bind(client_id)
    .bind(leader_id)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    let employees = [
        ("Carlos", "González", "12345678", "+54 9 11 1111-1111", "Albañil", "2024-01-15"),
        ("Miguel", "Rodríguez", "23456789", "+54 9 11 2222-2222", "Electricista", "2024-02-01"),
        ("Pedro", "Martínez", "34567890", "+54 9 11 3333-3333", "Plomero", "2024-03-10"),
    ];
    for (first_name, last_name, national_id, phone, role, hire_date) in employees {
        let employee_id = sqlx::query(
            r#"
            INSERT INTO employees (first_name, last_name, national_id, phone, role, hire_date, status)
            VALUES (?, ?, ?, ?, ?, ?, 'active')
            "#,
        )
        .bind(first_name)
        .bind(last_name)
        .bind(national_id)
        .bind(phone)
        .bind(role)
        .bind(hire_date)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        sqlx::query("INSERT INTO site_employees (site_id, employee_id) VALUES (?, ?)")
            .bind(site_id)
            .bind(employee_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    info!("Demo data inserted");
    Ok(true)
}

/// Single-connection in-memory pool with the schema applied.
#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    let options: SqliteConnectOptions = "sqlite::memory:".parse().expect("memory url");
    let options = options.foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("in-memory database");
    create_schema(&pool).await.expect("schema");
    pool
}
