use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;
use tokio::fs;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::model::backup::BackupFile;

/// Prefix shared by every snapshot of the live database: `<stem>_`.
fn snapshot_prefix(config: &Config) -> String {
    let stem = config
        .database_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("asistencias");
    format!("{}_", stem)
}

/// `<stem>_<YYYY-MM-DD>.<ext>`; names sort by date.
pub fn snapshot_name(config: &Config, date: NaiveDate) -> String {
    format!(
        "{}{}.{}",
        snapshot_prefix(config),
        date.format("%Y-%m-%d"),
        config.db_extension()
    )
}

fn is_snapshot(config: &Config, name: &str) -> bool {
    name.starts_with(&snapshot_prefix(config))
        && name.ends_with(&format!(".{}", config.db_extension()))
}

/// Writes today's snapshot unless it already exists or there is no live
/// database yet. Returns the path written, if any.
pub async fn create_snapshot(
    pool: &SqlitePool,
    config: &Config,
    today: NaiveDate,
) -> Result<Option<PathBuf>> {
    if !fs::try_exists(&config.database_path).await.unwrap_or(false) {
        log::warn!(
            "Live database {} not found, skipping snapshot",
            config.database_path.display()
        );
        return Ok(None);
    }

    fs::create_dir_all(&config.backup_dir)
        .await
        .with_context(|| format!("creating {}", config.backup_dir.display()))?;

    let target = config.backup_dir.join(snapshot_name(config, today));
    if fs::try_exists(&target).await? {
        return Ok(None);
    }

    // consistent copy even with WAL frames not yet checkpointed
    sqlx::query("VACUUM INTO ?")
        .bind(target.to_string_lossy().into_owned())
        .execute(pool)
        .await
        .with_context(|| format!("writing snapshot {}", target.display()))?;

    Ok(Some(target))
}

/// Snapshot file names, newest date first.
pub async fn list_snapshots(config: &Config) -> Result<Vec<String>> {
    let mut names = Vec::new();

    let mut entries = match fs::read_dir(&config.backup_dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(names),
        Err(e) => return Err(e).context("reading backup directory"),
    };

    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if is_snapshot(config, name) {
                names.push(name.to_string());
            }
        }
    }

    names.sort_unstable_by(|a, b| b.cmp(a));
    Ok(names)
}

/// Deletes every snapshot beyond the newest `config.backup_keep`.
/// Returns the names removed.
pub async fn prune_snapshots(config: &Config) -> Result<Vec<String>> {
    let snapshots = list_snapshots(config).await?;
    let mut removed = Vec::new();

    for name in snapshots.into_iter().skip(config.backup_keep) {
        let path = config.backup_dir.join(&name);
        fs::remove_file(&path)
            .await
            .with_context(|| format!("removing {}", path.display()))?;
        removed.push(name);
    }

    Ok(removed)
}

async fn describe(path: &Path, name: String) -> std::io::Result<BackupFile> {
    let meta = fs::metadata(path).await?;
    Ok(BackupFile {
        name,
        modified: DateTime::<Utc>::from(meta.modified()?),
        size: meta.len(),
    })
}

/// Every snapshot plus the live database, most recently modified first.
pub async fn list_backups(config: &Config) -> AppResult<Vec<BackupFile>> {
    let snapshots = list_snapshots(config)
        .await
        .map_err(|e| AppError::Storage { message: format!("{:#}", e) })?;

    let mut files = Vec::with_capacity(snapshots.len() + 1);
    for name in snapshots {
        let path = config.backup_dir.join(&name);
        files.push(describe(&path, name).await?);
    }

    if fs::try_exists(&config.database_path).await.unwrap_or(false) {
        files.push(describe(&config.database_path, config.db_file_name()).await?);
    }

    files.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| b.name.cmp(&a.name)));
    Ok(files)
}

/// Rejects anything that could leave the backup directory or is not a
/// database file.
pub fn validate_file_name(config: &Config, name: &str) -> AppResult<()> {
    if name.is_empty() || name.contains("..") || name.contains('/') || name.contains('\\') {
        return Err(AppError::invalid_input("Nombre de archivo inválido"));
    }
    if !name.ends_with(&format!(".{}", config.db_extension())) {
        return Err(AppError::invalid_input("Tipo de archivo no permitido"));
    }
    Ok(())
}

/// Path a validated name refers to: the live database or a snapshot.
pub fn resolve_file(config: &Config, name: &str) -> PathBuf {
    if name == config.db_file_name() {
        config.database_path.clone()
    } else {
        config.backup_dir.join(name)
    }
}

/// Compares the submitted PIN without short-circuiting on the first mismatch.
pub fn pin_matches(expected: &str, submitted: &str) -> bool {
    let (a, b) = (expected.as_bytes(), submitted.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    async fn touch_snapshots(config: &Config, days: &[u32]) {
        fs::create_dir_all(&config.backup_dir).await.unwrap();
        for d in days {
            fs::write(config.backup_dir.join(snapshot_name(config, day(*d))), b"x")
                .await
                .unwrap();
        }
    }

    #[test]
    fn snapshot_names_embed_the_date() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::for_tests(dir.path());

        assert_eq!(snapshot_name(&config, day(7)), "asistencias_2024-03-07.db");
    }

    #[actix_web::test]
    async fn snapshot_is_written_once_per_day() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::for_tests(dir.path());
        let pool = init_db(&config.database_path, 1).await.unwrap();
        sqlx::query("INSERT INTO clients (name) VALUES ('Respaldo')")
            .execute(&pool)
            .await
            .unwrap();

        let first = create_snapshot(&pool, &config, day(1)).await.unwrap();
        let target = first.expect("snapshot written");
        assert!(target.ends_with("asistencias_2024-03-01.db"));

        let second = create_snapshot(&pool, &config, day(1)).await.unwrap();
        assert!(second.is_none());

        let copy = init_db(&target, 1).await.unwrap();
        let name: String = sqlx::query_scalar("SELECT name FROM clients")
            .fetch_one(&copy)
            .await
            .unwrap();
        assert_eq!(name, "Respaldo");
    }

    #[actix_web::test]
    async fn prune_keeps_newest_and_never_touches_live_db() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::for_tests(dir.path());
        config.backup_keep = 3;
        fs::write(&config.database_path, b"live").await.unwrap();
        touch_snapshots(&config, &[1, 5, 2, 9, 3, 4]).await;
        fs::write(config.backup_dir.join("notes.txt"), b"keep me").await.unwrap();

        let removed = prune_snapshots(&config).await.unwrap();
        assert_eq!(removed.len(), 3);

        let left = list_snapshots(&config).await.unwrap();
        assert_eq!(
            left,
            [
                snapshot_name(&config, day(9)),
                snapshot_name(&config, day(5)),
                snapshot_name(&config, day(4)),
            ]
        );
        assert!(config.database_path.exists());
        assert!(config.backup_dir.join("notes.txt").exists());
    }

    #[actix_web::test]
    async fn prune_with_fewer_snapshots_than_limit_removes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::for_tests(dir.path());
        touch_snapshots(&config, &[1, 2]).await;

        assert!(prune_snapshots(&config).await.unwrap().is_empty());
        assert_eq!(list_snapshots(&config).await.unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn missing_backup_dir_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::for_tests(dir.path());

        assert!(list_snapshots(&config).await.unwrap().is_empty());
        assert!(list_backups(&config).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn listing_includes_live_database() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::for_tests(dir.path());
        touch_snapshots(&config, &[1, 2]).await;
        fs::write(&config.database_path, b"live").await.unwrap();

        let files = list_backups(&config).await.unwrap();
        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();

        assert_eq!(files.len(), 3);
        assert!(names.contains(&"asistencias.db"));
        assert!(files.windows(2).all(|w| w[0].modified >= w[1].modified));
    }

    #[test]
    fn file_names_with_traversal_or_wrong_extension_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::for_tests(dir.path());

        for name in ["../asistencias.db", "a/b.db", "a\\b.db", "..db", "backup.sql", ""] {
            assert!(
                matches!(validate_file_name(&config, name), Err(AppError::InvalidInput { .. })),
                "{name} should be rejected"
            );
        }
        assert!(validate_file_name(&config, "asistencias_2024-03-01.db").is_ok());
    }

    #[test]
    fn live_database_name_resolves_to_live_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::for_tests(dir.path());

        assert_eq!(resolve_file(&config, "asistencias.db"), config.database_path);
        assert_eq!(
            resolve_file(&config, "asistencias_2024-03-01.db"),
            config.backup_dir.join("asistencias_2024-03-01.db")
        );
    }

    #[test]
    fn pin_comparison() {
        assert!(pin_matches("4321", "4321"));
        assert!(!pin_matches("4321", "1234"));
        assert!(!pin_matches("4321", "43210"));
        assert!(!pin_matches("4321", ""));
    }
}
