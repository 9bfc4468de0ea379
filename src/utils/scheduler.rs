use std::future::Future;
use std::time::Duration;

use chrono::Local;
use sqlx::SqlitePool;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{error, info};

use crate::config::Config;
use crate::utils::backup;

/// Starts the snapshot and retention tasks. Both fire immediately, then
/// every configured interval.
pub fn start(pool: SqlitePool, config: Config) {
    let snapshot_config = config.clone();
    actix_web::rt::spawn(run_every("snapshot", config.backup_interval, move || {
        let pool = pool.clone();
        let config = snapshot_config.clone();
        async move { snapshot_once(&pool, &config).await }
    }));

    let retention_config = config.clone();
    actix_web::rt::spawn(run_every("retention", config.cleanup_interval, move || {
        let config = retention_config.clone();
        async move { prune_once(&config).await }
    }));

    info!(
        backup_dir = %config.backup_dir.display(),
        keep = config.backup_keep,
        "Backup scheduler started"
    );
}

/// Runs `job` on every tick. Each run is its own task, so an error or a
/// panic is logged and the next tick still fires.
async fn run_every<F, Fut>(name: &'static str, period: Duration, job: F)
where
    F: Fn() -> Fut,
    Fut: Future<Output = anyhow::Result<()>> + 'static,
{
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        match actix_web::rt::spawn(job()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                let message = format!("{:#}", e);
                error!(task = name, error = %message, "Backup task failed");
            }
            Err(e) => error!(task = name, error = %e, "Backup task panicked"),
        }
    }
}

pub async fn snapshot_once(pool: &SqlitePool, config: &Config) -> anyhow::Result<()> {
    let today = Local::now().date_naive();

    match backup::create_snapshot(pool, config, today).await? {
        Some(path) => info!(path = %path.display(), "Snapshot created"),
        None => info!(%today, "Snapshot already present or no live database"),
    }
    Ok(())
}

pub async fn prune_once(config: &Config) -> anyhow::Result<()> {
    let removed = backup::prune_snapshots(config).await?;
    if !removed.is_empty() {
        info!(removed = ?removed, keep = config.backup_keep, "Old snapshots removed");
    }
    Ok(())
}
