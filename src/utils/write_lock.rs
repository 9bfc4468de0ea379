use once_cell::sync::Lazy;
use tokio::sync::{Mutex, MutexGuard};

/// Every statement that writes the database file runs under this guard.
///
/// A deferred SQLite transaction that reads first cannot upgrade to a write
/// once another connection has committed after its first read
/// (`SQLITE_BUSY_SNAPSHOT`, not retried by `busy_timeout`). With one writer
/// at a time no commit can land inside a read-then-write transaction.
static WRITE_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

pub async fn acquire() -> MutexGuard<'static, ()> {
    WRITE_LOCK.lock().await
}

