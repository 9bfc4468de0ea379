use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use dotenvy::dotenv;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    pub database_path: PathBuf,
    pub db_max_connections: u32,

    // Backups
    pub backup_dir: PathBuf,
    pub backup_keep: usize,
    pub backup_interval: Duration,
    pub cleanup_interval: Duration,
    pub backup_pin: String,

    // Rate limiting
    pub rate_backup_per_min: u32,

    pub api_prefix: String,
    pub log_dir: String,
    pub seed_demo_data: bool,
}

/// Reads `key` and parses it, falling back to `default` when unset or unparsable.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            // logging is not set up yet
            eprintln!("Invalid value {:?} for {}, using default", raw, key);
            default
        }),
        Err(_) => default,
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let backup_interval_hours: u64 = env_or("BACKUP_INTERVAL_HOURS", 24);
        let cleanup_interval_days: u64 = env_or("BACKUP_CLEANUP_INTERVAL_DAYS", 7);

        Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".to_string()),
            database_path: env_or("DATABASE_PATH", PathBuf::from("asistencias.db")),
            db_max_connections: env_or("DB_MAX_CONNECTIONS", 5),

            backup_dir: env_or("BACKUP_DIR", PathBuf::from("backups")),
            backup_keep: env_or("BACKUP_KEEP", 5),
            // zero would spin the timer
            backup_interval: Duration::from_secs(backup_interval_hours.max(1) * 3600),
            cleanup_interval: Duration::from_secs(cleanup_interval_days.max(1) * 86_400),
            backup_pin: env::var("BACKUP_PIN").expect("BACKUP_PIN must be set"),

            rate_backup_per_min: env_or("RATE_BACKUP_PER_MIN", 30),

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
            seed_demo_data: env_or("SEED_DEMO_DATA", true),
        }
    }

    /// Extension of the live database file, shared by every snapshot.
    pub fn db_extension(&self) -> &str {
        self.database_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("db")
    }

    /// Bare file name of the live database, as shown in backup listings.
    pub fn db_file_name(&self) -> String {
        self.database_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("asistencias.db")
            .to_string()
    }
}

#[cfg(test)]
impl Config {
    /// Config rooted in `dir`, used by backup and handler tests.
    pub fn for_tests(dir: &std::path::Path) -> Self {
        Self {
            server_addr: "127.0.0.1:0".to_string(),
            database_path: dir.join("asistencias.db"),
            db_max_connections: 1,
            backup_dir: dir.join("backups"),
            backup_keep: 5,
            backup_interval: Duration::from_secs(86_400),
            cleanup_interval: Duration::from_secs(7 * 86_400),
            backup_pin: "4321".to_string(),
            rate_backup_per_min: 1000,
            api_prefix: "/api".to_string(),
            log_dir: dir.join("logs").display().to_string(),
            seed_demo_data: false,
        }
    }
}
