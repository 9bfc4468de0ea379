use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Snapshot or live database file offered for download.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BackupFile {
    #[serde(rename = "nombre")]
    #[schema(example = "asistencias_2024-01-15.db")]
    pub name: String,
    #[serde(rename = "modificado")]
    #[schema(value_type = String, format = "date-time")]
    pub modified: DateTime<Utc>,
    #[serde(rename = "tamano")]
    #[schema(example = 24576)]
    pub size: u64,
}
