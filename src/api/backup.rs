use actix_files::NamedFile;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use tracing::{info, warn};
use utoipa::IntoParams;

use crate::config::Config;
use crate::error::AppError;
use crate::model::backup::BackupFile;
use crate::utils::backup;

#[derive(Debug, Deserialize, IntoParams)]
pub struct PinQuery {
    /// Shared backup PIN
    pub pin: Option<String>,
}

fn check_pin(config: &Config, query: &PinQuery) -> Result<(), AppError> {
    match query.pin.as_deref() {
        Some(pin) if backup::pin_matches(&config.backup_pin, pin) => Ok(()),
        _ => {
            warn!("Backup access with invalid PIN");
            Err(AppError::Unauthorized)
        }
    }
}

/// List snapshots and the live database
#[utoipa::path(
    get,
    path = "/backup/lista",
    params(PinQuery),
    responses(
        (status = 200, description = "Files, most recent first", body = [BackupFile]),
        (status = 403, description = "Invalid PIN")
    ),
    tag = "Backup"
)]
pub async fn list_backups(
    config: web::Data<Config>,
    query: web::Query<PinQuery>,
) -> actix_web::Result<impl Responder> {
    check_pin(&config, &query)?;

    let files = backup::list_backups(&config).await?;
    Ok(HttpResponse::Ok().json(files))
}

/// Download one backup file as an attachment
#[utoipa::path(
    get,
    path = "/backup/descargar/{filename}",
    params(
        ("filename", Path, description = "File name as returned by /backup/lista"),
        PinQuery
    ),
    responses(
        (status = 200, description = "File contents as an attachment"),
        (status = 400, description = "Invalid file name"),
        (status = 403, description = "Invalid PIN"),
        (status = 404, description = "File not found")
    ),
    tag = "Backup"
)]
pub async fn download_backup(
    config: web::Data<Config>,
    path: web::Path<String>,
    query: web::Query<PinQuery>,
) -> actix_web::Result<NamedFile> {
    check_pin(&config, &query)?;

    let name = path.into_inner();
    backup::validate_file_name(&config, &name)?;

    let file_path = backup::resolve_file(&config, &name);
    let file = NamedFile::open_async(&file_path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AppError::NotFound {
                message: format!("Archivo {} no encontrado", name),
            }
        } else {
            AppError::from(e)
        }
    })?;

    info!(file = %name, "Backup downloaded");

    Ok(file.set_content_disposition(ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(name)],
    }))
}
