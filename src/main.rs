use actix_web::middleware::{Logger, NormalizePath};
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod api;
mod config;
mod db;
mod docs;
mod error;
mod model;
mod repository;
mod routes;
mod utils;

use crate::config::Config;
use crate::docs::ApiDoc;
use crate::utils::scheduler;

/// Daily rolling file log under `log_dir`. The guard must live as long as the server.
fn init_tracing(log_dir: &str) -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(rolling::daily(log_dir, "app.log"));

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .init();

    guard
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = Config::from_env();
    let _log_guard = init_tracing(&config.log_dir);

    info!(db = %config.database_path.display(), "Starting attendance service");

    let pool = db::init_db(&config.database_path, config.db_max_connections)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to open database");
            std::io::Error::other(e)
        })?;

    if config.seed_demo_data {
        match db::seed_demo_data(&pool).await {
            Ok(true) => info!("Demo data inserted"),
            Ok(false) => {}
            Err(e) => error!(error = %e, "Failed to insert demo data"),
        }
    }

    scheduler::start(pool.clone(), config.clone());

    let bind_addr = config.server_addr.clone();
    info!(addr = %bind_addr, "Listening");

    HttpServer::new(move || {
        let routes_config = config.clone();
        App::new()
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            // wildcard so the UI's JS/CSS assets resolve
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(Data::new(pool.clone()))
            .app_data(Data::new(config.clone()))
            .configure(move |cfg| routes::configure(cfg, routes_config))
    })
    .bind(bind_addr)?
    .run()
    .await
}
