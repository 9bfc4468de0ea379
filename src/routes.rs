use crate::{
    api::{attendance, backup, client, employee, health, leader, site},
    config::Config,
    error::AppError,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let requests_per_min = requests_per_min.max(1);
        let per_ms = (60_000 / requests_per_min as u64).max(1);
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .expect("per_millisecond and burst_size are non-zero");
        Governor::new(&cfg)
    }

    // Uniform error bodies for malformed JSON and query strings
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        AppError::validation(format!("JSON inválido: {}", err)).into()
    });
    let query_config = web::QueryConfig::default().error_handler(|err, _req| {
        AppError::invalid_input(format!("Parámetros inválidos: {}", err)).into()
    });

    cfg.app_data(json_config)
        .app_data(query_config)
        .service(health::health);

    cfg.service(
        web::scope(&config.api_prefix)
            .service(
                web::scope("/clientes")
                    .service(
                        web::resource("")
                            .route(web::get().to(client::list_clients))
                            .route(web::post().to(client::create_client)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(client::get_client))
                            .route(web::put().to(client::update_client))
                            .route(web::delete().to(client::delete_client)),
                    ),
            )
            .service(
                web::scope("/lideres")
                    .service(
                        web::resource("")
                            .route(web::get().to(leader::list_leaders))
                            .route(web::post().to(leader::create_leader)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(leader::get_leader))
                            .route(web::put().to(leader::update_leader))
                            .route(web::delete().to(leader::delete_leader)),
                    ),
            )
            .service(
                web::scope("/empleados")
                    // /empleados?estado=active
                    .service(
                        web::resource("")
                            .route(web::get().to(employee::list_employees))
                            .route(web::post().to(employee::create_employee)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(employee::get_employee))
                            .route(web::put().to(employee::update_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    ),
            )
            .service(
                web::scope("/obras")
                    .service(
                        web::resource("")
                            .route(web::get().to(site::list_sites))
                            .route(web::post().to(site::create_site)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(site::get_site))
                            .route(web::put().to(site::update_site))
                            .route(web::delete().to(site::delete_site)),
                    )
                    .service(
                        web::resource("/{id}/empleados")
                            .route(web::get().to(site::list_site_employees)),
                    )
                    .service(
                        web::resource("/{id}/asignaciones")
                            .route(web::get().to(site::list_site_assignments)),
                    ),
            )
            .service(
                web::scope("/asistencias")
                    .service(
                        web::resource("")
                            .route(web::get().to(attendance::list_attendance)),
                    )
                    .service(
                        web::resource("/registrar")
                            .route(web::post().to(attendance::register_attendance)),
                    )
                    .service(
                        web::resource("/verificar")
                            .route(web::get().to(attendance::verify_attendance)),
                    ),
            ),
    );

    // PIN-gated backup retrieval, rate limited per peer IP
    cfg.service(
        web::scope("/backup")
            .wrap(build_limiter(config.rate_backup_per_min))
            .service(web::resource("/lista").route(web::get().to(backup::list_backups)))
            .service(
                web::resource("/descargar/{filename}")
                    .route(web::get().to(backup::download_backup)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use actix_web::http::StatusCode;
    use actix_web::web::Data;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    const PEER: &str = "127.0.0.1:40000";

    macro_rules! app {
        ($pool:expr, $config:expr) => {
            test::init_service(
                App::new()
                    .app_data(Data::new($pool.clone()))
                    .app_data(Data::new($config.clone()))
                    .configure(|cfg| configure(cfg, $config.clone())),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn entity_crud_maps_to_http_statuses() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::for_tests(dir.path());
        let pool = test_pool().await;
        let app = app!(pool, config);

        let req = test::TestRequest::post()
            .uri("/api/clientes")
            .set_json(json!({ "nombre": "Construcciones SA", "ruc_dni": "20123456789" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        let id = body["id"].as_i64().unwrap();

        let req = test::TestRequest::get().uri("/api/clientes").to_request();
        let clients: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(clients[0]["id"], id);
        assert_eq!(clients[0]["nombre"], "Construcciones SA");
        assert_eq!(clients[0]["ruc_dni"], "20123456789");

        let req = test::TestRequest::post()
            .uri("/api/clientes")
            .set_json(json!({ "email": "sin-nombre@example.com" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "VALIDATION_ERROR");

        let req = test::TestRequest::put()
            .uri("/api/clientes/999")
            .set_json(json!({ "nombre": "Nadie" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/clientes/{}", id))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn attendance_conflict_returns_409_with_details() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::for_tests(dir.path());
        let pool = test_pool().await;
        let app = app!(pool, config);

        let req = test::TestRequest::post()
            .uri("/api/empleados")
            .set_json(json!({ "nombre": "Pedro", "apellido": "Martínez" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let employee_id = body["id"].as_i64().unwrap();

        let mut sites = Vec::new();
        for name in ["Edificio Central", "Casa Quinta"] {
            let req = test::TestRequest::post()
                .uri("/api/obras")
                .set_json(json!({ "nombre": name, "empleados_ids": [employee_id] }))
                .to_request();
            let body: Value = test::call_and_read_body_json(&app, req).await;
            sites.push(body["id"].as_i64().unwrap());
        }

        let req = test::TestRequest::get()
            .uri(&format!("/api/obras/{}/empleados", sites[0]))
            .to_request();
        let assigned: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(assigned.as_array().unwrap().len(), 1);

        let registration = |site_id: i64| {
            json!({
                "fecha": "2024-01-15",
                "obra_id": site_id,
                "lider_id": null,
                "registros": [
                    { "empleado_id": employee_id, "presente": true, "tipo_jornada": "dia", "horas_extras": 1.5 }
                ]
            })
        };

        let req = test::TestRequest::post()
            .uri("/api/asistencias/registrar")
            .set_json(registration(sites[0]))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["registrados"], 1);

        let req = test::TestRequest::post()
            .uri("/api/asistencias/registrar")
            .set_json(registration(sites[1]))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "SCHEDULING_CONFLICT");
        assert_eq!(body["conflictos"][0]["empleado_id"], employee_id);
        assert_eq!(body["conflictos"][0]["empleado_nombre"], "Pedro Martínez");
        assert_eq!(body["conflictos"][0]["obra_nombre"], "Edificio Central");

        let req = test::TestRequest::get()
            .uri(&format!("/api/asistencias/verificar?fecha=2024-01-15&obra_id={}", sites[1]))
            .to_request();
        let rows: Value = test::call_and_read_body_json(&app, req).await;
        assert!(rows.as_array().unwrap().is_empty());

        let req = test::TestRequest::get()
            .uri("/api/asistencias?fecha_desde=2024-01-01&fecha_hasta=2024-01-31")
            .to_request();
        let rows: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(rows.as_array().unwrap().len(), 1);
        assert_eq!(rows[0]["obra_nombre"], "Edificio Central");
        assert_eq!(rows[0]["horas_extras"], 1.5);

        let req = test::TestRequest::get()
            .uri("/api/asistencias?fecha_desde=no-es-fecha")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn backup_surface_checks_pin_and_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::for_tests(dir.path());
        let pool = test_pool().await;
        std::fs::create_dir_all(&config.backup_dir).unwrap();
        std::fs::write(config.backup_dir.join("asistencias_2024-01-15.db"), b"snapshot").unwrap();
        let app = app!(pool, config);

        for uri in ["/backup/lista?pin=0000", "/backup/lista"] {
            let req = test::TestRequest::get().uri(uri).peer_addr(PEER.parse().unwrap()).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::FORBIDDEN);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["error"], "UNAUTHORIZED");
            assert!(body.get("nombre").is_none());
        }

        let req = test::TestRequest::get()
            .uri("/backup/lista?pin=4321")
            .peer_addr(PEER.parse().unwrap())
            .to_request();
        let files: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(files[0]["nombre"], "asistencias_2024-01-15.db");
        assert_eq!(files[0]["tamano"], 8);

        let req = test::TestRequest::get()
            .uri("/backup/descargar/asistencias_2024-01-15.db?pin=0000")
            .peer_addr(PEER.parse().unwrap())
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::get()
            .uri("/backup/descargar/notas.txt?pin=4321")
            .peer_addr(PEER.parse().unwrap())
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get()
            .uri("/backup/descargar/asistencias_1999-01-01.db?pin=4321")
            .peer_addr(PEER.parse().unwrap())
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get()
            .uri("/backup/descargar/asistencias_2024-01-15.db?pin=4321")
            .peer_addr(PEER.parse().unwrap())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let disposition = resp
            .headers()
            .get(actix_web::http::header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment"));
        assert_eq!(test::read_body(resp).await.as_ref(), b"snapshot");
    }
}
