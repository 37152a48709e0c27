use actix_web::{error, http, web, App, HttpResponse, HttpServer};
use actix_web::dev::Server;
use tracing_actix_web::TracingLogger;
use sqlx::SqlitePool;
use std::net::TcpListener;
use actix_cors::Cors;

pub mod config;
pub mod telemetry;
mod routes;
mod handlers;
pub mod models;
pub mod db;
pub mod game;
pub mod client;
pub mod views;
use crate::routes::init_routes;
use crate::models::common::ErrorResponse;

pub fn run(
    listener: TcpListener,
    db_pool: SqlitePool,
    allowed_origins: Vec<String>,
) -> Result<Server, std::io::Error> {
    // Wrap using web::Data, which boils down to an Arc smart pointer
    let db_pool_data = web::Data::new(db_pool);

    let server = HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH"])
            .allowed_headers(vec![
                http::header::ACCEPT,
                http::header::CONTENT_TYPE,
            ])
            .max_age(3600);
        for origin in &allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            // Malformed bodies, queries and paths answer 400 with a `{detail}` body
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                let detail = err.to_string();
                error::InternalError::from_response(err, bad_request(detail)).into()
            }))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                let detail = err.to_string();
                error::InternalError::from_response(err, bad_request(detail)).into()
            }))
            .app_data(web::PathConfig::default().error_handler(|err, _req| {
                let detail = err.to_string();
                error::InternalError::from_response(err, bad_request(detail)).into()
            }))
            // Get a pointer copy and attach it to the application state
            .app_data(db_pool_data.clone())
            .configure(init_routes)
    })
    .listen(listener)?
    .run();

    Ok(server)
}

fn bad_request(detail: String) -> HttpResponse {
    tracing::warn!("Malformed request: {}", detail);
    HttpResponse::BadRequest().json(ErrorResponse::new(detail))
}
