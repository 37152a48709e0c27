use actix_web::{get, Responder};

use crate::handlers::backend_health_handler::{backend_health_check, service_info};

#[get("/health")]
async fn backend_health() -> impl Responder {
    backend_health_check().await
}

#[get("/")]
async fn root() -> impl Responder {
    service_info().await
}
