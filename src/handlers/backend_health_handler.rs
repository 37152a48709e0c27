use actix_web::HttpResponse;
use serde_json::json;

pub async fn backend_health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy"
    }))
}

pub async fn service_info() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": "Peladas Manager API",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
