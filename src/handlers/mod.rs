use actix_web::HttpResponse;

use crate::db::errors::QueryError;
use crate::models::common::ErrorResponse;

pub mod backend_health_handler;
pub mod player_handler;
pub mod pelada_handler;
pub mod participation_handler;
pub mod match_handler;
pub mod goal_handler;

/// Maps a query-layer failure to its HTTP answer with a `{detail}` body.
pub fn query_error_response(error: &QueryError) -> HttpResponse {
    match error {
        QueryError::NotFound(message) => {
            tracing::info!("Not found: {}", message);
            HttpResponse::NotFound().json(ErrorResponse::new(message.as_str()))
        }
        QueryError::Invalid(message) => {
            tracing::warn!("Rejected request: {}", message);
            HttpResponse::BadRequest().json(ErrorResponse::new(message.as_str()))
        }
        QueryError::Database(e) => {
            tracing::error!("Database error: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new("Erro interno do servidor"))
        }
    }
}

pub fn validation_error_response(message: String) -> HttpResponse {
    tracing::warn!("Validation failed: {}", message);
    HttpResponse::BadRequest().json(ErrorResponse::new(message))
}
