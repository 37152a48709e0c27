use actix_web::{web, HttpResponse, Result};
use sqlx::SqlitePool;

use crate::db::pelada_queries::PeladaQueries;
use crate::handlers::{query_error_response, validation_error_response};
use crate::models::common::PaginationQuery;
use crate::models::pelada::{CreatePeladaRequest, UpdatePeladaRequest};

#[tracing::instrument(
    name = "Create pelada",
    skip(request, pool),
    fields(nome = %request.name, data = %request.event_date)
)]
pub async fn create_pelada(
    request: web::Json<CreatePeladaRequest>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    if let Err(message) = request.validate() {
        return Ok(validation_error_response(message));
    }

    let request = request.sanitized();
    match PeladaQueries::new(pool.get_ref().clone()).create(&request).await {
        Ok(pelada) => Ok(HttpResponse::Created().json(pelada)),
        Err(e) => Ok(query_error_response(&e)),
    }
}

#[tracing::instrument(name = "List peladas", skip(query, pool))]
pub async fn list_peladas(
    query: web::Query<PaginationQuery>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    match PeladaQueries::new(pool.get_ref().clone())
        .list(query.offset(), query.limit())
        .await
    {
        Ok(peladas) => Ok(HttpResponse::Ok().json(peladas)),
        Err(e) => Ok(query_error_response(&e)),
    }
}

#[tracing::instrument(name = "Get pelada", skip(pool))]
pub async fn get_pelada(pelada_id: i64, pool: web::Data<SqlitePool>) -> Result<HttpResponse> {
    match PeladaQueries::new(pool.get_ref().clone()).get(pelada_id).await {
        Ok(pelada) => Ok(HttpResponse::Ok().json(pelada)),
        Err(e) => Ok(query_error_response(&e)),
    }
}

#[tracing::instrument(name = "Update pelada", skip(request, pool))]
pub async fn update_pelada(
    pelada_id: i64,
    request: web::Json<UpdatePeladaRequest>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    if let Err(message) = request.validate() {
        return Ok(validation_error_response(message));
    }

    match PeladaQueries::new(pool.get_ref().clone())
        .update(pelada_id, &request)
        .await
    {
        Ok(pelada) => Ok(HttpResponse::Ok().json(pelada)),
        Err(e) => Ok(query_error_response(&e)),
    }
}

#[tracing::instrument(name = "Delete pelada", skip(pool))]
pub async fn delete_pelada(pelada_id: i64, pool: web::Data<SqlitePool>) -> Result<HttpResponse> {
    match PeladaQueries::new(pool.get_ref().clone()).delete(pelada_id).await {
        Ok(()) => Ok(HttpResponse::NoContent().finish()),
        Err(e) => Ok(query_error_response(&e)),
    }
}
