use actix_web::{web, HttpResponse, Result};
use chrono::Utc;
use sqlx::SqlitePool;

use crate::db::goal_queries::GoalQueries;
use crate::db::match_queries::MatchQueries;
use crate::handlers::{query_error_response, validation_error_response};
use crate::models::common::{page_limit, page_offset};
use crate::models::goal::QuickGoalRequest;
use crate::models::matches::{
    ClockRequest, ClockResponse, CreateMatchRequest, ListMatchesQuery, MatchLifecycleResponse,
    UpdateMatchRequest,
};

#[tracing::instrument(
    name = "Create match",
    skip(request, pool),
    fields(pelada_id = %request.pelada_id)
)]
pub async fn create_match(
    request: web::Json<CreateMatchRequest>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    if let Err(message) = request.validate() {
        return Ok(validation_error_response(message));
    }

    let request = request.sanitized();
    match MatchQueries::new(pool.get_ref().clone()).create(&request).await {
        Ok(partida) => Ok(HttpResponse::Created().json(partida)),
        Err(e) => Ok(query_error_response(&e)),
    }
}

#[tracing::instrument(name = "List matches", skip(query, pool))]
pub async fn list_matches(
    query: web::Query<ListMatchesQuery>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    match MatchQueries::new(pool.get_ref().clone())
        .list(query.pelada_id, page_offset(query.skip), page_limit(query.limit))
        .await
    {
        Ok(matches) => Ok(HttpResponse::Ok().json(matches)),
        Err(e) => Ok(query_error_response(&e)),
    }
}

#[tracing::instrument(name = "Get match", skip(pool))]
pub async fn get_match(match_id: i64, pool: web::Data<SqlitePool>) -> Result<HttpResponse> {
    match MatchQueries::new(pool.get_ref().clone()).get(match_id).await {
        Ok(partida) => Ok(HttpResponse::Ok().json(partida)),
        Err(e) => Ok(query_error_response(&e)),
    }
}

#[tracing::instrument(name = "Update match", skip(request, pool))]
pub async fn update_match(
    match_id: i64,
    request: web::Json<UpdateMatchRequest>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    if let Err(message) = request.validate() {
        return Ok(validation_error_response(message));
    }

    match MatchQueries::new(pool.get_ref().clone())
        .update(match_id, &request)
        .await
    {
        Ok(partida) => Ok(HttpResponse::Ok().json(partida)),
        Err(e) => Ok(query_error_response(&e)),
    }
}

#[tracing::instrument(name = "Delete match", skip(pool))]
pub async fn delete_match(match_id: i64, pool: web::Data<SqlitePool>) -> Result<HttpResponse> {
    match MatchQueries::new(pool.get_ref().clone()).delete(match_id).await {
        Ok(()) => Ok(HttpResponse::NoContent().finish()),
        Err(e) => Ok(query_error_response(&e)),
    }
}

#[tracing::instrument(name = "Start match", skip(pool))]
pub async fn start_match(match_id: i64, pool: web::Data<SqlitePool>) -> Result<HttpResponse> {
    match MatchQueries::new(pool.get_ref().clone())
        .start(match_id, Utc::now())
        .await
    {
        Ok(partida) => Ok(HttpResponse::Ok().json(MatchLifecycleResponse::new(
            "Partida iniciada com sucesso",
            partida,
        ))),
        Err(e) => Ok(query_error_response(&e)),
    }
}

#[tracing::instrument(name = "Finish match", skip(pool))]
pub async fn finish_match(match_id: i64, pool: web::Data<SqlitePool>) -> Result<HttpResponse> {
    match MatchQueries::new(pool.get_ref().clone())
        .finish(match_id, Utc::now())
        .await
    {
        Ok(partida) => Ok(HttpResponse::Ok().json(MatchLifecycleResponse::new(
            "Partida finalizada com sucesso",
            partida,
        ))),
        Err(e) => Ok(query_error_response(&e)),
    }
}

/// Match, goals and scorer roster for the live screen.
#[tracing::instrument(name = "Get match detail", skip(pool))]
pub async fn get_match_detail(match_id: i64, pool: web::Data<SqlitePool>) -> Result<HttpResponse> {
    match MatchQueries::new(pool.get_ref().clone())
        .detail(match_id, Utc::now())
        .await
    {
        Ok(detail) => Ok(HttpResponse::Ok().json(detail)),
        Err(e) => Ok(query_error_response(&e)),
    }
}

#[tracing::instrument(
    name = "Clock action",
    skip(request, pool),
    fields(acao = %request.acao)
)]
pub async fn clock_action(
    match_id: i64,
    request: web::Json<ClockRequest>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    let now = Utc::now();
    match MatchQueries::new(pool.get_ref().clone())
        .apply_clock_action(match_id, request.acao, now)
        .await
    {
        Ok(partida) => {
            let cronometro = partida.clock().snapshot(now);
            Ok(HttpResponse::Ok().json(ClockResponse { partida, cronometro }))
        }
        Err(e) => Ok(query_error_response(&e)),
    }
}

#[tracing::instrument(
    name = "Quick goal",
    skip(request, pool),
    fields(jogador_id = %request.jogador_id, time = %request.time)
)]
pub async fn quick_goal(
    match_id: i64,
    request: web::Json<QuickGoalRequest>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    match GoalQueries::new(pool.get_ref().clone())
        .quick(match_id, &request, Utc::now())
        .await
    {
        Ok(goal) => Ok(HttpResponse::Created().json(goal)),
        Err(e) => Ok(query_error_response(&e)),
    }
}
