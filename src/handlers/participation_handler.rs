use actix_web::{web, HttpResponse, Result};
use sqlx::SqlitePool;

use crate::db::participation_queries::ParticipationQueries;
use crate::handlers::query_error_response;
use crate::models::common::MessageResponse;
use crate::models::participation::{AssignTeamRequest, ConfirmPresenceRequest, EnrollRequest};

#[tracing::instrument(
    name = "Enroll player",
    skip(request, pool),
    fields(jogador_id = %request.jogador_id)
)]
pub async fn enroll_player(
    pelada_id: i64,
    request: web::Json<EnrollRequest>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    match ParticipationQueries::new(pool.get_ref().clone())
        .enroll(pelada_id, request.jogador_id)
        .await
    {
        Ok(participation) => Ok(HttpResponse::Created().json(participation)),
        Err(e) => Ok(query_error_response(&e)),
    }
}

#[tracing::instrument(name = "List participants", skip(pool))]
pub async fn list_participants(pelada_id: i64, pool: web::Data<SqlitePool>) -> Result<HttpResponse> {
    match ParticipationQueries::new(pool.get_ref().clone()).list(pelada_id).await {
        Ok(participants) => Ok(HttpResponse::Ok().json(participants)),
        Err(e) => Ok(query_error_response(&e)),
    }
}

#[tracing::instrument(
    name = "Confirm presence",
    skip(request, pool),
    fields(confirmado = %request.confirmado)
)]
pub async fn confirm_presence(
    pelada_id: i64,
    player_id: i64,
    request: web::Json<ConfirmPresenceRequest>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    match ParticipationQueries::new(pool.get_ref().clone())
        .set_confirmed(pelada_id, player_id, request.confirmado)
        .await
    {
        Ok(participation) => Ok(HttpResponse::Ok().json(participation)),
        Err(e) => Ok(query_error_response(&e)),
    }
}

#[tracing::instrument(name = "Assign team", skip(request, pool))]
pub async fn assign_team(
    pelada_id: i64,
    player_id: i64,
    request: web::Json<AssignTeamRequest>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    match ParticipationQueries::new(pool.get_ref().clone())
        .set_team(pelada_id, player_id, request.time)
        .await
    {
        Ok(participation) => Ok(HttpResponse::Ok().json(participation)),
        Err(e) => Ok(query_error_response(&e)),
    }
}

#[tracing::instrument(name = "Remove participant", skip(pool))]
pub async fn remove_participant(
    pelada_id: i64,
    player_id: i64,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    match ParticipationQueries::new(pool.get_ref().clone())
        .remove(pelada_id, player_id)
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(MessageResponse::new("Participação removida com sucesso"))),
        Err(e) => Ok(query_error_response(&e)),
    }
}
