use actix_web::{delete, get, patch, post, put, web, HttpResponse, Result};
use sqlx::SqlitePool;

use crate::handlers::{participation_handler, pelada_handler};
use crate::models::common::PaginationQuery;
use crate::models::participation::{AssignTeamRequest, ConfirmPresenceRequest, EnrollRequest};
use crate::models::pelada::{CreatePeladaRequest, UpdatePeladaRequest};

#[post("/peladas/")]
async fn create_pelada(
    request: web::Json<CreatePeladaRequest>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    pelada_handler::create_pelada(request, pool).await
}

#[get("/peladas/")]
async fn list_peladas(
    query: web::Query<PaginationQuery>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    pelada_handler::list_peladas(query, pool).await
}

#[get("/peladas/{pelada_id}")]
async fn get_pelada(
    path: web::Path<i64>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    pelada_handler::get_pelada(path.into_inner(), pool).await
}

#[put("/peladas/{pelada_id}")]
async fn update_pelada(
    path: web::Path<i64>,
    request: web::Json<UpdatePeladaRequest>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    pelada_handler::update_pelada(path.into_inner(), request, pool).await
}

/// Delete a pelada with its matches, goals and enrolments
#[delete("/peladas/{pelada_id}")]
async fn delete_pelada(
    path: web::Path<i64>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    pelada_handler::delete_pelada(path.into_inner(), pool).await
}

#[post("/peladas/{pelada_id}/participantes")]
async fn enroll_player(
    path: web::Path<i64>,
    request: web::Json<EnrollRequest>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    participation_handler::enroll_player(path.into_inner(), request, pool).await
}

#[get("/peladas/{pelada_id}/participantes")]
async fn list_participants(
    path: web::Path<i64>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    participation_handler::list_participants(path.into_inner(), pool).await
}

#[patch("/peladas/{pelada_id}/participantes/{jogador_id}")]
async fn confirm_presence(
    path: web::Path<(i64, i64)>,
    request: web::Json<ConfirmPresenceRequest>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    let (pelada_id, jogador_id) = path.into_inner();
    participation_handler::confirm_presence(pelada_id, jogador_id, request, pool).await
}

#[put("/peladas/{pelada_id}/participantes/{jogador_id}/time")]
async fn assign_team(
    path: web::Path<(i64, i64)>,
    request: web::Json<AssignTeamRequest>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    let (pelada_id, jogador_id) = path.into_inner();
    participation_handler::assign_team(pelada_id, jogador_id, request, pool).await
}

#[delete("/peladas/{pelada_id}/participantes/{jogador_id}")]
async fn remove_participant(
    path: web::Path<(i64, i64)>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    let (pelada_id, jogador_id) = path.into_inner();
    participation_handler::remove_participant(pelada_id, jogador_id, pool).await
}
