use actix_web::{delete, get, patch, post, put, web, HttpResponse, Result};
use sqlx::SqlitePool;

use crate::handlers::match_handler;
use crate::models::goal::QuickGoalRequest;
use crate::models::matches::{ClockRequest, CreateMatchRequest, ListMatchesQuery, UpdateMatchRequest};

#[post("/partidas/")]
async fn create_match(
    request: web::Json<CreateMatchRequest>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    match_handler::create_match(request, pool).await
}

/// List matches, optionally of one pelada
#[get("/partidas/")]
async fn list_matches(
    query: web::Query<ListMatchesQuery>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    match_handler::list_matches(query, pool).await
}

#[get("/partidas/{partida_id}")]
async fn get_match(
    path: web::Path<i64>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    match_handler::get_match(path.into_inner(), pool).await
}

#[put("/partidas/{partida_id}")]
async fn update_match(
    path: web::Path<i64>,
    request: web::Json<UpdateMatchRequest>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    match_handler::update_match(path.into_inner(), request, pool).await
}

#[delete("/partidas/{partida_id}")]
async fn delete_match(
    path: web::Path<i64>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    match_handler::delete_match(path.into_inner(), pool).await
}

#[patch("/partidas/{partida_id}/iniciar")]
async fn start_match(
    path: web::Path<i64>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    match_handler::start_match(path.into_inner(), pool).await
}

#[patch("/partidas/{partida_id}/finalizar")]
async fn finish_match(
    path: web::Path<i64>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    match_handler::finish_match(path.into_inner(), pool).await
}

/// Match with goals and the scorer roster
#[get("/partidas/{partida_id}/detalhada")]
async fn get_match_detail(
    path: web::Path<i64>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    match_handler::get_match_detail(path.into_inner(), pool).await
}

/// Play, pause or reset the match clock
#[post("/partidas/{partida_id}/cronometro")]
async fn clock_action(
    path: web::Path<i64>,
    request: web::Json<ClockRequest>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    match_handler::clock_action(path.into_inner(), request, pool).await
}

/// Log a goal at the current clock minute
#[post("/partidas/{partida_id}/gol-rapido")]
async fn quick_goal(
    path: web::Path<i64>,
    request: web::Json<QuickGoalRequest>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    match_handler::quick_goal(path.into_inner(), request, pool).await
}
