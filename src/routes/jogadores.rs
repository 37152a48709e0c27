use actix_web::{delete, get, post, put, web, HttpResponse, Result};
use sqlx::SqlitePool;

use crate::handlers::player_handler;
use crate::models::player::{CreatePlayerRequest, ListPlayersQuery, UpdatePlayerRequest};

/// Register a player
#[post("/jogadores/")]
async fn create_player(
    request: web::Json<CreatePlayerRequest>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    player_handler::create_player(request, pool).await
}

/// List players, active only unless `ativo=false`
#[get("/jogadores/")]
async fn list_players(
    query: web::Query<ListPlayersQuery>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    player_handler::list_players(query, pool).await
}

#[get("/jogadores/{jogador_id}")]
async fn get_player(
    path: web::Path<i64>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    player_handler::get_player(path.into_inner(), pool).await
}

#[put("/jogadores/{jogador_id}")]
async fn update_player(
    path: web::Path<i64>,
    request: web::Json<UpdatePlayerRequest>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    player_handler::update_player(path.into_inner(), request, pool).await
}

#[delete("/jogadores/{jogador_id}")]
async fn delete_player(
    path: web::Path<i64>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    player_handler::deactivate_player(path.into_inner(), pool).await
}
