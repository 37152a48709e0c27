use actix_web::{web, HttpResponse, Result};
use sqlx::SqlitePool;

use crate::db::player_queries::PlayerQueries;
use crate::handlers::{query_error_response, validation_error_response};
use crate::models::common::{page_limit, page_offset, MessageResponse};
use crate::models::player::{CreatePlayerRequest, ListPlayersQuery, UpdatePlayerRequest};

#[tracing::instrument(
    name = "Create player",
    skip(request, pool),
    fields(email = %request.email)
)]
pub async fn create_player(
    request: web::Json<CreatePlayerRequest>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    if let Err(message) = request.validate() {
        return Ok(validation_error_response(message));
    }

    let request = request.sanitized();
    match PlayerQueries::new(pool.get_ref().clone()).create(&request).await {
        Ok(player) => Ok(HttpResponse::Created().json(player)),
        Err(e) => Ok(query_error_response(&e)),
    }
}

#[tracing::instrument(name = "List players", skip(query, pool))]
pub async fn list_players(
    query: web::Query<ListPlayersQuery>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    let only_active = query.ativo.unwrap_or(true);
    match PlayerQueries::new(pool.get_ref().clone())
        .list(page_offset(query.skip), page_limit(query.limit), only_active)
        .await
    {
        Ok(players) => Ok(HttpResponse::Ok().json(players)),
        Err(e) => Ok(query_error_response(&e)),
    }
}

#[tracing::instrument(name = "Get player", skip(pool))]
pub async fn get_player(player_id: i64, pool: web::Data<SqlitePool>) -> Result<HttpResponse> {
    match PlayerQueries::new(pool.get_ref().clone()).get(player_id).await {
        Ok(player) => Ok(HttpResponse::Ok().json(player)),
        Err(e) => Ok(query_error_response(&e)),
    }
}

#[tracing::instrument(name = "Update player", skip(request, pool))]
pub async fn update_player(
    player_id: i64,
    request: web::Json<UpdatePlayerRequest>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    if let Err(message) = request.validate() {
        return Ok(validation_error_response(message));
    }

    match PlayerQueries::new(pool.get_ref().clone())
        .update(player_id, &request)
        .await
    {
        Ok(player) => Ok(HttpResponse::Ok().json(player)),
        Err(e) => Ok(query_error_response(&e)),
    }
}

/// Soft delete: the player disappears from default listings but keeps its goals.
#[tracing::instrument(name = "Deactivate player", skip(pool))]
pub async fn deactivate_player(player_id: i64, pool: web::Data<SqlitePool>) -> Result<HttpResponse> {
    match PlayerQueries::new(pool.get_ref().clone()).deactivate(player_id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(MessageResponse::new("Jogador desativado com sucesso"))),
        Err(e) => Ok(query_error_response(&e)),
    }
}
