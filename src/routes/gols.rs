use actix_web::{delete, get, post, put, web, HttpResponse, Result};
use sqlx::SqlitePool;

use crate::handlers::goal_handler;
use crate::models::goal::{CreateGoalRequest, ListGoalsQuery, UpdateGoalRequest};

#[post("/gols/")]
async fn create_goal(
    request: web::Json<CreateGoalRequest>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    goal_handler::create_goal(request, pool).await
}

#[get("/gols/")]
async fn list_goals(
    query: web::Query<ListGoalsQuery>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    goal_handler::list_goals(query, pool).await
}

#[get("/gols/{gol_id}")]
async fn get_goal(
    path: web::Path<i64>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    goal_handler::get_goal(path.into_inner(), pool).await
}

/// Changing the side moves the point between the counters
#[put("/gols/{gol_id}")]
async fn update_goal(
    path: web::Path<i64>,
    request: web::Json<UpdateGoalRequest>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    goal_handler::update_goal(path.into_inner(), request, pool).await
}

#[delete("/gols/{gol_id}")]
async fn delete_goal(
    path: web::Path<i64>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    goal_handler::delete_goal(path.into_inner(), pool).await
}
