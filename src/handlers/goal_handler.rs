use actix_web::{web, HttpResponse, Result};
use sqlx::SqlitePool;

use crate::db::goal_queries::GoalQueries;
use crate::handlers::{query_error_response, validation_error_response};
use crate::models::common::{page_limit, page_offset};
use crate::models::goal::{CreateGoalRequest, ListGoalsQuery, UpdateGoalRequest};

#[tracing::instrument(
    name = "Create goal",
    skip(request, pool),
    fields(partida_id = %request.partida_id, time = %request.time)
)]
pub async fn create_goal(
    request: web::Json<CreateGoalRequest>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    if let Err(message) = request.validate() {
        return Ok(validation_error_response(message));
    }

    match GoalQueries::new(pool.get_ref().clone()).create(&request).await {
        Ok(goal) => Ok(HttpResponse::Created().json(goal)),
        Err(e) => Ok(query_error_response(&e)),
    }
}

#[tracing::instrument(name = "List goals", skip(query, pool))]
pub async fn list_goals(
    query: web::Query<ListGoalsQuery>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    match GoalQueries::new(pool.get_ref().clone())
        .list(
            query.partida_id,
            query.jogador_id,
            page_offset(query.skip),
            page_limit(query.limit),
        )
        .await
    {
        Ok(goals) => Ok(HttpResponse::Ok().json(goals)),
        Err(e) => Ok(query_error_response(&e)),
    }
}

#[tracing::instrument(name = "Get goal", skip(pool))]
pub async fn get_goal(goal_id: i64, pool: web::Data<SqlitePool>) -> Result<HttpResponse> {
    match GoalQueries::new(pool.get_ref().clone()).get(goal_id).await {
        Ok(goal) => Ok(HttpResponse::Ok().json(goal)),
        Err(e) => Ok(query_error_response(&e)),
    }
}

#[tracing::instrument(name = "Update goal", skip(request, pool))]
pub async fn update_goal(
    goal_id: i64,
    request: web::Json<UpdateGoalRequest>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    if let Err(message) = request.validate() {
        return Ok(validation_error_response(message));
    }

    match GoalQueries::new(pool.get_ref().clone()).update(goal_id, &request).await {
        Ok(goal) => Ok(HttpResponse::Ok().json(goal)),
        Err(e) => Ok(query_error_response(&e)),
    }
}

#[tracing::instrument(name = "Delete goal", skip(pool))]
pub async fn delete_goal(goal_id: i64, pool: web::Data<SqlitePool>) -> Result<HttpResponse> {
    match GoalQueries::new(pool.get_ref().clone()).delete(goal_id).await {
        Ok(()) => Ok(HttpResponse::NoContent().finish()),
        Err(e) => Ok(query_error_response(&e)),
    }
}
