use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{info, warn};

use crate::db::errors::{QueryError, GOAL_NOT_FOUND, MATCH_NOT_FOUND, PLAYER_NOT_FOUND};
use crate::models::common::TeamSide;
use crate::models::goal::{
    CreateGoalRequest, Goal, GoalSummary, QuickGoalRequest, UpdateGoalRequest, MAX_GOAL_MINUTE,
};
use crate::models::matches::Match;

const INACTIVE_SCORER: &str = "Jogador está inativo";

#[derive(Debug, Clone)]
pub struct GoalQueries {
    pool: SqlitePool,
}

impl GoalQueries {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a goal and bump the scoring side's counter in one transaction.
    pub async fn create(&self, request: &CreateGoalRequest) -> Result<Goal, QueryError> {
        let mut tx = self.pool.begin().await?;
        fetch_match(&mut tx, request.partida_id).await?;
        ensure_player_exists(&mut tx, request.jogador_id).await?;

        let goal = insert_goal(
            &mut tx,
            request.partida_id,
            request.jogador_id,
            request.minuto,
            request.time,
            request.descricao.as_deref(),
        )
        .await?;
        adjust_score(&mut tx, goal.match_id, goal.team, 1).await?;

        tx.commit().await?;
        info!("Goal {} for team {} in match {} at minute {}", goal.id, goal.team, goal.match_id, goal.minute);
        Ok(goal)
    }

    /// Goal from the live screen. The minute is read off the match clock at `now`.
    pub async fn quick(&self, match_id: i64, request: &QuickGoalRequest, now: DateTime<Utc>) -> Result<Goal, QueryError> {
        let mut tx = self.pool.begin().await?;
        let partida = fetch_match(&mut tx, match_id).await?;
        if let Err(e) = partida.ensure_open() {
            warn!("Rejected quick goal on match {}: {}", match_id, e);
            return Err(e.into());
        }

        let active: Option<(bool,)> = sqlx::query_as("SELECT active FROM players WHERE id = ?")
            .bind(request.jogador_id)
            .fetch_optional(&mut *tx)
            .await?;
        match active {
            None => return Err(QueryError::not_found(PLAYER_NOT_FOUND)),
            Some((false,)) => return Err(QueryError::invalid(INACTIVE_SCORER)),
            Some((true,)) => {}
        }

        let minute = partida.clock().goal_minute(now).min(MAX_GOAL_MINUTE);
        let goal = insert_goal(&mut tx, match_id, request.jogador_id, minute, request.time, None).await?;
        adjust_score(&mut tx, match_id, request.time, 1).await?;

        tx.commit().await?;
        info!("Quick goal {} for team {} in match {} at minute {}", goal.id, goal.team, match_id, minute);
        Ok(goal)
    }

    pub async fn list(
        &self,
        match_id: Option<i64>,
        player_id: Option<i64>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Goal>, QueryError> {
        let goals = sqlx::query_as::<_, Goal>(
            r#"
            SELECT * FROM goals
            WHERE (?1 IS NULL OR match_id = ?1) AND (?2 IS NULL OR player_id = ?2)
            ORDER BY match_id, minute, id
            LIMIT ?3 OFFSET ?4
            "#,
        )
        .bind(match_id)
        .bind(player_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(goals)
    }

    /// Goals of a match with scorer names, in match order.
    pub async fn summaries(&self, match_id: i64) -> Result<Vec<GoalSummary>, QueryError> {
        let goals = sqlx::query_as::<_, GoalSummary>(
            r#"
            SELECT g.id, pl.name AS player_name, g.team, g.minute
            FROM goals g
            JOIN players pl ON pl.id = g.player_id
            WHERE g.match_id = ?
            ORDER BY g.minute, g.id
            "#,
        )
        .bind(match_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(goals)
    }

    pub async fn get(&self, goal_id: i64) -> Result<Goal, QueryError> {
        sqlx::query_as::<_, Goal>("SELECT * FROM goals WHERE id = ?")
            .bind(goal_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| QueryError::not_found(GOAL_NOT_FOUND))
    }

    /// Moving a goal to the other side moves its point too.
    pub async fn update(&self, goal_id: i64, request: &UpdateGoalRequest) -> Result<Goal, QueryError> {
        let mut tx = self.pool.begin().await?;
        let current = fetch_goal(&mut tx, goal_id).await?;
        let updated = request.apply_to(&current);

        if updated.player_id != current.player_id {
            ensure_player_exists(&mut tx, updated.player_id).await?;
        }

        let goal = sqlx::query_as::<_, Goal>(
            r#"
            UPDATE goals
            SET player_id = ?, minute = ?, team = ?, description = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(updated.player_id)
        .bind(updated.minute)
        .bind(updated.team)
        .bind(&updated.description)
        .bind(goal_id)
        .fetch_one(&mut *tx)
        .await?;

        if goal.team != current.team {
            adjust_score(&mut tx, goal.match_id, current.team, -1).await?;
            adjust_score(&mut tx, goal.match_id, goal.team, 1).await?;
        }

        tx.commit().await?;
        info!("Updated goal {}", goal_id);
        Ok(goal)
    }

    pub async fn delete(&self, goal_id: i64) -> Result<(), QueryError> {
        let mut tx = self.pool.begin().await?;
        let goal = fetch_goal(&mut tx, goal_id).await?;

        sqlx::query("DELETE FROM goals WHERE id = ?")
            .bind(goal_id)
            .execute(&mut *tx)
            .await?;
        adjust_score(&mut tx, goal.match_id, goal.team, -1).await?;

        tx.commit().await?;
        info!("Deleted goal {} from match {}", goal_id, goal.match_id);
        Ok(())
    }
}

async fn fetch_match(tx: &mut Transaction<'_, Sqlite>, match_id: i64) -> Result<Match, QueryError> {
    sqlx::query_as::<_, Match>("SELECT * FROM matches WHERE id = ?")
        .bind(match_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| QueryError::not_found(MATCH_NOT_FOUND))
}

async fn fetch_goal(tx: &mut Transaction<'_, Sqlite>, goal_id: i64) -> Result<Goal, QueryError> {
    sqlx::query_as::<_, Goal>("SELECT * FROM goals WHERE id = ?")
        .bind(goal_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| QueryError::not_found(GOAL_NOT_FOUND))
}

async fn ensure_player_exists(tx: &mut Transaction<'_, Sqlite>, player_id: i64) -> Result<(), QueryError> {
    let player: Option<(i64,)> = sqlx::query_as("SELECT id FROM players WHERE id = ?")
        .bind(player_id)
        .fetch_optional(&mut **tx)
        .await?;
    player
        .map(|_| ())
        .ok_or_else(|| QueryError::not_found(PLAYER_NOT_FOUND))
}

async fn insert_goal(
    tx: &mut Transaction<'_, Sqlite>,
    match_id: i64,
    player_id: i64,
    minute: i32,
    team: TeamSide,
    description: Option<&str>,
) -> Result<Goal, QueryError> {
    let goal = sqlx::query_as::<_, Goal>(
        r#"
        INSERT INTO goals (match_id, player_id, minute, team, description, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(match_id)
    .bind(player_id)
    .bind(minute)
    .bind(team)
    .bind(description)
    .bind(Utc::now())
    .fetch_one(&mut **tx)
    .await?;
    Ok(goal)
}

/// Counters never drop below zero.
async fn adjust_score(
    tx: &mut Transaction<'_, Sqlite>,
    match_id: i64,
    side: TeamSide,
    delta: i32,
) -> Result<(), QueryError> {
    let statement = match side {
        TeamSide::A => "UPDATE matches SET team_a_goals = MAX(team_a_goals + ?, 0), updated_at = ? WHERE id = ?",
        TeamSide::B => "UPDATE matches SET team_b_goals = MAX(team_b_goals + ?, 0), updated_at = ? WHERE id = ?",
    };
    sqlx::query(statement)
        .bind(delta)
        .bind(Utc::now())
        .bind(match_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}
