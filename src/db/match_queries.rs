use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::db::errors::{QueryError, MATCH_NOT_FOUND, PELADA_NOT_FOUND};
use crate::db::goal_queries::GoalQueries;
use crate::db::participation_queries::ParticipationQueries;
use crate::game::clock::{ClockAction, ClockTransition};
use crate::models::matches::{CreateMatchRequest, Match, MatchDetail, MatchStatus, UpdateMatchRequest};

#[derive(Debug, Clone)]
pub struct MatchQueries {
    pool: SqlitePool,
}

impl MatchQueries {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: &CreateMatchRequest) -> Result<Match, QueryError> {
        let pelada: Option<(i64,)> = sqlx::query_as("SELECT id FROM peladas WHERE id = ?")
            .bind(request.pelada_id)
            .fetch_optional(&self.pool)
            .await?;
        if pelada.is_none() {
            return Err(QueryError::not_found(PELADA_NOT_FOUND));
        }

        let now = Utc::now();
        let partida = sqlx::query_as::<_, Match>(
            r#"
            INSERT INTO matches
                (name, pelada_id, scheduled_at, team_a_name, team_b_name, team_a_goals, team_b_goals,
                 notes, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, 0, 0, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&request.name)
        .bind(request.pelada_id)
        .bind(request.scheduled_at)
        .bind(&request.team_a_name)
        .bind(&request.team_b_name)
        .bind(&request.notes)
        .bind(MatchStatus::Scheduled)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        info!("Created match {} in pelada {}", partida.id, partida.pelada_id);
        Ok(partida)
    }

    pub async fn list(&self, pelada_id: Option<i64>, offset: i64, limit: i64) -> Result<Vec<Match>, QueryError> {
        let matches = match pelada_id {
            Some(pelada_id) => {
                sqlx::query_as::<_, Match>(
                    "SELECT * FROM matches WHERE pelada_id = ? ORDER BY scheduled_at, id LIMIT ? OFFSET ?",
                )
                .bind(pelada_id)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Match>("SELECT * FROM matches ORDER BY scheduled_at, id LIMIT ? OFFSET ?")
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(matches)
    }

    pub async fn find(&self, match_id: i64) -> Result<Option<Match>, QueryError> {
        let partida = sqlx::query_as::<_, Match>("SELECT * FROM matches WHERE id = ?")
            .bind(match_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(partida)
    }

    pub async fn get(&self, match_id: i64) -> Result<Match, QueryError> {
        self.find(match_id)
            .await?
            .ok_or_else(|| QueryError::not_found(MATCH_NOT_FOUND))
    }

    pub async fn update(&self, match_id: i64, request: &UpdateMatchRequest) -> Result<Match, QueryError> {
        let current = self.get(match_id).await?;
        request.check_status_change(&current).map_err(QueryError::invalid)?;
        let updated = request.apply_to(&current, Utc::now());

        let partida = sqlx::query_as::<_, Match>(
            r#"
            UPDATE matches
            SET name = ?, scheduled_at = ?, team_a_name = ?, team_b_name = ?, notes = ?, status = ?, updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&updated.name)
        .bind(updated.scheduled_at)
        .bind(&updated.team_a_name)
        .bind(&updated.team_b_name)
        .bind(&updated.notes)
        .bind(updated.status)
        .bind(updated.updated_at)
        .bind(match_id)
        .fetch_one(&self.pool)
        .await?;

        info!("Updated match {}", match_id);
        Ok(partida)
    }

    /// Deletes the match and its goals.
    pub async fn delete(&self, match_id: i64) -> Result<(), QueryError> {
        let result = sqlx::query("DELETE FROM matches WHERE id = ?")
            .bind(match_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(QueryError::not_found(MATCH_NOT_FOUND));
        }
        info!("Deleted match {}", match_id);
        Ok(())
    }

    /// Apply a clock action at `now` and persist the resulting timestamps.
    pub async fn apply_clock_action(&self, match_id: i64, action: ClockAction, now: DateTime<Utc>) -> Result<Match, QueryError> {
        let current = self.get(match_id).await?;
        current.ensure_open()?;
        let transition = current.clock().apply(action, now)?;
        info!("Clock '{}' on match {}: {:?} -> {:?}", action, match_id, current.clock().state(), transition.clock().state());
        self.save_clock(match_id, &transition, now).await
    }

    /// Kick off from zero (`iniciar`).
    pub async fn start(&self, match_id: i64, now: DateTime<Utc>) -> Result<Match, QueryError> {
        let current = self.get(match_id).await?;
        current.ensure_open()?;
        let transition = current.clock().start(now)?;
        info!("Match {} started", match_id);
        self.save_clock(match_id, &transition, now).await
    }

    /// Final whistle (`finalizar`).
    pub async fn finish(&self, match_id: i64, now: DateTime<Utc>) -> Result<Match, QueryError> {
        let current = self.get(match_id).await?;
        current.ensure_open()?;
        let transition = current.clock().finish(now)?;
        let partida = self.save_clock(match_id, &transition, now).await?;
        info!(
            "Match {} finished {} after {} minutes",
            match_id,
            partida.scoreline(),
            partida.duration_minutes()
        );
        Ok(partida)
    }

    async fn save_clock(&self, match_id: i64, transition: &ClockTransition, now: DateTime<Utc>) -> Result<Match, QueryError> {
        let partida = sqlx::query_as::<_, Match>(
            r#"
            UPDATE matches
            SET started_at = ?, ended_at = ?, status = ?, updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(transition.started_at)
        .bind(transition.ended_at)
        .bind(transition.status)
        .bind(now)
        .bind(match_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| QueryError::not_found(MATCH_NOT_FOUND))?;
        Ok(partida)
    }

    /// Match, goal list and scorer roster in one bundle.
    pub async fn detail(&self, match_id: i64, now: DateTime<Utc>) -> Result<MatchDetail, QueryError> {
        let partida = self.get(match_id).await?;
        let gols = GoalQueries::new(self.pool.clone()).summaries(match_id).await?;
        let jogadores = ParticipationQueries::new(self.pool.clone())
            .roster(partida.pelada_id)
            .await?;
        debug!("Match {} detail: {} goals, {} roster entries", match_id, gols.len(), jogadores.len());

        Ok(MatchDetail {
            cronometro: partida.clock().snapshot(now),
            partida,
            gols,
            jogadores,
            gerado_em: now,
        })
    }
}
