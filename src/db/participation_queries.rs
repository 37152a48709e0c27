use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use crate::db::errors::{
    map_unique_violation, QueryError, PARTICIPATION_NOT_FOUND, PELADA_NOT_FOUND, PLAYER_NOT_FOUND,
};
use crate::models::common::TeamSide;
use crate::models::participation::{Participant, Participation};
use crate::models::player::RosterEntry;

const ALREADY_ENROLLED: &str = "Jogador já inscrito nesta pelada";

const PARTICIPANT_SELECT: &str = r#"
    SELECT pa.id, pa.player_id, pa.pelada_id, pa.confirmed, pa.team, pa.enrolled_at,
           pl.name AS player_name
    FROM participations pa
    JOIN players pl ON pl.id = pa.player_id
"#;

#[derive(Debug, Clone)]
pub struct ParticipationQueries {
    pool: SqlitePool,
}

impl ParticipationQueries {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Enrol an active player, respecting the pelada's capacity.
    pub async fn enroll(&self, pelada_id: i64, player_id: i64) -> Result<Participation, QueryError> {
        let mut tx = self.pool.begin().await?;

        let capacity: Option<(i32,)> = sqlx::query_as("SELECT max_players FROM peladas WHERE id = ?")
            .bind(pelada_id)
            .fetch_optional(&mut *tx)
            .await?;
        let (max_players,) = capacity.ok_or_else(|| QueryError::not_found(PELADA_NOT_FOUND))?;

        let player: Option<(bool,)> = sqlx::query_as("SELECT active FROM players WHERE id = ?")
            .bind(player_id)
            .fetch_optional(&mut *tx)
            .await?;
        match player {
            None => return Err(QueryError::not_found(PLAYER_NOT_FOUND)),
            Some((false,)) => return Err(QueryError::invalid("Jogador está inativo")),
            Some((true,)) => {}
        }

        let (enrolled,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM participations WHERE pelada_id = ?")
            .bind(pelada_id)
            .fetch_one(&mut *tx)
            .await?;
        if enrolled >= i64::from(max_players) {
            return Err(QueryError::invalid("Pelada lotada"));
        }

        let participation = sqlx::query_as::<_, Participation>(
            r#"
            INSERT INTO participations (player_id, pelada_id, confirmed, team, enrolled_at)
            VALUES (?, ?, 0, NULL, ?)
            RETURNING *
            "#,
        )
        .bind(player_id)
        .bind(pelada_id)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, ALREADY_ENROLLED))?;

        tx.commit().await?;
        info!("Player {} enrolled in pelada {}", player_id, pelada_id);
        Ok(participation)
    }

    pub async fn list(&self, pelada_id: i64) -> Result<Vec<Participant>, QueryError> {
        let query = format!("{} WHERE pa.pelada_id = ? ORDER BY pl.name COLLATE NOCASE", PARTICIPANT_SELECT);
        let participants = sqlx::query_as::<_, Participant>(&query)
            .bind(pelada_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(participants)
    }

    pub async fn set_confirmed(&self, pelada_id: i64, player_id: i64, confirmed: bool) -> Result<Participation, QueryError> {
        sqlx::query_as::<_, Participation>(
            "UPDATE participations SET confirmed = ? WHERE pelada_id = ? AND player_id = ? RETURNING *",
        )
        .bind(confirmed)
        .bind(pelada_id)
        .bind(player_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| QueryError::not_found(PARTICIPATION_NOT_FOUND))
    }

    pub async fn set_team(&self, pelada_id: i64, player_id: i64, team: Option<TeamSide>) -> Result<Participation, QueryError> {
        sqlx::query_as::<_, Participation>(
            "UPDATE participations SET team = ? WHERE pelada_id = ? AND player_id = ? RETURNING *",
        )
        .bind(team)
        .bind(pelada_id)
        .bind(player_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| QueryError::not_found(PARTICIPATION_NOT_FOUND))
    }

    pub async fn remove(&self, pelada_id: i64, player_id: i64) -> Result<(), QueryError> {
        let result = sqlx::query("DELETE FROM participations WHERE pelada_id = ? AND player_id = ?")
            .bind(pelada_id)
            .bind(player_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(QueryError::not_found(PARTICIPATION_NOT_FOUND));
        }
        info!("Player {} removed from pelada {}", player_id, pelada_id);
        Ok(())
    }

    /// Scorer candidates for a match of this pelada: the enrolled active
    /// players, or every active player when nobody enrolled.
    pub async fn roster(&self, pelada_id: i64) -> Result<Vec<RosterEntry>, QueryError> {
        let enrolled = sqlx::query_as::<_, RosterEntry>(
            r#"
            SELECT pl.id, pl.name
            FROM participations pa
            JOIN players pl ON pl.id = pa.player_id
            WHERE pa.pelada_id = ? AND pl.active = 1
            ORDER BY pl.name COLLATE NOCASE
            "#,
        )
        .bind(pelada_id)
        .fetch_all(&self.pool)
        .await?;

        if !enrolled.is_empty() {
            return Ok(enrolled);
        }

        let everyone = sqlx::query_as::<_, RosterEntry>(
            "SELECT id, name FROM players WHERE active = 1 ORDER BY name COLLATE NOCASE",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(everyone)
    }
}
