use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::db::errors::{map_unique_violation, QueryError, PLAYER_NOT_FOUND};
use crate::models::player::{CreatePlayerRequest, Player, UpdatePlayerRequest};

pub const DUPLICATE_EMAIL: &str = "Email já cadastrado";

#[derive(Debug, Clone)]
pub struct PlayerQueries {
    pool: SqlitePool,
}

impl PlayerQueries {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new active player. The email must not be taken.
    pub async fn create(&self, request: &CreatePlayerRequest) -> Result<Player, QueryError> {
        if self.email_taken(&request.email, None).await? {
            return Err(QueryError::invalid(DUPLICATE_EMAIL));
        }

        let player = sqlx::query_as::<_, Player>(
            r#"
            INSERT INTO players (name, email, phone, preferred_position, skill_level, active, registered_at)
            VALUES (?, ?, ?, ?, ?, 1, ?)
            RETURNING *
            "#,
        )
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.preferred_position)
        .bind(request.skill_level)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, DUPLICATE_EMAIL))?;

        info!("Created player {} ({})", player.id, player.email);
        Ok(player)
    }

    pub async fn list(&self, offset: i64, limit: i64, only_active: bool) -> Result<Vec<Player>, QueryError> {
        let players = if only_active {
            sqlx::query_as::<_, Player>(
                "SELECT * FROM players WHERE active = 1 ORDER BY name COLLATE NOCASE, id LIMIT ? OFFSET ?",
            )
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, Player>(
                "SELECT * FROM players ORDER BY name COLLATE NOCASE, id LIMIT ? OFFSET ?",
            )
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?
        };
        debug!("Listed {} players (only_active={})", players.len(), only_active);
        Ok(players)
    }

    pub async fn find(&self, player_id: i64) -> Result<Option<Player>, QueryError> {
        let player = sqlx::query_as::<_, Player>("SELECT * FROM players WHERE id = ?")
            .bind(player_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(player)
    }

    pub async fn get(&self, player_id: i64) -> Result<Player, QueryError> {
        self.find(player_id)
            .await?
            .ok_or_else(|| QueryError::not_found(PLAYER_NOT_FOUND))
    }

    /// Apply a partial update and return the stored row.
    pub async fn update(&self, player_id: i64, request: &UpdatePlayerRequest) -> Result<Player, QueryError> {
        let current = self.get(player_id).await?;
        let updated = request.apply_to(&current);

        if updated.email != current.email && self.email_taken(&updated.email, Some(player_id)).await? {
            return Err(QueryError::invalid(DUPLICATE_EMAIL));
        }

        let player = sqlx::query_as::<_, Player>(
            r#"
            UPDATE players
            SET name = ?, email = ?, phone = ?, preferred_position = ?, skill_level = ?, active = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&updated.name)
        .bind(&updated.email)
        .bind(&updated.phone)
        .bind(&updated.preferred_position)
        .bind(updated.skill_level)
        .bind(updated.active)
        .bind(player_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, DUPLICATE_EMAIL))?;

        info!("Updated player {}", player_id);
        Ok(player)
    }

    /// Soft delete: the row stays, `active` becomes false.
    pub async fn deactivate(&self, player_id: i64) -> Result<(), QueryError> {
        let result = sqlx::query("UPDATE players SET active = 0 WHERE id = ?")
            .bind(player_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(QueryError::not_found(PLAYER_NOT_FOUND));
        }
        info!("Deactivated player {}", player_id);
        Ok(())
    }

    async fn email_taken(&self, email: &str, except_id: Option<i64>) -> Result<bool, QueryError> {
        let existing: Option<(i64,)> = sqlx::query_as("SELECT id FROM players WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(matches!(existing, Some((id,)) if Some(id) != except_id))
    }
}
