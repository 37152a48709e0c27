use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use crate::db::errors::{QueryError, PELADA_NOT_FOUND};
use crate::models::pelada::{CreatePeladaRequest, Pelada, PeladaStatus, UpdatePeladaRequest};

#[derive(Debug, Clone)]
pub struct PeladaQueries {
    pool: SqlitePool,
}

impl PeladaQueries {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: &CreatePeladaRequest) -> Result<Pelada, QueryError> {
        let now = Utc::now();
        let pelada = sqlx::query_as::<_, Pelada>(
            r#"
            INSERT INTO peladas
                (name, description, event_date, location, max_players, price_per_player_cents, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&request.name)
        .bind(&request.description)
        .bind(request.event_date)
        .bind(&request.location)
        .bind(request.max_players)
        .bind(request.price_per_player_cents)
        .bind(PeladaStatus::Planned)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        info!("Created pelada {} '{}' on {}", pelada.id, pelada.name, pelada.event_date);
        Ok(pelada)
    }

    /// Most recent events first
    pub async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Pelada>, QueryError> {
        let peladas = sqlx::query_as::<_, Pelada>(
            "SELECT * FROM peladas ORDER BY event_date DESC, id DESC LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(peladas)
    }

    pub async fn find(&self, pelada_id: i64) -> Result<Option<Pelada>, QueryError> {
        let pelada = sqlx::query_as::<_, Pelada>("SELECT * FROM peladas WHERE id = ?")
            .bind(pelada_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(pelada)
    }

    pub async fn get(&self, pelada_id: i64) -> Result<Pelada, QueryError> {
        self.find(pelada_id)
            .await?
            .ok_or_else(|| QueryError::not_found(PELADA_NOT_FOUND))
    }

    pub async fn update(&self, pelada_id: i64, request: &UpdatePeladaRequest) -> Result<Pelada, QueryError> {
        let current = self.get(pelada_id).await?;
        let updated = request.apply_to(&current, Utc::now());

        let enrolled: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM participations WHERE pelada_id = ?")
            .bind(pelada_id)
            .fetch_one(&self.pool)
            .await?;
        if i64::from(updated.max_players) < enrolled.0 {
            return Err(QueryError::invalid(format!(
                "Pelada já tem {} jogadores inscritos",
                enrolled.0
            )));
        }

        let pelada = sqlx::query_as::<_, Pelada>(
            r#"
            UPDATE peladas
            SET name = ?, description = ?, event_date = ?, location = ?, max_players = ?,
                price_per_player_cents = ?, status = ?, updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&updated.name)
        .bind(&updated.description)
        .bind(updated.event_date)
        .bind(&updated.location)
        .bind(updated.max_players)
        .bind(updated.price_per_player_cents)
        .bind(updated.status)
        .bind(updated.updated_at)
        .bind(pelada_id)
        .fetch_one(&self.pool)
        .await?;

        info!("Updated pelada {}", pelada_id);
        Ok(pelada)
    }

    /// Removes the pelada with its matches, goals and enrolments.
    pub async fn delete(&self, pelada_id: i64) -> Result<(), QueryError> {
        let result = sqlx::query("DELETE FROM peladas WHERE id = ?")
            .bind(pelada_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(QueryError::not_found(PELADA_NOT_FOUND));
        }
        info!("Deleted pelada {}", pelada_id);
        Ok(())
    }
}
