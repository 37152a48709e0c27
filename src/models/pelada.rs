use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::game::validation::{
    sanitize, sanitize_optional, validate_optional_text, validate_required_text,
};

pub const DEFAULT_MAX_PLAYERS: i32 = 22;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum PeladaStatus {
    #[serde(rename = "planejada")]
    #[sqlx(rename = "planejada")]
    Planned,
    #[serde(rename = "confirmada")]
    #[sqlx(rename = "confirmada")]
    Confirmed,
    #[serde(rename = "em_andamento")]
    #[sqlx(rename = "em_andamento")]
    InProgress,
    #[serde(rename = "finalizada")]
    #[sqlx(rename = "finalizada")]
    Finished,
    #[serde(rename = "cancelada")]
    #[sqlx(rename = "cancelada")]
    Cancelled,
}

/// A pelada: one day of football at one place, holding several matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Pelada {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "data_evento")]
    pub event_date: NaiveDate,
    #[serde(rename = "local")]
    pub location: String,
    #[serde(rename = "max_jogadores")]
    pub max_players: i32,
    /// Price in cents
    #[serde(rename = "valor_por_jogador")]
    pub price_per_player_cents: i64,
    pub status: PeladaStatus,
    #[serde(rename = "data_criacao")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "data_atualizacao")]
    pub updated_at: DateTime<Utc>,
}

fn default_max_players() -> i32 {
    DEFAULT_MAX_PLAYERS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePeladaRequest {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "data_evento")]
    pub event_date: NaiveDate,
    #[serde(rename = "local")]
    pub location: String,
    #[serde(rename = "max_jogadores", default = "default_max_players")]
    pub max_players: i32,
    #[serde(rename = "valor_por_jogador", default)]
    pub price_per_player_cents: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdatePeladaRequest {
    #[serde(rename = "nome", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "descricao", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "data_evento", default, skip_serializing_if = "Option::is_none")]
    pub event_date: Option<NaiveDate>,
    #[serde(rename = "local", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "max_jogadores", default, skip_serializing_if = "Option::is_none")]
    pub max_players: Option<i32>,
    #[serde(rename = "valor_por_jogador", default, skip_serializing_if = "Option::is_none")]
    pub price_per_player_cents: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PeladaStatus>,
}

fn validate_capacity(max_players: i32) -> Result<(), String> {
    if !(2..=100).contains(&max_players) {
        return Err("Máximo de jogadores deve estar entre 2 e 100".to_string());
    }
    Ok(())
}

fn validate_price(price: i64) -> Result<(), String> {
    if price < 0 {
        return Err("Valor por jogador não pode ser negativo".to_string());
    }
    Ok(())
}

impl CreatePeladaRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_required_text("Nome", &self.name, 100)?;
        validate_required_text("Local", &self.location, 200)?;
        validate_optional_text("Descrição", self.description.as_deref(), 1000)?;
        validate_capacity(self.max_players)?;
        validate_price(self.price_per_player_cents)?;
        Ok(())
    }

    pub fn sanitized(&self) -> Self {
        Self {
            name: sanitize(&self.name),
            description: sanitize_optional(self.description.as_deref()),
            event_date: self.event_date,
            location: sanitize(&self.location),
            max_players: self.max_players,
            price_per_player_cents: self.price_per_player_cents,
        }
    }
}

impl UpdatePeladaRequest {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name {
            validate_required_text("Nome", name, 100)?;
        }
        if let Some(location) = &self.location {
            validate_required_text("Local", location, 200)?;
        }
        validate_optional_text("Descrição", self.description.as_deref(), 1000)?;
        if let Some(max_players) = self.max_players {
            validate_capacity(max_players)?;
        }
        if let Some(price) = self.price_per_player_cents {
            validate_price(price)?;
        }
        Ok(())
    }

    pub fn apply_to(&self, pelada: &Pelada, now: DateTime<Utc>) -> Pelada {
        Pelada {
            id: pelada.id,
            name: self.name.as_deref().map(sanitize).unwrap_or_else(|| pelada.name.clone()),
            description: match &self.description {
                Some(description) => sanitize_optional(Some(description.as_str())),
                None => pelada.description.clone(),
            },
            event_date: self.event_date.unwrap_or(pelada.event_date),
            location: self
                .location
                .as_deref()
                .map(sanitize)
                .unwrap_or_else(|| pelada.location.clone()),
            max_players: self.max_players.unwrap_or(pelada.max_players),
            price_per_player_cents: self
                .price_per_player_cents
                .unwrap_or(pelada.price_per_player_cents),
            status: self.status.unwrap_or(pelada.status),
            created_at: pelada.created_at,
            updated_at: now,
        }
    }
}
