use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::game::validation::{
    sanitize, sanitize_optional, validate_email, validate_optional_text,
    validate_required_text, validate_skill_level, DEFAULT_SKILL_LEVEL,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Player {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefone")]
    pub phone: Option<String>,
    #[serde(rename = "posicao_preferida")]
    pub preferred_position: Option<String>,
    #[serde(rename = "nivel_habilidade")]
    pub skill_level: i32,
    #[serde(rename = "ativo")]
    pub active: bool,
    #[serde(rename = "data_cadastro")]
    pub registered_at: DateTime<Utc>,
}

/// Roster entry used to pick a goal scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RosterEntry {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
}

fn default_skill_level() -> i32 {
    DEFAULT_SKILL_LEVEL
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePlayerRequest {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefone", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "posicao_preferida", default, skip_serializing_if = "Option::is_none")]
    pub preferred_position: Option<String>,
    #[serde(rename = "nivel_habilidade", default = "default_skill_level")]
    pub skill_level: i32,
}

/// Partial update; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdatePlayerRequest {
    #[serde(rename = "nome", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "telefone", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "posicao_preferida", default, skip_serializing_if = "Option::is_none")]
    pub preferred_position: Option<String>,
    #[serde(rename = "nivel_habilidade", default, skip_serializing_if = "Option::is_none")]
    pub skill_level: Option<i32>,
    #[serde(rename = "ativo", default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListPlayersQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    /// Only active players unless explicitly `false`
    pub ativo: Option<bool>,
}

impl CreatePlayerRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_required_text("Nome", &self.name, 100)?;
        validate_email(&self.email)?;
        validate_optional_text("Telefone", self.phone.as_deref(), 20)?;
        validate_optional_text("Posição preferida", self.preferred_position.as_deref(), 50)?;
        validate_skill_level(self.skill_level)?;
        Ok(())
    }

    pub fn sanitized(&self) -> Self {
        Self {
            name: sanitize(&self.name),
            email: self.email.trim().to_lowercase(),
            phone: sanitize_optional(self.phone.as_deref()),
            preferred_position: sanitize_optional(self.preferred_position.as_deref()),
            skill_level: self.skill_level,
        }
    }
}

impl UpdatePlayerRequest {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name {
            validate_required_text("Nome", name, 100)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        validate_optional_text("Telefone", self.phone.as_deref(), 20)?;
        validate_optional_text("Posição preferida", self.preferred_position.as_deref(), 50)?;
        if let Some(level) = self.skill_level {
            validate_skill_level(level)?;
        }
        Ok(())
    }

    /// Merge onto the stored player, producing the row to persist.
    pub fn apply_to(&self, player: &Player) -> Player {
        Player {
            id: player.id,
            name: self.name.as_deref().map(sanitize).unwrap_or_else(|| player.name.clone()),
            email: self
                .email
                .as_deref()
                .map(|e| e.trim().to_lowercase())
                .unwrap_or_else(|| player.email.clone()),
            phone: match &self.phone {
                Some(phone) => sanitize_optional(Some(phone.as_str())),
                None => player.phone.clone(),
            },
            preferred_position: match &self.preferred_position {
                Some(position) => sanitize_optional(Some(position.as_str())),
                None => player.preferred_position.clone(),
            },
            skill_level: self.skill_level.unwrap_or(player.skill_level),
            active: self.active.unwrap_or(player.active),
            registered_at: player.registered_at,
        }
    }
}
