use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::game::validation::{sanitize_optional, validate_optional_text};
use crate::models::common::TeamSide;

pub const MAX_GOAL_MINUTE: i32 = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Goal {
    pub id: i64,
    #[serde(rename = "partida_id")]
    pub match_id: i64,
    #[serde(rename = "jogador_id")]
    pub player_id: i64,
    #[serde(rename = "minuto")]
    pub minute: i32,
    #[serde(rename = "time")]
    pub team: TeamSide,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "data_criacao")]
    pub created_at: DateTime<Utc>,
}

/// Goal line as listed on the match screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct GoalSummary {
    pub id: i64,
    #[serde(rename = "jogador_nome")]
    pub player_name: String,
    #[serde(rename = "time")]
    pub team: TeamSide,
    #[serde(rename = "minuto")]
    pub minute: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateGoalRequest {
    pub partida_id: i64,
    pub jogador_id: i64,
    pub minuto: i32,
    pub time: TeamSide,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateGoalRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jogador_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minuto: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<TeamSide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
}

/// Goal logged from the live match screen; the minute comes from the clock
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuickGoalRequest {
    pub jogador_id: i64,
    pub time: TeamSide,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListGoalsQuery {
    pub partida_id: Option<i64>,
    pub jogador_id: Option<i64>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

fn validate_minute(minute: i32) -> Result<(), String> {
    if !(0..=MAX_GOAL_MINUTE).contains(&minute) {
        return Err(format!("Minuto deve estar entre 0 e {}", MAX_GOAL_MINUTE));
    }
    Ok(())
}

impl CreateGoalRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_minute(self.minuto)?;
        validate_optional_text("Descrição", self.descricao.as_deref(), 200)?;
        Ok(())
    }
}

impl UpdateGoalRequest {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(minute) = self.minuto {
            validate_minute(minute)?;
        }
        validate_optional_text("Descrição", self.descricao.as_deref(), 200)?;
        Ok(())
    }

    pub fn apply_to(&self, goal: &Goal) -> Goal {
        Goal {
            player_id: self.jogador_id.unwrap_or(goal.player_id),
            minute: self.minuto.unwrap_or(goal.minute),
            team: self.time.unwrap_or(goal.team),
            description: match &self.descricao {
                Some(description) => sanitize_optional(Some(description.as_str())),
                None => goal.description.clone(),
            },
            ..goal.clone()
        }
    }
}
