use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::common::TeamSide;

/// A player's enrolment in a pelada
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Participation {
    pub id: i64,
    #[serde(rename = "jogador_id")]
    pub player_id: i64,
    pub pelada_id: i64,
    #[serde(rename = "confirmado")]
    pub confirmed: bool,
    #[serde(rename = "time")]
    pub team: Option<TeamSide>,
    #[serde(rename = "data_inscricao")]
    pub enrolled_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Participant {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub participation: Participation,
    #[serde(rename = "jogador_nome")]
    pub player_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollRequest {
    pub jogador_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmPresenceRequest {
    pub confirmado: bool,
}

/// `time: null` clears the assignment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignTeamRequest {
    pub time: Option<TeamSide>,
}
