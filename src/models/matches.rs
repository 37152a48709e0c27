use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::game::clock::{ClockAction, ClockError, ClockSnapshot, MatchClock};
use crate::game::validation::{
    sanitize, sanitize_optional, validate_optional_text, validate_required_text,
};
use crate::models::goal::GoalSummary;
use crate::models::player::RosterEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum MatchStatus {
    #[serde(rename = "agendada")]
    #[sqlx(rename = "agendada")]
    Scheduled,
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

/// One game inside a pelada
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Match {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: Option<String>,
    pub pelada_id: i64,
    #[serde(rename = "horario_previsto")]
    pub scheduled_at: DateTime<Utc>,
    #[serde(rename = "horario_inicio")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(rename = "horario_fim")]
    pub ended_at: Option<DateTime<Utc>>,
    #[serde(rename = "nome_time_a")]
    pub team_a_name: String,
    #[serde(rename = "nome_time_b")]
    pub team_b_name: String,
    #[serde(rename = "gols_time_a")]
    pub team_a_goals: i32,
    #[serde(rename = "gols_time_b")]
    pub team_b_goals: i32,
    #[serde(rename = "observacoes")]
    pub notes: Option<String>,
    pub status: MatchStatus,
    #[serde(rename = "data_criacao")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "data_atualizacao")]
    pub updated_at: DateTime<Utc>,
}

impl Match {
    /// A cancelled match that was paused shows as stopped.
    pub fn clock(&self) -> MatchClock {
        let closed = matches!(self.status, MatchStatus::Finished | MatchStatus::Cancelled);
        MatchClock::new(self.started_at, self.ended_at, closed)
    }

    /// Clock and goal endpoints only act on a match that is still open.
    pub fn ensure_open(&self) -> Result<(), ClockError> {
        match self.status {
            MatchStatus::Finished => Err(ClockError::MatchFinished),
            MatchStatus::Cancelled => Err(ClockError::MatchCancelled),
            MatchStatus::Scheduled | MatchStatus::InProgress => Ok(()),
        }
    }

    /// "2 x 1"
    pub fn scoreline(&self) -> String {
        format!("{} x {}", self.team_a_goals, self.team_b_goals)
    }

    /// Played minutes once both timestamps are known
    pub fn duration_minutes(&self) -> i64 {
        match (self.started_at, self.ended_at) {
            (Some(start), Some(end)) => (end - start).num_minutes().max(0),
            _ => 0,
        }
    }
}

fn default_team_a() -> String {
    "Time A".to_string()
}

fn default_team_b() -> String {
    "Time B".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMatchRequest {
    pub pelada_id: i64,
    #[serde(rename = "nome", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "horario_previsto")]
    pub scheduled_at: DateTime<Utc>,
    #[serde(rename = "nome_time_a", default = "default_team_a")]
    pub team_a_name: String,
    #[serde(rename = "nome_time_b", default = "default_team_b")]
    pub team_b_name: String,
    #[serde(rename = "observacoes", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Partial update of the descriptive fields. Clock timestamps and the score
/// only change through the clock and goal endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateMatchRequest {
    #[serde(rename = "nome", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "horario_previsto", default, skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(rename = "nome_time_a", default, skip_serializing_if = "Option::is_none")]
    pub team_a_name: Option<String>,
    #[serde(rename = "nome_time_b", default, skip_serializing_if = "Option::is_none")]
    pub team_b_name: Option<String>,
    #[serde(rename = "observacoes", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<MatchStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListMatchesQuery {
    pub pelada_id: Option<i64>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClockRequest {
    pub acao: ClockAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockResponse {
    pub partida: Match,
    pub cronometro: ClockSnapshot,
}

/// Body of `iniciar` / `finalizar`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchLifecycleResponse {
    pub message: String,
    pub partida: Match,
}

impl MatchLifecycleResponse {
    pub fn new(message: impl Into<String>, partida: Match) -> Self {
        Self { message: message.into(), partida }
    }
}

/// Everything the match screen needs in one response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDetail {
    pub partida: Match,
    pub gols: Vec<GoalSummary>,
    pub jogadores: Vec<RosterEntry>,
    pub cronometro: ClockSnapshot,
    /// Server time the bundle was produced at
    pub gerado_em: DateTime<Utc>,
}

fn validate_team_name(field: &str, name: &str) -> Result<(), String> {
    validate_required_text(field, name, 50)
}

impl CreateMatchRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_optional_text("Nome", self.name.as_deref(), 100)?;
        validate_team_name("Nome do time A", &self.team_a_name)?;
        validate_team_name("Nome do time B", &self.team_b_name)?;
        validate_optional_text("Observações", self.notes.as_deref(), 1000)?;
        Ok(())
    }

    pub fn sanitized(&self) -> Self {
        Self {
            pelada_id: self.pelada_id,
            name: sanitize_optional(self.name.as_deref()),
            scheduled_at: self.scheduled_at,
            team_a_name: sanitize(&self.team_a_name),
            team_b_name: sanitize(&self.team_b_name),
            notes: sanitize_optional(self.notes.as_deref()),
        }
    }
}

impl UpdateMatchRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_optional_text("Nome", self.name.as_deref(), 100)?;
        if let Some(name) = &self.team_a_name {
            validate_team_name("Nome do time A", name)?;
        }
        if let Some(name) = &self.team_b_name {
            validate_team_name("Nome do time B", name)?;
        }
        validate_optional_text("Observações", self.notes.as_deref(), 1000)?;
        match self.status {
            Some(MatchStatus::InProgress) | Some(MatchStatus::Finished) => Err(
                "Use os endpoints de cronômetro para iniciar ou finalizar a partida".to_string(),
            ),
            _ => Ok(()),
        }
    }

    /// Status changes allowed from the stored match. `agendada` only while
    /// the clock was never started, `cancelada` not while it runs, and a
    /// finished match keeps its status.
    pub fn check_status_change(&self, current: &Match) -> Result<(), String> {
        let status = match self.status {
            Some(status) if status != current.status => status,
            _ => return Ok(()),
        };
        if current.status == MatchStatus::Finished {
            return Err(ClockError::MatchFinished.to_string());
        }
        match status {
            MatchStatus::Scheduled if current.started_at.is_some() => Err(
                "Partida já foi iniciada; use o reset do cronômetro".to_string(),
            ),
            MatchStatus::Cancelled if current.clock().is_running() => Err(
                "Pause o cronômetro antes de cancelar a partida".to_string(),
            ),
            _ => Ok(()),
        }
    }

    pub fn apply_to(&self, current: &Match, now: DateTime<Utc>) -> Match {
        Match {
            name: match &self.name {
                Some(name) => sanitize_optional(Some(name.as_str())),
                None => current.name.clone(),
            },
            scheduled_at: self.scheduled_at.unwrap_or(current.scheduled_at),
            team_a_name: self
                .team_a_name
                .as_deref()
                .map(sanitize)
                .unwrap_or_else(|| current.team_a_name.clone()),
            team_b_name: self
                .team_b_name
                .as_deref()
                .map(sanitize)
                .unwrap_or_else(|| current.team_b_name.clone()),
            notes: match &self.notes {
                Some(notes) => sanitize_optional(Some(notes.as_str())),
                None => current.notes.clone(),
            },
            status: self.status.unwrap_or(current.status),
            updated_at: now,
            ..current.clone()
        }
    }
}
