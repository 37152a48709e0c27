use crate::game::clock::ClockError;

/// Failure of a query-layer operation, mapped to an HTTP status by handlers.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("{0}")]
    NotFound(String),

    /// The request conflicts with stored data or domain rules (HTTP 400)
    #[error("{0}")]
    Invalid(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ClockError> for QueryError {
    fn from(error: ClockError) -> Self {
        QueryError::Invalid(error.to_string())
    }
}

pub const PLAYER_NOT_FOUND: &str = "Jogador não encontrado";
pub const PELADA_NOT_FOUND: &str = "Pelada não encontrada";
pub const MATCH_NOT_FOUND: &str = "Partida não encontrada";
pub const GOAL_NOT_FOUND: &str = "Gol não encontrado";
pub const PARTICIPATION_NOT_FOUND: &str = "Participação não encontrada";

impl QueryError {
    pub fn not_found(message: &str) -> Self {
        QueryError::NotFound(message.to_string())
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        QueryError::Invalid(message.into())
    }
}

/// Unique-constraint violations surface as `Invalid` with `message`.
pub fn map_unique_violation(error: sqlx::Error, message: &str) -> QueryError {
    match &error {
        sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
            QueryError::Invalid(message.to_string())
        }
        _ => QueryError::Database(error),
    }
}
