use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub const DEFAULT_PAGE_SIZE: i64 = 100;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Error body returned by every endpoint: `{ "detail": "..." }`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self { detail: detail.into() }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// `skip`/`limit` pagination, limit capped at 100
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PaginationQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl PaginationQuery {
    pub fn offset(&self) -> i64 {
        page_offset(self.skip)
    }

    pub fn limit(&self) -> i64 {
        page_limit(self.limit)
    }
}

pub fn page_offset(skip: Option<i64>) -> i64 {
    skip.unwrap_or(0).max(0)
}

pub fn page_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

/// Side of the pitch a goal or player belongs to
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default, sqlx::Type)]
pub enum TeamSide {
    #[default]
    A,
    B,
}

impl Display for TeamSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
