//! Domain-level error type used across services and adapters.
//!
//! This error type is HTTP- and transport-agnostic. HTTP handlers return
//! `Result<T, crate::error::AppError>` and convert from `DomainError` with
//! the provided `From` impl; the websocket session surfaces it as a targeted
//! `error` message instead.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Domain-level not found entities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Room,
    Player,
}

/// Input validation failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    EmptyIdentity,
    InvalidVote,
    InvalidRoomName,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input/user validation or business rule violation
    Validation(ValidationKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }

    pub fn room_not_found(name: &str) -> Self {
        Self::not_found(NotFoundKind::Room, format!("Room '{name}' does not exist"))
    }

    pub fn player_not_found(name: &str) -> Self {
        Self::not_found(
            NotFoundKind::Player,
            format!("Player '{name}' is not registered in this room"),
        )
    }

    pub fn invalid_vote(detail: impl Into<String>) -> Self {
        Self::validation(ValidationKind::InvalidVote, detail)
    }
}
