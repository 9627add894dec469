use thiserror::Error;

use crate::{
    config::LoadError,
    domain::{error::DomainError, kinds::ResourceKind},
    infra::error::InfraError,
    presentation::target::RenderError,
};

use super::api::ApiError;

/// Failures of a console operation.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("server rejected {kind} request: {message}")]
    Rejected {
        kind: ResourceKind,
        message: String,
    },
    #[error("expected a {expected} record but got {found}")]
    KindMismatch {
        expected: ResourceKind,
        found: ResourceKind,
    },
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl ConsoleError {
    pub fn rejected(kind: ResourceKind, message: Option<String>) -> Self {
        Self::Rejected {
            kind,
            message: message.unwrap_or_else(|| "unknown error".to_string()),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ConsoleError::Domain(DomainError::NotFound { .. }))
    }
}

/// Top-level error of the `deaddit-admin` binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] LoadError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    Console(#[from] ConsoleError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
