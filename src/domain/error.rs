use thiserror::Error;

use super::kinds::ResourceKind;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid {kind} identifier `{raw}`: {reason}")]
    InvalidIdentifier {
        kind: ResourceKind,
        raw: String,
        reason: String,
    },
    #[error("{kind} record `{id}` not found")]
    NotFound { kind: ResourceKind, id: String },
}

impl DomainError {
    pub fn invalid_id(kind: ResourceKind, raw: &str, reason: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            kind,
            raw: raw.to_string(),
            reason: reason.into(),
        }
    }

    pub fn not_found(kind: ResourceKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }
}
