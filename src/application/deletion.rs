//! Pending deletions and their confirmation texts.

use std::collections::BTreeMap;

use crate::domain::kinds::{ResourceKind, descriptor};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionTarget {
    Single { kind: ResourceKind, id: String },
    Bulk { kind: ResourceKind, ids: Vec<String> },
}

impl DeletionTarget {
    pub fn kind(&self) -> ResourceKind {
        match self {
            DeletionTarget::Single { kind, .. } | DeletionTarget::Bulk { kind, .. } => *kind,
        }
    }
}

/// A delete awaiting the operator's confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeletion {
    pub target: DeletionTarget,
    pub confirm_message: String,
    pub impact_message: String,
}

impl PendingDeletion {
    pub fn single(kind: ResourceKind, id: impl Into<String>) -> Self {
        let id = id.into();
        let confirm_message = match kind {
            ResourceKind::User => format!("Are you sure you want to delete user \"{id}\"?"),
            ResourceKind::Subdeaddit => {
                format!("Are you sure you want to delete subdeaddit \"{id}\"?")
            }
            ResourceKind::Post => "Are you sure you want to delete this post?".to_string(),
            ResourceKind::Comment => "Are you sure you want to delete this comment?".to_string(),
        };
        Self {
            impact_message: descriptor(kind).cascade.to_string(),
            confirm_message,
            target: DeletionTarget::Single { kind, id },
        }
    }

    pub fn bulk(kind: ResourceKind, ids: Vec<String>) -> Self {
        let noun = if ids.len() == 1 {
            kind.singular()
        } else {
            kind.collection()
        };
        let confirm_message = format!("Are you sure you want to delete {} {noun}?", ids.len());
        let descriptor = descriptor(kind);
        let impact = if ids.len() == 1 {
            descriptor.cascade
        } else {
            descriptor.cascade_plural
        };
        Self {
            impact_message: impact.to_string(),
            confirm_message,
            target: DeletionTarget::Bulk { kind, ids },
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.target.kind()
    }
}

/// Success text listing server-reported counts, e.g. `Deleted: 3 comments, 1 posts`.
pub fn deletion_summary(deleted: Option<&BTreeMap<String, u64>>) -> String {
    match deleted.filter(|counts| !counts.is_empty()) {
        Some(counts) => {
            let parts = counts
                .iter()
                .map(|(kind, count)| format!("{count} {kind}"))
                .collect::<Vec<_>>();
            format!("Deleted: {}", parts.join(", "))
        }
        None => "Deleted successfully".to_string(),
    }
}
