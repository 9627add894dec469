//! Selected row identifiers for bulk operations.

use std::collections::BTreeSet;

use crate::domain::kinds::ResourceKind;

/// Identifiers selected within one resource kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSet {
    kind: ResourceKind,
    ids: BTreeSet<String>,
}

impl SelectionSet {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            ids: BTreeSet::new(),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn set(&mut self, id: &str, selected: bool) {
        if selected {
            self.ids.insert(id.to_string());
        } else {
            self.ids.remove(id);
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drop every id and rescope to `kind`.
    pub fn reset(&mut self, kind: ResourceKind) {
        self.kind = kind;
        self.ids.clear();
    }

    pub fn ids(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }
}
