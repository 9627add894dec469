//! Console state and its reducer.
//!
//! All navigation and selection changes go through [`ConsoleState::reduce`],
//! which consumes the previous state and returns the next one. Load
//! completions carry the generation they were issued with; completions for an
//! older generation leave the state untouched.

use std::collections::BTreeMap;
use std::num::NonZeroU32;

use crate::domain::kinds::ResourceKind;

use super::api::ListQuery;
use super::selection::SelectionSet;

pub const DEFAULT_PER_PAGE: NonZeroU32 = NonZeroU32::new(25).unwrap();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Loaded,
    LoadError,
}

/// Per-kind load bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabState {
    pub phase: LoadPhase,
    /// Latest load generation issued for this kind.
    pub generation: u64,
    /// Identifiers of the rows currently rendered, in table order.
    pub visible: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SwitchKind(ResourceKind),
    GoToPage(NonZeroU32),
    Search(Option<String>),
    FilterCategory(Option<String>),
    Select { id: String, selected: bool },
    SelectAll { selected: bool },
    ClearSelection,
    LoadStarted { kind: ResourceKind },
    LoadSucceeded {
        kind: ResourceKind,
        generation: u64,
        page: u32,
    },
    LoadFailed { kind: ResourceKind, generation: u64 },
    /// Rows for `kind` were (re)rendered; replaces the bound row ids.
    RowsRendered { kind: ResourceKind, ids: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleState {
    kind: ResourceKind,
    page: NonZeroU32,
    per_page: NonZeroU32,
    search: Option<String>,
    category: Option<String>,
    selection: SelectionSet,
    select_all: bool,
    tabs: BTreeMap<ResourceKind, TabState>,
}

impl Default for ConsoleState {
    fn default() -> Self {
        Self::new(DEFAULT_PER_PAGE)
    }
}

impl ConsoleState {
    pub fn new(per_page: NonZeroU32) -> Self {
        Self {
            kind: ResourceKind::User,
            page: NonZeroU32::MIN,
            per_page,
            search: None,
            category: None,
            selection: SelectionSet::new(ResourceKind::User),
            select_all: false,
            tabs: ResourceKind::ALL
                .into_iter()
                .map(|kind| (kind, TabState::default()))
                .collect(),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn page(&self) -> NonZeroU32 {
        self.page
    }

    pub fn per_page(&self) -> NonZeroU32 {
        self.per_page
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn select_all(&self) -> bool {
        self.select_all
    }

    pub fn tab(&self, kind: ResourceKind) -> &TabState {
        // Every kind is inserted in `new` and never removed.
        &self.tabs[&kind]
    }

    /// Query that reloads the current table as the user last saw it.
    pub fn current_query(&self) -> ListQuery {
        self.query_for(self.kind)
    }

    /// Query for `kind`: the live page/search when it is the current kind,
    /// its first page otherwise. The category filter always applies to posts.
    pub fn query_for(&self, kind: ResourceKind) -> ListQuery {
        let mut query = ListQuery::new(kind, self.per_page);
        if kind == self.kind {
            query.page = self.page;
            query.search = self.search.clone();
        }
        if kind == ResourceKind::Post {
            query.category = self.category.clone();
        }
        query
    }

    /// Whether `generation` is the most recent load issued for `kind`.
    pub fn is_latest(&self, kind: ResourceKind, generation: u64) -> bool {
        self.tab(kind).generation == generation
    }

    #[must_use]
    pub fn reduce(mut self, action: Action) -> Self {
        match action {
            Action::SwitchKind(kind) => {
                self.kind = kind;
                self.page = NonZeroU32::MIN;
                self.search = None;
                self.selection.reset(kind);
                self.select_all = false;
            }
            Action::GoToPage(page) => {
                self.page = page;
            }
            Action::Search(term) => {
                self.search = normalize(term);
                self.page = NonZeroU32::MIN;
                self.selection.clear();
                self.select_all = false;
            }
            Action::FilterCategory(category) => {
                self.category = normalize(category);
                if self.kind == ResourceKind::Post {
                    self.page = NonZeroU32::MIN;
                }
            }
            Action::Select { id, selected } => {
                self.selection.set(&id, selected);
                if !selected {
                    self.select_all = false;
                }
            }
            Action::SelectAll { selected } => {
                let visible = self.tab(self.kind).visible.clone();
                for id in &visible {
                    self.selection.set(id, selected);
                }
                self.select_all = selected;
            }
            Action::ClearSelection => {
                self.selection.clear();
                self.select_all = false;
            }
            Action::LoadStarted { kind } => {
                let tab = self.tab_mut(kind);
                tab.generation += 1;
                tab.phase = LoadPhase::Loading;
            }
            Action::LoadSucceeded {
                kind,
                generation,
                page,
            } => {
                if !self.is_latest(kind, generation) {
                    return self;
                }
                self.tab_mut(kind).phase = LoadPhase::Loaded;
                if kind == self.kind {
                    self.page = NonZeroU32::new(page).unwrap_or(NonZeroU32::MIN);
                    self.select_all = false;
                }
            }
            Action::LoadFailed { kind, generation } => {
                if self.is_latest(kind, generation) {
                    self.tab_mut(kind).phase = LoadPhase::LoadError;
                }
            }
            Action::RowsRendered { kind, ids } => {
                self.tab_mut(kind).visible = ids;
            }
        }
        self
    }

    fn tab_mut(&mut self, kind: ResourceKind) -> &mut TabState {
        self.tabs.entry(kind).or_default()
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
