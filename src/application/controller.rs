//! Resource list controller: one generic workflow for every resource kind.
//!
//! The controller owns the [`ConsoleState`], talks to the backend through an
//! [`AdminApi`] and draws through a [`RenderTarget`]. Nothing is mutated
//! locally before the server confirms it; failures surface as notifications
//! and leave the state as it was.

use std::collections::BTreeMap;
use std::num::NonZeroU32;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::{
    domain::{
        error::DomainError,
        kinds::{IdentifierShape, ResourceKind, descriptor},
        records::{RecordPatch, ResourceRecord},
    },
    presentation::target::RenderTarget,
};

use super::{
    api::{AdminApi, ApiError, ListQuery, ListResult},
    deletion::{DeletionTarget, PendingDeletion, deletion_summary},
    error::ConsoleError,
    notifications::{DEFAULT_NOTIFICATION_TTL, Notification},
    pagination::PaginationView,
    rows::build_rows,
    state::{Action, ConsoleState, DEFAULT_PER_PAGE},
};

pub const DEFAULT_LOOKUP_PER_PAGE: NonZeroU32 = NonZeroU32::new(1000).unwrap();

#[derive(Debug, Clone, Copy)]
pub struct ControllerOptions {
    pub per_page: NonZeroU32,
    /// Page size for record lookups and the category filter options.
    pub lookup_per_page: NonZeroU32,
    pub notification_ttl: Duration,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            lookup_per_page: DEFAULT_LOOKUP_PER_PAGE,
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
        }
    }
}

/// Stamp of one issued list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub kind: ResourceKind,
    pub generation: u64,
    pub query: ListQuery,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Rendered(ListResult),
    /// A newer load for the same kind was issued after this one.
    Discarded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted {
        deleted: Option<BTreeMap<String, u64>>,
    },
    NothingPending,
}

pub struct ResourceListController<A, R> {
    api: A,
    target: R,
    state: ConsoleState,
    pending: Option<PendingDeletion>,
    editing: Option<(ResourceKind, String)>,
    lookup_per_page: NonZeroU32,
    notification_ttl: Duration,
}

impl<A, R> ResourceListController<A, R>
where
    A: AdminApi,
    R: RenderTarget,
{
    pub fn new(api: A, target: R, options: ControllerOptions) -> Self {
        Self {
            api,
            target,
            state: ConsoleState::new(options.per_page),
            pending: None,
            editing: None,
            lookup_per_page: options.lookup_per_page,
            notification_ttl: options.notification_ttl,
        }
    }

    pub fn state(&self) -> &ConsoleState {
        &self.state
    }

    pub fn target(&self) -> &R {
        &self.target
    }

    pub fn into_target(self) -> R {
        self.target
    }

    pub fn pending_deletion(&self) -> Option<&PendingDeletion> {
        self.pending.as_ref()
    }

    pub fn editing(&self) -> Option<(ResourceKind, &str)> {
        self.editing.as_ref().map(|(kind, id)| (*kind, id.as_str()))
    }

    /// Populate the category filter and show the users table.
    /// The two loads are independent: a failed users load still leaves the
    /// filter populated.
    pub async fn init(&mut self) -> Result<(), ConsoleError> {
        let loaded = self.reload().await;
        if self.load_category_options().await.is_err() {
            debug!("category filter left empty");
        }
        loaded.map(|_| ())
    }

    // ---- loading -------------------------------------------------------

    /// Issue a load for `query`, superseding any earlier load of that kind.
    pub fn begin_load(&mut self, query: ListQuery) -> LoadTicket {
        let kind = query.kind;
        self.dispatch(Action::LoadStarted { kind });
        LoadTicket {
            kind,
            generation: self.state.tab(kind).generation,
            query,
        }
    }

    /// Apply the response to `ticket`. Superseded responses are dropped
    /// without touching the table.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        response: Result<ListResult, ApiError>,
    ) -> Result<LoadOutcome, ConsoleError> {
        if !self.state.is_latest(ticket.kind, ticket.generation) {
            debug!(
                kind = %ticket.kind,
                generation = ticket.generation,
                "discarding superseded list response"
            );
            return Ok(LoadOutcome::Discarded);
        }

        let result = match response {
            Ok(result) if result.kind == ticket.kind => result,
            Ok(result) => {
                let err = ConsoleError::KindMismatch {
                    expected: ticket.kind,
                    found: result.kind,
                };
                return self.fail_load(&ticket, err);
            }
            Err(err) => return self.fail_load(&ticket, err.into()),
        };

        self.dispatch(Action::LoadSucceeded {
            kind: ticket.kind,
            generation: ticket.generation,
            page: result.current_page,
        });
        self.render_rows(ticket.kind, &result.items)?;
        self.render_pagination(ticket.kind, &result)?;
        debug!(
            kind = %ticket.kind,
            page = result.current_page,
            pages = result.total_pages,
            rows = result.items.len(),
            "list rendered"
        );
        Ok(LoadOutcome::Rendered(result))
    }

    fn fail_load(
        &mut self,
        ticket: &LoadTicket,
        err: ConsoleError,
    ) -> Result<LoadOutcome, ConsoleError> {
        warn!(kind = %ticket.kind, error = %err, "failed to load list");
        self.dispatch(Action::LoadFailed {
            kind: ticket.kind,
            generation: ticket.generation,
        });
        self.notify(Notification::error("Error loading content"))?;
        Err(err)
    }

    pub async fn load_page(&mut self, query: ListQuery) -> Result<LoadOutcome, ConsoleError> {
        let ticket = self.begin_load(query);
        let response = self.api.list(&ticket.query).await;
        self.complete_load(ticket, response)
    }

    /// Reload the current table with its page, search and filter.
    pub async fn reload(&mut self) -> Result<LoadOutcome, ConsoleError> {
        let query = self.state.current_query();
        self.load_page(query).await
    }

    async fn reload_after_mutation(&mut self, kind: ResourceKind) -> Result<(), ConsoleError> {
        let query = self.state.query_for(kind);
        match self.load_page(query).await {
            Ok(_) | Err(ConsoleError::Api(_) | ConsoleError::KindMismatch { .. }) => Ok(()),
            Err(err) => Err(err),
        }
    }

    // ---- rendering -----------------------------------------------------

    /// Replace the rows of `kind` and rebind the selectable ids.
    pub fn render_rows(
        &mut self,
        kind: ResourceKind,
        items: &[ResourceRecord],
    ) -> Result<(), ConsoleError> {
        let rows = build_rows(kind, items, self.state.selection());
        self.target.render_rows(kind, &rows)?;
        self.dispatch(Action::RowsRendered {
            kind,
            ids: rows.into_iter().map(|row| row.id).collect(),
        });
        if kind == self.state.kind() {
            self.target.set_select_all(kind, self.state.select_all())?;
        }
        Ok(())
    }

    pub fn render_pagination(
        &mut self,
        kind: ResourceKind,
        result: &ListResult,
    ) -> Result<(), ConsoleError> {
        let view = PaginationView::build(result.current_page, result.total_pages);
        self.target
            .render_pagination(kind, view.as_ref(), result.total)?;
        Ok(())
    }

    // ---- navigation ----------------------------------------------------

    pub async fn switch_kind(&mut self, kind: ResourceKind) -> Result<LoadOutcome, ConsoleError> {
        self.drop_pending()?;
        self.dispatch(Action::SwitchKind(kind));
        self.target.clear_search(kind)?;
        self.target.set_select_all(kind, false)?;
        self.reload().await
    }

    /// Make `kind` current without loading it.
    pub fn focus(&mut self, kind: ResourceKind) -> Result<(), ConsoleError> {
        if self.state.kind() != kind {
            self.drop_pending()?;
            self.dispatch(Action::SwitchKind(kind));
        }
        Ok(())
    }

    /// Jump straight to `query` with a single load: its kind, search, filter
    /// and page replace the current ones.
    pub async fn open(&mut self, query: ListQuery) -> Result<LoadOutcome, ConsoleError> {
        let ListQuery {
            kind,
            page,
            search,
            category,
            ..
        } = query;
        if self.state.kind() != kind {
            self.drop_pending()?;
        }
        self.dispatch(Action::SwitchKind(kind));
        self.dispatch(Action::Search(search));
        if kind == ResourceKind::Post {
            self.dispatch(Action::FilterCategory(category));
        }
        self.dispatch(Action::GoToPage(page));
        self.reload().await
    }

    pub async fn go_to_page(&mut self, page: u32) -> Result<LoadOutcome, ConsoleError> {
        let page = NonZeroU32::new(page).unwrap_or(NonZeroU32::MIN);
        self.dispatch(Action::GoToPage(page));
        self.reload().await
    }

    pub async fn set_search(
        &mut self,
        term: Option<String>,
    ) -> Result<LoadOutcome, ConsoleError> {
        self.dispatch(Action::Search(term));
        let kind = self.state.kind();
        self.target.set_select_all(kind, false)?;
        self.reload().await
    }

    /// Filter posts by subdeaddit name; `None` shows every subdeaddit.
    pub async fn set_category_filter(
        &mut self,
        category: Option<String>,
    ) -> Result<LoadOutcome, ConsoleError> {
        self.dispatch(Action::FilterCategory(category));
        let query = self.state.query_for(ResourceKind::Post);
        self.load_page(query).await
    }

    /// Fill the posts category filter with every subdeaddit name. Failures
    /// are logged only.
    pub async fn load_category_options(&mut self) -> Result<Vec<String>, ConsoleError> {
        let query = ListQuery::new(ResourceKind::Subdeaddit, self.lookup_per_page);
        match self.api.list(&query).await {
            Ok(result) => {
                let names = result.ids();
                self.target.set_category_options(&names)?;
                Ok(names)
            }
            Err(err) => {
                warn!(error = %err, "failed to load subdeaddit filter options");
                Err(err.into())
            }
        }
    }

    // ---- selection -----------------------------------------------------

    pub fn select(
        &mut self,
        kind: ResourceKind,
        id: &str,
        selected: bool,
    ) -> Result<(), ConsoleError> {
        self.ensure_current(kind)?;
        let id = descriptor(kind).parse_id(id)?;
        self.dispatch(Action::Select {
            id: id.clone(),
            selected,
        });
        self.target.set_row_checked(kind, &id, selected)?;
        if !selected {
            self.target.set_select_all(kind, false)?;
        }
        Ok(())
    }

    pub fn select_all(&mut self, kind: ResourceKind, selected: bool) -> Result<(), ConsoleError> {
        self.ensure_current(kind)?;
        self.dispatch(Action::SelectAll { selected });
        let visible = self.state.tab(kind).visible.clone();
        for id in &visible {
            self.target.set_row_checked(kind, id, selected)?;
        }
        self.target.set_select_all(kind, selected)?;
        Ok(())
    }

    fn ensure_current(&self, kind: ResourceKind) -> Result<(), ConsoleError> {
        let current = self.state.kind();
        if kind == current {
            Ok(())
        } else {
            Err(ConsoleError::KindMismatch {
                expected: current,
                found: kind,
            })
        }
    }

    // ---- editing -------------------------------------------------------

    /// Locate one record by exact identifier and open the edit form for it.
    pub async fn fetch_record_for_edit(
        &mut self,
        kind: ResourceKind,
        id: &str,
    ) -> Result<ResourceRecord, ConsoleError> {
        let descriptor = descriptor(kind);
        let id = descriptor.parse_id(id)?;

        let mut query = ListQuery::new(kind, self.lookup_per_page);
        if descriptor.identifier == IdentifierShape::Name {
            query.search = Some(id.clone());
        }

        let found = loop {
            let result = match self.api.list(&query).await {
                Ok(result) => result,
                Err(err) => {
                    warn!(%kind, %id, error = %err, "failed to load record for edit");
                    self.notify(Notification::error(format!(
                        "Error loading {} data",
                        kind.singular()
                    )))?;
                    return Err(err.into());
                }
            };
            let last_page = query.page.get() >= result.total_pages;
            if let Some(record) = result.items.into_iter().find(|record| record.id() == id) {
                break Some(record);
            }
            if last_page {
                break None;
            }
            query.page = query.page.saturating_add(1);
        };

        let Some(record) = found else {
            warn!(%kind, %id, "record not found for edit");
            self.notify(Notification::error(format!(
                "{} \"{id}\" not found",
                descriptor.label
            )))?;
            return Err(DomainError::not_found(kind, id).into());
        };

        self.target.show_edit_form(&record)?;
        self.editing = Some((kind, id));
        Ok(record)
    }

    /// Send `patch` for one record. On success the edit form closes and the
    /// table reloads; on rejection the form stays open.
    pub async fn save_record(
        &mut self,
        kind: ResourceKind,
        id: &str,
        patch: &RecordPatch,
    ) -> Result<(), ConsoleError> {
        if patch.kind() != kind {
            return Err(ConsoleError::KindMismatch {
                expected: kind,
                found: patch.kind(),
            });
        }
        let descriptor = descriptor(kind);
        let id = descriptor.parse_id(id)?;

        let response = match self.api.update(kind, &id, patch).await {
            Ok(response) => response,
            Err(err) => {
                warn!(%kind, %id, error = %err, "failed to save record");
                self.notify(Notification::error(format!(
                    "Error saving {}",
                    kind.singular()
                )))?;
                return Err(err.into());
            }
        };

        if !response.success {
            let err = ConsoleError::rejected(kind, response.error);
            warn!(%kind, %id, error = %err, "record update rejected");
            let message = match &err {
                ConsoleError::Rejected { message, .. } => message.clone(),
                other => other.to_string(),
            };
            self.notify(Notification::error(format!(
                "Error updating {}: {message}",
                kind.singular()
            )))?;
            return Err(err);
        }

        info!(%kind, %id, "record updated");
        if self
            .editing
            .as_ref()
            .is_some_and(|(editing_kind, editing_id)| *editing_kind == kind && *editing_id == id)
        {
            self.editing = None;
        }
        self.target.close_edit_form(kind)?;
        self.reload_after_mutation(kind).await?;
        self.notify(Notification::success(format!(
            "{} updated successfully",
            descriptor.label
        )))?;
        Ok(())
    }

    // ---- deletion ------------------------------------------------------

    pub fn request_delete(
        &mut self,
        kind: ResourceKind,
        id: &str,
    ) -> Result<PendingDeletion, ConsoleError> {
        let id = descriptor(kind).parse_id(id)?;
        let pending = PendingDeletion::single(kind, id);
        self.target.show_delete_confirmation(&pending)?;
        self.pending = Some(pending.clone());
        Ok(pending)
    }

    /// Stage deletion of every selected row. An empty selection only warns.
    pub fn request_bulk_delete(
        &mut self,
        kind: ResourceKind,
    ) -> Result<Option<PendingDeletion>, ConsoleError> {
        self.ensure_current(kind)?;
        if self.state.selection().is_empty() {
            self.notify(Notification::warning("No items selected"))?;
            return Ok(None);
        }
        let pending = PendingDeletion::bulk(kind, self.state.selection().ids());
        self.target.show_delete_confirmation(&pending)?;
        self.pending = Some(pending.clone());
        Ok(Some(pending))
    }

    pub fn cancel_delete(&mut self) -> Result<(), ConsoleError> {
        self.drop_pending()
    }

    /// Execute the staged deletion. Without one this is a no-op. A rejected
    /// or failed request keeps the deletion staged so it can be retried.
    pub async fn confirm_delete(&mut self) -> Result<DeleteOutcome, ConsoleError> {
        let Some(pending) = self.pending.clone() else {
            debug!("confirm_delete called without a pending deletion");
            return Ok(DeleteOutcome::NothingPending);
        };

        let kind = pending.kind();
        let response = match &pending.target {
            DeletionTarget::Single { id, .. } => self.api.delete(kind, id).await,
            DeletionTarget::Bulk { ids, .. } => self.api.bulk_delete(kind, ids).await,
        };

        let response = match response {
            Ok(response) => response,
            Err(err) => {
                warn!(%kind, error = %err, "delete request failed");
                self.notify(Notification::error("Error deleting content"))?;
                return Err(err.into());
            }
        };

        if !response.success {
            let err = ConsoleError::rejected(kind, response.error);
            warn!(%kind, error = %err, "delete rejected");
            let message = match &err {
                ConsoleError::Rejected { message, .. } => message.clone(),
                other => other.to_string(),
            };
            self.notify(Notification::error(format!("Error deleting: {message}")))?;
            return Err(err);
        }

        info!(%kind, deleted = ?response.deleted, "delete confirmed");
        self.pending = None;
        self.target.close_delete_confirmation()?;
        self.dispatch(Action::ClearSelection);
        self.target.set_select_all(self.state.kind(), false)?;
        self.reload_after_mutation(self.state.kind()).await?;
        self.notify(Notification::success(deletion_summary(
            response.deleted.as_ref(),
        )))?;
        Ok(DeleteOutcome::Deleted {
            deleted: response.deleted,
        })
    }

    // ---- plumbing ------------------------------------------------------

    // A staged deletion belongs to the tab it was requested on.
    fn drop_pending(&mut self) -> Result<(), ConsoleError> {
        if let Some(pending) = self.pending.take() {
            debug!(kind = %pending.kind(), "dropping staged deletion");
            self.target.close_delete_confirmation()?;
        }
        Ok(())
    }

    fn dispatch(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        self.state = state.reduce(action);
    }

    fn notify(&mut self, notification: Notification) -> Result<(), ConsoleError> {
        let notification = notification.with_ttl(self.notification_ttl);
        self.target.notify(&notification)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
