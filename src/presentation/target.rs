//! Render-target capability consumed by the controller.

use thiserror::Error;

use crate::{
    application::{
        deletion::PendingDeletion, notifications::Notification, pagination::PaginationView,
        rows::TableRow,
    },
    domain::{kinds::ResourceKind, records::ResourceRecord},
};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Everything the console can show. Implementations must replace rather
/// than append on repeated `render_rows` calls for the same kind.
pub trait RenderTarget {
    fn render_rows(&mut self, kind: ResourceKind, rows: &[TableRow]) -> Result<(), RenderError>;

    /// `None` clears the pagination area.
    fn render_pagination(
        &mut self,
        kind: ResourceKind,
        pagination: Option<&PaginationView>,
        total: Option<u64>,
    ) -> Result<(), RenderError>;

    fn set_row_checked(
        &mut self,
        kind: ResourceKind,
        id: &str,
        checked: bool,
    ) -> Result<(), RenderError>;

    fn set_select_all(&mut self, kind: ResourceKind, checked: bool) -> Result<(), RenderError>;

    fn clear_search(&mut self, kind: ResourceKind) -> Result<(), RenderError>;

    fn set_category_options(&mut self, names: &[String]) -> Result<(), RenderError>;

    fn show_edit_form(&mut self, record: &ResourceRecord) -> Result<(), RenderError>;

    fn close_edit_form(&mut self, kind: ResourceKind) -> Result<(), RenderError>;

    fn show_delete_confirmation(&mut self, pending: &PendingDeletion) -> Result<(), RenderError>;

    fn close_delete_confirmation(&mut self) -> Result<(), RenderError>;

    fn notify(&mut self, notification: &Notification) -> Result<(), RenderError>;
}
