//! Mapping records to table rows.

use crate::domain::{
    kinds::{ResourceKind, descriptor},
    records::ResourceRecord,
    text::truncate,
};

use super::selection::SelectionSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub id: String,
    pub checked: bool,
    pub cells: Vec<String>,
    pub view_path: Option<String>,
}

/// Rows for `items` in the column layout of `kind`, with cells truncated to
/// their column budget and checkboxes reflecting `selection`.
pub fn build_rows(
    kind: ResourceKind,
    items: &[ResourceRecord],
    selection: &SelectionSet,
) -> Vec<TableRow> {
    let columns = descriptor(kind).columns;
    items
        .iter()
        .map(|record| {
            let id = record.id();
            let cells = columns
                .iter()
                .map(|spec| {
                    let value = record.cell(spec.column);
                    match spec.max_chars {
                        Some(max) => truncate(&value, max),
                        None => value,
                    }
                })
                .collect();
            TableRow {
                checked: selection.kind() == kind && selection.contains(&id),
                id,
                cells,
                view_path: record.view_path(),
            }
        })
        .collect()
}
