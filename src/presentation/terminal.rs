//! Plain-text render target for the command line.
//!
//! Tables and record dumps go to `out`; prompts and notifications go to
//! `err`, so `out` can be piped.

use std::io::Write;

use crate::{
    application::{
        deletion::PendingDeletion,
        notifications::Notification,
        pagination::{PageLinkLabel, PaginationView},
        rows::TableRow,
    },
    domain::{
        kinds::{IdentifierShape, ResourceKind, descriptor},
        records::ResourceRecord,
    },
};

use super::target::{RenderError, RenderTarget};

const COLUMN_GAP: &str = "  ";

pub struct TerminalRenderer<W, E> {
    out: W,
    err: E,
}

impl<W: Write, E: Write> TerminalRenderer<W, E> {
    pub fn new(out: W, err: E) -> Self {
        Self { out, err }
    }

    pub fn into_parts(self) -> (W, E) {
        (self.out, self.err)
    }
}

impl TerminalRenderer<std::io::Stdout, std::io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdout(), std::io::stderr())
    }
}

impl<W: Write, E: Write> RenderTarget for TerminalRenderer<W, E> {
    fn render_rows(&mut self, kind: ResourceKind, rows: &[TableRow]) -> Result<(), RenderError> {
        if rows.is_empty() {
            writeln!(self.out, "No {kind} found.")?;
            return Ok(());
        }

        let descriptor = descriptor(kind);
        // Name kinds already show their identifier as the first column.
        let with_id = descriptor.identifier == IdentifierShape::Numeric;
        let mut header = vec![String::new()];
        if with_id {
            header.push("ID".to_string());
        }
        header.extend(descriptor.columns.iter().map(|spec| spec.header.to_string()));
        let with_view = rows.iter().any(|row| row.view_path.is_some());
        if with_view {
            header.push("View".to_string());
        }

        let body: Vec<Vec<String>> = rows
            .iter()
            .map(|row| {
                let mut line = vec![if row.checked { "[x]" } else { "[ ]" }.to_string()];
                if with_id {
                    line.push(row.id.clone());
                }
                line.extend(row.cells.iter().map(|cell| single_line(cell)));
                if with_view {
                    line.push(row.view_path.clone().unwrap_or_default());
                }
                line
            })
            .collect();

        let mut widths = vec![0usize; header.len()];
        for line in std::iter::once(&header).chain(body.iter()) {
            for (width, cell) in widths.iter_mut().zip(line) {
                *width = (*width).max(cell.chars().count());
            }
        }

        write_line(&mut self.out, &header, &widths)?;
        for line in &body {
            write_line(&mut self.out, line, &widths)?;
        }
        Ok(())
    }

    fn render_pagination(
        &mut self,
        _kind: ResourceKind,
        pagination: Option<&PaginationView>,
        total: Option<u64>,
    ) -> Result<(), RenderError> {
        let Some(view) = pagination else {
            if let Some(total) = total {
                writeln!(self.out, "{total} total")?;
            }
            return Ok(());
        };

        let links: Vec<String> = view
            .links
            .iter()
            .map(|link| match link.label {
                PageLinkLabel::Previous => "< Previous".to_string(),
                PageLinkLabel::Next => "Next >".to_string(),
                PageLinkLabel::Number if link.active => format!("[{}]", link.page),
                PageLinkLabel::Number => link.page.to_string(),
            })
            .collect();
        write!(
            self.out,
            "{}  (page {} of {}",
            links.join(" "),
            view.current_page,
            view.total_pages
        )?;
        match total {
            Some(total) => writeln!(self.out, ", {total} total)")?,
            None => writeln!(self.out, ")")?,
        }
        Ok(())
    }

    // Checkbox state is already reflected in the next table render.
    fn set_row_checked(
        &mut self,
        _kind: ResourceKind,
        _id: &str,
        _checked: bool,
    ) -> Result<(), RenderError> {
        Ok(())
    }

    fn set_select_all(&mut self, _kind: ResourceKind, _checked: bool) -> Result<(), RenderError> {
        Ok(())
    }

    fn clear_search(&mut self, _kind: ResourceKind) -> Result<(), RenderError> {
        Ok(())
    }

    fn set_category_options(&mut self, names: &[String]) -> Result<(), RenderError> {
        for name in names {
            writeln!(self.out, "{name}")?;
        }
        Ok(())
    }

    fn show_edit_form(&mut self, record: &ResourceRecord) -> Result<(), RenderError> {
        let json = serde_json::to_string_pretty(record)?;
        writeln!(self.out, "{json}")?;
        writeln!(
            self.err,
            "editable fields: {}",
            descriptor(record.kind()).patch_fields.join(", ")
        )?;
        Ok(())
    }

    fn close_edit_form(&mut self, _kind: ResourceKind) -> Result<(), RenderError> {
        Ok(())
    }

    fn show_delete_confirmation(&mut self, pending: &PendingDeletion) -> Result<(), RenderError> {
        writeln!(self.err, "{}", pending.confirm_message)?;
        writeln!(self.err, "{}", pending.impact_message)?;
        self.err.flush()?;
        Ok(())
    }

    fn close_delete_confirmation(&mut self) -> Result<(), RenderError> {
        Ok(())
    }

    fn notify(&mut self, notification: &Notification) -> Result<(), RenderError> {
        writeln!(
            self.err,
            "[{}] {}",
            notification.level.as_str(),
            notification.text
        )?;
        Ok(())
    }
}

fn single_line(cell: &str) -> String {
    cell.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn write_line<W: Write>(out: &mut W, cells: &[String], widths: &[usize]) -> std::io::Result<()> {
    let mut line = String::new();
    for (index, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if index > 0 {
            line.push_str(COLUMN_GAP);
        }
        line.push_str(cell);
        let pad = width.saturating_sub(cell.chars().count());
        line.extend(std::iter::repeat_n(' ', pad));
    }
    writeln!(out, "{}", line.trim_end())
}
