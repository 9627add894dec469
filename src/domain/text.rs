//! Display helpers for table cells.

use time::{
    Date, OffsetDateTime, PrimitiveDateTime, format_description::well_known::Rfc2822,
    format_description::well_known::Rfc3339, macros::format_description,
};

pub const ELLIPSIS: &str = "...";

/// Cut `text` to at most `max_chars` characters, appending [`ELLIPSIS`] when
/// anything was removed. Counts characters, not bytes.
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}{ELLIPSIS}", &text[..byte_index]),
        None => text.to_string(),
    }
}

/// Render a backend timestamp as a calendar date (`YYYY-MM-DD`).
///
/// Accepts RFC 3339, RFC 2822 and naive ISO timestamps; anything else is
/// shown unchanged.
pub fn display_date(raw: &str) -> String {
    let raw = raw.trim();
    parse_date(raw)
        .and_then(|date| date.format(format_description!("[year]-[month]-[day]")).ok())
        .unwrap_or_else(|| raw.to_string())
}

fn parse_date(raw: &str) -> Option<Date> {
    if let Ok(parsed) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(parsed.date());
    }
    if let Ok(parsed) = OffsetDateTime::parse(raw, &Rfc2822) {
        return Some(parsed.date());
    }
    let naive = raw.split('.').next().unwrap_or(raw);
    if let Ok(parsed) = PrimitiveDateTime::parse(
        naive,
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    ) {
        return Some(parsed.date());
    }
    PrimitiveDateTime::parse(
        naive,
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    )
    .map(|parsed| parsed.date())
    .ok()
}
