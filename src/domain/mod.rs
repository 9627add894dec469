//! Domain layer: resource kinds, records and display rules.

pub mod error;
pub mod kinds;
pub mod records;
pub mod text;
