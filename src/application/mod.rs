//! Console workflows: state, selection, pagination and the list controller.

pub mod api;
pub mod controller;
pub mod deletion;
pub mod error;
pub mod notifications;
pub mod pagination;
pub mod rows;
pub mod selection;
pub mod state;
