//! Render targets: the capability the controller draws through, and the
//! terminal implementation used by the binary.

pub mod target;
pub mod terminal;
