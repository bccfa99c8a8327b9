//! Flutter bridge surface for Serene core.

pub mod api;
