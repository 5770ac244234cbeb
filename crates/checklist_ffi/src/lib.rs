//! Flutter bridge for the checklist core.

pub mod api;
