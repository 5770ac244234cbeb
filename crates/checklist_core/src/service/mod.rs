//! Core use-case services.
//!
//! # Responsibility
//! - Wrap repository calls into the store contract used by the shell and FFI.
//! - Publish change notifications for committed mutations.

pub mod change_feed;
pub mod todo_service;
