//! Domain model for the checklist.
//!
//! # Responsibility
//! - Define the canonical todo record and its creation input.
//!
//! # Invariants
//! - Every todo is identified by a stable `TodoId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod todo;
