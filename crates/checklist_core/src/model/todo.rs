//! Todo domain model.
//!
//! # Responsibility
//! - Define the single record type shown on the checklist screen.
//! - Provide constructors that assign identity and creation time.
//!
//! # Invariants
//! - `id` is stable, never nil and never reused for another todo.
//! - `id` and `created_at` do not change after creation.
//! - `title` is never blank for a persisted todo.

use log::warn;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier of one todo.
pub type TodoId = Uuid;

/// Validation failures for todo records and drafts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoValidationError {
    /// `id` is the nil UUID.
    NilId,
    /// `title` is empty or whitespace only.
    EmptyTitle,
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "todo id must not be nil"),
            Self::EmptyTitle => write!(f, "todo title must not be empty"),
        }
    }
}

impl Error for TodoValidationError {}

/// Canonical todo record.
///
/// Equality compares every field, so two records loaded separately are equal
/// when their persisted values are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    /// Short label shown in the list row.
    pub title: String,
    /// Free-form details. May be empty.
    pub description: String,
    pub is_complete: bool,
    /// Unix epoch milliseconds, set once at creation.
    pub created_at: i64,
}

impl Todo {
    /// Creates an incomplete todo with a fresh id stamped with the current time.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            is_complete: false,
            created_at: now_epoch_ms(),
        }
    }

    /// Creates a todo with caller-provided identity and creation time.
    ///
    /// Used when rebuilding records whose identity already exists.
    pub fn with_id(
        id: TodoId,
        title: impl Into<String>,
        description: impl Into<String>,
        created_at: i64,
    ) -> Result<Self, TodoValidationError> {
        if id.is_nil() {
            return Err(TodoValidationError::NilId);
        }
        Ok(Self {
            id,
            title: title.into(),
            description: description.into(),
            is_complete: false,
            created_at,
        })
    }

    /// Checks record invariants before persistence.
    pub fn validate(&self) -> Result<(), TodoValidationError> {
        if self.id.is_nil() {
            return Err(TodoValidationError::NilId);
        }
        validate_title(&self.title)
    }

    /// Flips the completion flag.
    pub fn toggle_complete(&mut self) {
        self.is_complete = !self.is_complete;
    }
}

/// User input for a todo that does not exist yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoDraft {
    pub title: String,
    pub description: String,
}

impl TodoDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn validate(&self) -> Result<(), TodoValidationError> {
        validate_title(&self.title)
    }

    /// Materializes the draft into a new record with fresh identity.
    pub fn into_todo(self) -> Result<Todo, TodoValidationError> {
        self.validate()?;
        Ok(Todo::new(self.title, self.description))
    }
}

/// Returns whether `title` can be confirmed.
pub fn is_valid_title(title: &str) -> bool {
    !title.trim().is_empty()
}

fn validate_title(title: &str) -> Result<(), TodoValidationError> {
    if is_valid_title(title) {
        Ok(())
    } else {
        Err(TodoValidationError::EmptyTitle)
    }
}

/// Current wall-clock time in Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    epoch_ms_at(SystemTime::now())
}

/// Clamps to `0` before the epoch and to `i64::MAX` past the representable
/// range, logging either fallback.
fn epoch_ms_at(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(elapsed) => i64::try_from(elapsed.as_millis()).unwrap_or_else(|_| {
            warn!("event=clock_read module=model status=error error_code=clock_overflow");
            i64::MAX
        }),
        Err(err) => {
            warn!(
                "event=clock_read module=model status=error error_code=clock_before_epoch behind_ms={}",
                err.duration().as_millis()
            );
            0
        }
    }
}
