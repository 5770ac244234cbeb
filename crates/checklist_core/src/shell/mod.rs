//! Headless presentation shell for the single checklist screen.
//!
//! # Responsibility
//! - Turn the store's current records into list rows.
//! - Dispatch add/edit/toggle/delete intents to `TodoService`.
//! - Own the add-sheet visibility and the appearance preference.
//!
//! # Invariants
//! - The shell never holds a live reference into the store; edits go through
//!   a `TodoForm` buffer and an explicit `update`.
//! - Blank titles never reach the store from the shell.
//! - `TodoForm` is also the FFI add/edit path, so both surfaces share the
//!   same title gate and identity rules.

mod form;
mod screen;

pub use form::TodoForm;
pub use screen::{TodoRow, TodoShell};

use crate::preferences::PreferencesError;
use crate::repo::todo_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ShellResult<T> = Result<T, ShellError>;

/// Errors surfaced to the user by shell intents.
#[derive(Debug)]
pub enum ShellError {
    /// Confirm was attempted with a blank title.
    EmptyTitle,
    /// No row at this list position.
    PositionOutOfRange { position: usize, len: usize },
    /// Submit was attempted while the add sheet is hidden.
    NoSheetShown,
    /// An add-sheet form was submitted as an edit.
    NotAnEditForm,
    Store(RepoError),
    Preferences(PreferencesError),
}

impl Display for ShellError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::PositionOutOfRange { position, len } => {
                write!(f, "no todo at position {position} (list has {len})")
            }
            Self::NoSheetShown => write!(f, "add sheet is not shown"),
            Self::NotAnEditForm => write!(f, "form is not bound to an existing todo"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Preferences(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ShellError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Preferences(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ShellError {
    fn from(value: RepoError) -> Self {
        Self::Store(value)
    }
}

impl From<PreferencesError> for ShellError {
    fn from(value: PreferencesError) -> Self {
        Self::Preferences(value)
    }
}
