//! Core domain logic for the checklist app.
//! This crate is the single source of truth for todo invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod preferences;
pub mod repo;
pub mod service;
pub mod shell;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::todo::{is_valid_title, Todo, TodoDraft, TodoId, TodoValidationError};
pub use preferences::{AppPreferences, PreferencesError, PreferencesStore};
pub use repo::todo_repo::{RepoError, RepoResult, SqliteTodoRepository, TodoRepository};
pub use service::change_feed::{ChangeListener, SubscriptionId, TodoChange};
pub use service::todo_service::TodoService;
pub use shell::{ShellError, ShellResult, TodoForm, TodoRow, TodoShell};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
