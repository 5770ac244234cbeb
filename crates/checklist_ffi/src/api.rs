//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the checklist store and appearance preference to Dart via FRB.
//! - Translate core errors into response envelopes the UI can display.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Store failures are surfaced as `ok=false` with a message, never dropped.
//! - Each call opens its own connection; no connection outlives a call.

use checklist_core::db::open_db;
use checklist_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    PreferencesStore, RepoError, ShellError, SqliteTodoRepository, Todo, TodoForm, TodoId,
    TodoService,
};
use log::warn;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use uuid::Uuid;

const DEFAULT_DB_FILE_NAME: &str = "checklist.sqlite3";
const DEFAULT_PREFS_FILE_NAME: &str = "checklist_prefs.json";

static STORE_PATHS: OnceLock<StorePaths> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
struct StorePaths {
    db_path: PathBuf,
    prefs_path: PathBuf,
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Sets the database and preferences file locations for this process.
///
/// Must be called before the first store call; otherwise files under the OS
/// temp directory are used.
///
/// # FFI contract
/// - Repeating the call with the same paths is a no-op.
/// - Switching paths after configuration is rejected.
/// - Opens the database once so initialization failures surface here.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_store(db_path: String, preferences_path: String) -> String {
    let requested = match normalize_paths(&db_path, &preferences_path) {
        Ok(paths) => paths,
        Err(err) => return err,
    };

    let active = STORE_PATHS.get_or_init(|| requested.clone());
    if *active != requested {
        return format!(
            "store already configured at `{}`; refusing to switch to `{}`",
            active.db_path.display(),
            requested.db_path.display()
        );
    }

    match open_db(&active.db_path) {
        Ok(_) => String::new(),
        Err(err) => format!("store initialization failed: {err}"),
    }
}

/// Todo projection passed to Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    /// Stable todo id in hyphenated string form.
    pub id: String,
    pub title: String,
    pub description: String,
    pub is_complete: bool,
    /// Creation time in epoch milliseconds.
    pub created_at_ms: i64,
}

impl From<Todo> for TodoItem {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id.to_string(),
            title: todo.title,
            description: todo.description,
            is_complete: todo.is_complete,
            created_at_ms: todo.created_at,
        }
    }
}

/// List response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoListResponse {
    pub ok: bool,
    /// Todos in insertion order (empty on failure).
    pub items: Vec<TodoItem>,
    pub message: String,
}

/// Single-todo action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoActionResponse {
    pub ok: bool,
    /// The todo as persisted after the action.
    pub todo: Option<TodoItem>,
    pub message: String,
}

impl TodoActionResponse {
    fn success(message: impl Into<String>, todo: Todo) -> Self {
        Self {
            ok: true,
            todo: Some(todo.into()),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            todo: None,
            message: message.into(),
        }
    }
}

/// Batch delete response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDeleteResponse {
    pub ok: bool,
    /// Ids removed by this call; already-missing ids are not listed.
    pub removed_ids: Vec<String>,
    pub message: String,
}

/// Appearance preference response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppearanceResponse {
    pub ok: bool,
    pub dark_mode: bool,
    pub message: String,
}

/// Lists all todos in insertion order.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_list() -> TodoListResponse {
    match with_todo_service(|service| service.query()) {
        Ok(todos) => TodoListResponse {
            ok: true,
            message: format!("{} todo(s).", todos.len()),
            items: todos.into_iter().map(TodoItem::from).collect(),
        },
        Err(err) => TodoListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("todo_list failed: {err}"),
        },
    }
}

/// Creates a todo from the add sheet.
///
/// # FFI contract
/// - Blank titles are rejected without writing.
/// - New todos start incomplete with `created_at_ms` set to now.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_add(title: String, description: String) -> TodoActionResponse {
    let mut form = TodoForm::blank();
    form.title = title;
    form.description = description;

    let result = with_todo_service(|service| -> Result<Todo, ShellError> {
        let draft = form.to_draft()?;
        Ok(service.add(&draft)?)
    });
    match result {
        Ok(todo) => TodoActionResponse::success("Todo created.", todo),
        Err(err) => TodoActionResponse::failure(format!("todo_add failed: {err}")),
    }
}

/// Saves the edit form for an existing todo.
///
/// The stored record is loaded into a `TodoForm`, so `id` and `created_at`
/// come from the store and blank titles are rejected before any write.
/// Unknown ids fail.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_update(
    id: String,
    title: String,
    description: String,
    is_complete: bool,
) -> TodoActionResponse {
    let todo_id = match parse_todo_id(&id) {
        Ok(todo_id) => todo_id,
        Err(err) => return TodoActionResponse::failure(format!("todo_update failed: {err}")),
    };

    let result = with_todo_service(|service| -> Result<Todo, ShellError> {
        let stored = service
            .get(todo_id)?
            .ok_or(RepoError::NotFound(todo_id))?;
        let mut form = TodoForm::for_todo(&stored);
        form.title = title;
        form.description = description;
        form.is_complete = is_complete;

        let updated = form.to_updated()?;
        service.update(&updated)?;
        Ok(updated)
    });

    match result {
        Ok(todo) => TodoActionResponse::success("Todo updated.", todo),
        Err(err) => TodoActionResponse::failure(format!("todo_update failed: {err}")),
    }
}

/// Flips completion of one todo.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_toggle(id: String) -> TodoActionResponse {
    let todo_id = match parse_todo_id(&id) {
        Ok(todo_id) => todo_id,
        Err(err) => return TodoActionResponse::failure(format!("todo_toggle failed: {err}")),
    };

    match with_todo_service(|service| service.toggle_complete(todo_id)) {
        Ok(todo) => TodoActionResponse::success("Todo updated.", todo),
        Err(err) => TodoActionResponse::failure(format!("todo_toggle failed: {err}")),
    }
}

/// Deletes every todo in `ids`.
///
/// # FFI contract
/// - Already-deleted ids are ignored, so repeating a delete succeeds.
/// - Any malformed id fails the whole call before anything is removed.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_delete(ids: Vec<String>) -> TodoDeleteResponse {
    let parsed = match ids
        .iter()
        .map(|id| parse_todo_id(id))
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(parsed) => parsed,
        Err(err) => {
            return TodoDeleteResponse {
                ok: false,
                removed_ids: Vec::new(),
                message: format!("todo_delete failed: {err}"),
            };
        }
    };

    match with_todo_service(|service| service.delete(&parsed)) {
        Ok(removed) => TodoDeleteResponse {
            ok: true,
            message: format!("Deleted {} todo(s).", removed.len()),
            removed_ids: removed.iter().map(ToString::to_string).collect(),
        },
        Err(err) => TodoDeleteResponse {
            ok: false,
            removed_ids: Vec::new(),
            message: format!("todo_delete failed: {err}"),
        },
    }
}

/// Reads the persisted appearance preference.
#[flutter_rust_bridge::frb(sync)]
pub fn appearance_get() -> AppearanceResponse {
    match PreferencesStore::load(resolve_store_paths().prefs_path) {
        Ok(store) => AppearanceResponse {
            ok: true,
            dark_mode: store.dark_mode(),
            message: String::new(),
        },
        Err(err) => {
            warn!("event=prefs_load module=ffi status=error error={err}");
            AppearanceResponse {
                ok: false,
                dark_mode: false,
                message: format!("appearance_get failed: {err}"),
            }
        }
    }
}

/// Persists the appearance preference.
#[flutter_rust_bridge::frb(sync)]
pub fn appearance_set_dark_mode(enabled: bool) -> AppearanceResponse {
    let result = PreferencesStore::load(resolve_store_paths().prefs_path)
        .and_then(|mut store| store.set_dark_mode(enabled).map(|()| store));
    match result {
        Ok(store) => AppearanceResponse {
            ok: true,
            dark_mode: store.dark_mode(),
            message: String::new(),
        },
        Err(err) => AppearanceResponse {
            ok: false,
            dark_mode: false,
            message: format!("appearance_set_dark_mode failed: {err}"),
        },
    }
}

fn normalize_paths(db_path: &str, preferences_path: &str) -> Result<StorePaths, String> {
    let db_path = db_path.trim();
    let prefs_path = preferences_path.trim();
    if db_path.is_empty() || prefs_path.is_empty() {
        return Err("db_path and preferences_path cannot be empty".to_string());
    }
    for path in [db_path, prefs_path] {
        if !Path::new(path).is_absolute() {
            return Err(format!("store paths must be absolute, got `{path}`"));
        }
    }
    Ok(StorePaths {
        db_path: PathBuf::from(db_path),
        prefs_path: PathBuf::from(prefs_path),
    })
}

fn resolve_store_paths() -> StorePaths {
    STORE_PATHS
        .get_or_init(|| StorePaths {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            prefs_path: std::env::temp_dir().join(DEFAULT_PREFS_FILE_NAME),
        })
        .clone()
}

fn parse_todo_id(raw: &str) -> Result<TodoId, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid todo id `{raw}`"))
}

fn with_todo_service<T, E: std::fmt::Display>(
    f: impl FnOnce(&TodoService<SqliteTodoRepository<'_>>) -> Result<T, E>,
) -> Result<T, String> {
    let db_path = resolve_store_paths().db_path;
    let conn = open_db(&db_path).map_err(|err| format!("store open failed: {err}"))?;
    let repo = SqliteTodoRepository::try_new(&conn)
        .map_err(|err| format!("store repo init failed: {err}"))?;
    let service = TodoService::new(repo);
    f(&service).map_err(|err| err.to_string())
}
