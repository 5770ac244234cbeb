//! Single-screen state driven by user intents.
//!
//! # Responsibility
//! - Project committed todos into display rows.
//! - Track add-sheet visibility and submit it through `TodoService::add`.
//! - Resolve list positions for edit, toggle and delete intents.
//!
//! # Invariants
//! - Positions are resolved against a fresh `query()` on every call.
//! - A failed submit leaves the add sheet open with its buffer intact.
//! - Edits reach the store only through `TodoForm::to_updated`.

use crate::model::todo::{Todo, TodoId};
use crate::preferences::PreferencesStore;
use crate::repo::todo_repo::TodoRepository;
use crate::service::todo_service::TodoService;
use crate::shell::{ShellError, ShellResult, TodoForm};
use log::debug;

/// One rendered list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoRow {
    pub id: TodoId,
    pub title: String,
    /// `None` when the todo has no description.
    pub description: Option<String>,
    pub is_complete: bool,
    pub created_at: i64,
}

impl From<Todo> for TodoRow {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            description: (!todo.description.is_empty()).then_some(todo.description),
            is_complete: todo.is_complete,
            created_at: todo.created_at,
        }
    }
}

/// Screen state: the store, the appearance preference and the add sheet.
pub struct TodoShell<R: TodoRepository> {
    service: TodoService<R>,
    preferences: PreferencesStore,
    new_sheet: Option<TodoForm>,
}

impl<R: TodoRepository> TodoShell<R> {
    pub fn new(service: TodoService<R>, preferences: PreferencesStore) -> Self {
        Self {
            service,
            preferences,
            new_sheet: None,
        }
    }

    pub fn service(&self) -> &TodoService<R> {
        &self.service
    }

    /// Mutable access, used to subscribe to store changes.
    pub fn service_mut(&mut self) -> &mut TodoService<R> {
        &mut self.service
    }

    /// Rows for the current committed store contents, in list order.
    pub fn rows(&self) -> ShellResult<Vec<TodoRow>> {
        let todos = self.service.query()?;
        Ok(todos.into_iter().map(TodoRow::from).collect())
    }

    pub fn is_sheet_shown(&self) -> bool {
        self.new_sheet.is_some()
    }

    /// Shows the add sheet with a blank form. Reopening keeps nothing from a
    /// previously cancelled sheet.
    pub fn open_new_sheet(&mut self) -> &mut TodoForm {
        self.new_sheet.insert(TodoForm::blank())
    }

    pub fn new_sheet_mut(&mut self) -> Option<&mut TodoForm> {
        self.new_sheet.as_mut()
    }

    pub fn cancel_new_sheet(&mut self) {
        self.new_sheet = None;
    }

    /// Confirms the add sheet.
    ///
    /// The sheet stays open when the title is blank or the store rejects the
    /// write, so the user can correct or retry.
    pub fn submit_new_sheet(&mut self) -> ShellResult<Todo> {
        let form = self.new_sheet.as_ref().ok_or(ShellError::NoSheetShown)?;
        let draft = form.to_draft()?;
        let todo = self.service.add(&draft)?;
        self.new_sheet = None;
        debug!("event=sheet_submit module=shell status=ok");
        Ok(todo)
    }

    /// Opens an edit buffer for the row at `position`.
    pub fn begin_edit(&self, position: usize) -> ShellResult<TodoForm> {
        let todo = self.todo_at(position)?;
        Ok(TodoForm::for_todo(&todo))
    }

    /// Writes an edit buffer back to the store.
    pub fn submit_edit(&self, form: &TodoForm) -> ShellResult<Todo> {
        let updated = form.to_updated()?;
        self.service.update(&updated)?;
        Ok(updated)
    }

    pub fn toggle_at(&self, position: usize) -> ShellResult<Todo> {
        let todo = self.todo_at(position)?;
        Ok(self.service.toggle_complete(todo.id)?)
    }

    /// Deletes the rows at the given list positions.
    ///
    /// Positions refer to the list as it is before the call. Positions past
    /// the end are ignored.
    pub fn delete_at(&self, positions: &[usize]) -> ShellResult<Vec<TodoId>> {
        let todos = self.service.query()?;
        let ids = positions
            .iter()
            .filter_map(|position| todos.get(*position).map(|todo| todo.id))
            .collect::<Vec<_>>();
        Ok(self.service.delete(&ids)?)
    }

    pub fn dark_mode(&self) -> bool {
        self.preferences.dark_mode()
    }

    pub fn set_dark_mode(&mut self, enabled: bool) -> ShellResult<()> {
        Ok(self.preferences.set_dark_mode(enabled)?)
    }

    fn todo_at(&self, position: usize) -> ShellResult<Todo> {
        let mut todos = self.service.query()?;
        let len = todos.len();
        if position >= len {
            return Err(ShellError::PositionOutOfRange { position, len });
        }
        Ok(todos.swap_remove(position))
    }
}
