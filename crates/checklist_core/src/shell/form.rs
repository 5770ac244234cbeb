//! Edit buffers for the add sheet and the edit form.
//!
//! A form holds a local copy of the fields being edited. Nothing reaches the
//! store until the caller submits the form through the shell.

use crate::model::todo::{is_valid_title, Todo, TodoDraft, TodoId};
use crate::shell::ShellError;

/// Local edit buffer bound to either a new or an existing todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoForm {
    /// Snapshot of the record being edited; `None` for the add sheet.
    original: Option<Todo>,
    pub title: String,
    pub description: String,
    pub is_complete: bool,
}

impl TodoForm {
    /// Blank form used by the add sheet.
    pub fn blank() -> Self {
        Self {
            original: None,
            title: String::new(),
            description: String::new(),
            is_complete: false,
        }
    }

    /// Form pre-filled from an existing todo.
    pub fn for_todo(todo: &Todo) -> Self {
        Self {
            original: Some(todo.clone()),
            title: todo.title.clone(),
            description: todo.description.clone(),
            is_complete: todo.is_complete,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.original.is_some()
    }

    pub fn target_id(&self) -> Option<TodoId> {
        self.original.as_ref().map(|todo| todo.id)
    }

    /// Creation time of the edited todo, for the "Created on" row.
    pub fn created_at(&self) -> Option<i64> {
        self.original.as_ref().map(|todo| todo.created_at)
    }

    /// Whether the confirm action is enabled.
    pub fn can_submit(&self) -> bool {
        is_valid_title(&self.title)
    }

    /// Whether the buffer differs from the record it was opened on.
    pub fn is_dirty(&self) -> bool {
        match &self.original {
            Some(todo) => {
                todo.title != self.title
                    || todo.description != self.description
                    || todo.is_complete != self.is_complete
            }
            None => !self.title.is_empty() || !self.description.is_empty(),
        }
    }

    /// Draft for the add sheet; blank titles are rejected.
    pub fn to_draft(&self) -> Result<TodoDraft, ShellError> {
        if !self.can_submit() {
            return Err(ShellError::EmptyTitle);
        }
        Ok(TodoDraft::new(self.title.clone(), self.description.clone()))
    }

    /// Applies the buffer onto the original snapshot.
    ///
    /// `id` and `created_at` are taken from the snapshot, never from input.
    pub fn to_updated(&self) -> Result<Todo, ShellError> {
        let original = self.original.as_ref().ok_or(ShellError::NotAnEditForm)?;
        if !self.can_submit() {
            return Err(ShellError::EmptyTitle);
        }
        Ok(Todo {
            id: original.id,
            title: self.title.clone(),
            description: self.description.clone(),
            is_complete: self.is_complete,
            created_at: original.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::TodoForm;
    use crate::model::todo::Todo;
    use crate::shell::ShellError;

    #[test]
    fn blank_form_cannot_submit_until_titled() {
        let mut form = TodoForm::blank();
        assert!(!form.can_submit());
        assert!(!form.is_dirty());

        form.title = "Buy milk".to_string();
        assert!(form.can_submit());
        assert!(form.is_dirty());
        assert_eq!(form.to_draft().unwrap().title, "Buy milk");
    }

    #[test]
    fn edit_form_keeps_identity_and_creation_time() {
        let todo = Todo::new("draft", "");
        let mut form = TodoForm::for_todo(&todo);
        assert!(!form.is_dirty());

        form.title = "final".to_string();
        form.is_complete = true;
        let updated = form.to_updated().unwrap();

        assert_eq!(updated.id, todo.id);
        assert_eq!(updated.created_at, todo.created_at);
        assert_eq!(updated.title, "final");
        assert!(updated.is_complete);
    }

    #[test]
    fn clearing_title_blocks_edit_submit() {
        let todo = Todo::new("keep me", "");
        let mut form = TodoForm::for_todo(&todo);
        form.title.clear();
        assert!(matches!(form.to_updated(), Err(ShellError::EmptyTitle)));
    }

    #[test]
    fn blank_form_is_not_an_edit_form() {
        let mut form = TodoForm::blank();
        form.title = "x".to_string();
        assert!(matches!(form.to_updated(), Err(ShellError::NotAnEditForm)));
    }
}
