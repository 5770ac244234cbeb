//! Todo store service.
//!
//! # Responsibility
//! - Provide the add/update/delete/query contract used by the shell and FFI.
//! - Publish change notifications after each committed mutation.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Listeners only observe mutations that returned `Ok`.
//! - Failed or no-op mutations publish nothing.
//! - Log events carry ids and counts only, never titles or descriptions.

use crate::model::todo::{Todo, TodoDraft, TodoId};
use crate::repo::todo_repo::{RepoError, RepoResult, TodoRepository};
use crate::service::change_feed::{ChangeFeed, ChangeListener, SubscriptionId, TodoChange};
use log::{error, info};

/// Store facade over a todo repository.
pub struct TodoService<R: TodoRepository> {
    repo: R,
    feed: ChangeFeed,
}

impl<R: TodoRepository> TodoService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            feed: ChangeFeed::new(),
        }
    }

    /// Creates a todo from user input.
    ///
    /// # Contract
    /// - Assigns a fresh id and the current time as `created_at`.
    /// - New todos start incomplete.
    /// - Returns the persisted record.
    pub fn add(&self, draft: &TodoDraft) -> RepoResult<Todo> {
        let todo = draft.clone().into_todo()?;
        let result = self.repo.create_todo(&todo);
        log_outcome("todo_add", &result);
        let id = result?;

        self.feed.publish(&TodoChange::Added(id));
        Ok(todo)
    }

    /// Replaces the mutable fields of an existing todo.
    ///
    /// `id` selects the record; `created_at` on the argument is ignored.
    /// Unknown ids return `RepoError::NotFound`.
    pub fn update(&self, todo: &Todo) -> RepoResult<()> {
        let result = self.repo.update_todo(todo);
        log_outcome("todo_update", &result);
        result?;

        self.feed.publish(&TodoChange::Updated(todo.id));
        Ok(())
    }

    /// Removes all todos matching `ids`.
    ///
    /// Deleting ids that are already gone is not an error. Returns the ids
    /// that were removed by this call.
    pub fn delete(&self, ids: &[TodoId]) -> RepoResult<Vec<TodoId>> {
        let removed = match self.repo.delete_todos(ids) {
            Ok(removed) => removed,
            Err(err) => {
                error!(
                    "event=todo_delete module=service status=error requested={} error={}",
                    ids.len(),
                    err
                );
                return Err(err);
            }
        };
        info!(
            "event=todo_delete module=service status=ok requested={} removed={}",
            ids.len(),
            removed.len()
        );

        if !removed.is_empty() {
            self.feed.publish(&TodoChange::Deleted(removed.clone()));
        }
        Ok(removed)
    }

    /// Returns all committed todos in insertion order.
    pub fn query(&self) -> RepoResult<Vec<Todo>> {
        self.repo.list_todos()
    }

    pub fn get(&self, id: TodoId) -> RepoResult<Option<Todo>> {
        self.repo.get_todo(id)
    }

    pub fn count(&self) -> RepoResult<u64> {
        self.repo.count_todos()
    }

    /// Flips completion of one todo and returns the updated record.
    pub fn toggle_complete(&self, id: TodoId) -> RepoResult<Todo> {
        let mut todo = self.repo.get_todo(id)?.ok_or(RepoError::NotFound(id))?;
        todo.toggle_complete();
        self.update(&todo)?;
        Ok(todo)
    }

    /// Registers a listener for committed mutations.
    pub fn subscribe(&mut self, listener: impl ChangeListener + 'static) -> SubscriptionId {
        self.feed.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.feed.unsubscribe(id)
    }
}

fn log_outcome<T>(event: &'static str, result: &RepoResult<T>) {
    match result {
        Ok(_) => info!("event={event} module=service status=ok"),
        Err(err) => error!("event={event} module=service status=error error={err}"),
    }
}
