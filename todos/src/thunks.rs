//! Thunks: actions that talk to the remote service.
//!
//! Dispatching a thunk action runs two phases:
//!
//! 1. The reducer applies [`show_loader`](crate::actions::show_loader) inline,
//!    so `is_loading` is already `true` when `send` returns.
//! 2. The reducer returns one of the effects below. It makes exactly one
//!    service call, yields the result action, and always finishes with
//!    [`hide_loader`](crate::actions::hide_loader).
//!
//! A failed call yields [`request_failed`](crate::actions::request_failed)
//! in place of the result action, so the loader never stays stuck.

use crate::actions::{add_todo, hide_loader, load_todos, remove_todo, replace_todo, request_failed};
use crate::actions::TodoAction;
use crate::service::TodoService;
use crate::types::{Todo, TodoId};
use std::sync::Arc;
use todo_store_core::effect::Effect;
use todo_store_core::stream_effect;

/// Load every todo from the service
#[must_use]
pub const fn fetch_todos() -> TodoAction {
    TodoAction::FetchTodos
}

/// Create a todo named `name` on the service
#[must_use]
pub fn save_todo(name: impl Into<String>) -> TodoAction {
    TodoAction::SaveTodo { name: name.into() }
}

/// Flip completion of the todo with this id
#[must_use]
pub fn toggle_todo(id: impl Into<TodoId>) -> TodoAction {
    TodoAction::ToggleTodo { id: id.into() }
}

/// Delete the todo with this id
#[must_use]
pub fn delete_todo(id: impl Into<TodoId>) -> TodoAction {
    TodoAction::DeleteTodo { id: id.into() }
}

/// `list()` then `LoadTodos`
pub(crate) fn fetch(service: Arc<dyn TodoService>) -> Effect<TodoAction> {
    stream_effect! {
        match service.list().await {
            Ok(todos) => {
                tracing::debug!(count = todos.len(), "Fetched todos");
                yield load_todos(todos);
            },
            Err(error) => {
                tracing::warn!(%error, "Fetching todos failed");
                yield request_failed(format!("Could not load todos: {error}"));
            },
        }
        yield hide_loader();
    }
}

/// `create(name)` then `AddTodo`
pub(crate) fn save(service: Arc<dyn TodoService>, name: String) -> Effect<TodoAction> {
    stream_effect! {
        match service.create(name).await {
            Ok(todo) => {
                tracing::debug!(id = %todo.id, "Saved todo");
                yield add_todo(todo);
            },
            Err(error) => {
                tracing::warn!(%error, "Saving todo failed");
                yield request_failed(format!("Could not save todo: {error}"));
            },
        }
        yield hide_loader();
    }
}

/// `update(toggled)` then `ReplaceTodo`
///
/// `toggled` is the stored todo with `is_complete` already flipped.
pub(crate) fn toggle(service: Arc<dyn TodoService>, toggled: Todo) -> Effect<TodoAction> {
    stream_effect! {
        let id = toggled.id.clone();
        match service.update(toggled).await {
            Ok(todo) => {
                tracing::debug!(%id, is_complete = todo.is_complete, "Toggled todo");
                yield replace_todo(todo);
            },
            Err(error) => {
                tracing::warn!(%id, %error, "Toggling todo failed");
                yield request_failed(format!("Could not update todo {id}: {error}"));
            },
        }
        yield hide_loader();
    }
}

/// `destroy(id)` then `RemoveTodo`
pub(crate) fn delete(service: Arc<dyn TodoService>, id: TodoId) -> Effect<TodoAction> {
    stream_effect! {
        match service.destroy(id.clone()).await {
            Ok(()) => {
                tracing::debug!(%id, "Deleted todo");
                yield remove_todo(id);
            },
            Err(error) => {
                tracing::warn!(%id, %error, "Deleting todo failed");
                yield request_failed(format!("Could not delete todo {id}: {error}"));
            },
        }
        yield hide_loader();
    }
}
