//! Reducer for the todo state.
//!
//! Plain actions are folded into state directly. Thunk actions
//! show the loader inline and hand the service call to an effect built in
//! [`crate::thunks`].

use crate::actions::{request_failed, show_loader, TodoAction};
use crate::service::TodoService;
use crate::thunks;
use crate::types::{Todo, TodoState};
use std::sync::Arc;
use todo_store_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};

/// Environment dependencies for the todo reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Remote todo service the thunks call
    pub service: Arc<dyn TodoService>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(service: Arc<dyn TodoService>) -> Self {
        Self { service }
    }
}

impl std::fmt::Debug for TodoEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoEnvironment").finish_non_exhaustive()
    }
}

/// Reducer for the todo state
#[derive(Clone, Debug)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Applies a plain action to state
    fn apply(state: &mut TodoState, action: TodoAction) {
        match action {
            TodoAction::UpdateCurrent(text) => {
                state.current_todo = text;
            },
            TodoAction::LoadTodos(todos) => {
                state.todos = todos;
            },
            TodoAction::AddTodo(todo) => {
                if state.contains(&todo.id) {
                    tracing::warn!(id = %todo.id, "Ignoring todo with duplicate id");
                } else {
                    state.todos.push(todo);
                }
                state.current_todo.clear();
            },
            TodoAction::ReplaceTodo(todo) => {
                if let Some(slot) = state.todos.iter_mut().find(|t| t.id == todo.id) {
                    *slot = todo;
                }
            },
            TodoAction::RemoveTodo(id) => {
                state.todos.retain(|todo| todo.id != id);
            },
            TodoAction::ShowLoader(flag) | TodoAction::HideLoader(flag) => {
                state.is_loading = flag;
            },
            TodoAction::RequestFailed(message) => {
                state.message = message;
            },
            TodoAction::ClearMessage => {
                state.message.clear();
            },
            // Thunks are routed in `reduce`; unknown wire actions change nothing
            TodoAction::FetchTodos
            | TodoAction::SaveTodo { .. }
            | TodoAction::ToggleTodo { .. }
            | TodoAction::DeleteTodo { .. }
            | TodoAction::Unknown => {},
        }
    }
}

impl Default for TodoReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let effect = match action {
            // ========== Thunks ==========
            TodoAction::FetchTodos => {
                Self::apply(state, show_loader());
                thunks::fetch(Arc::clone(&env.service))
            },
            TodoAction::SaveTodo { name } => {
                Self::apply(state, show_loader());
                thunks::save(Arc::clone(&env.service), name)
            },
            TodoAction::ToggleTodo { id } => {
                let Some(toggled) = state.get(&id).map(Todo::toggled) else {
                    tracing::warn!(%id, "Cannot toggle missing todo");
                    Self::apply(state, request_failed(format!("todo {id} not found")));
                    return SmallVec::new();
                };
                Self::apply(state, show_loader());
                thunks::toggle(Arc::clone(&env.service), toggled)
            },
            TodoAction::DeleteTodo { id } => {
                Self::apply(state, show_loader());
                thunks::delete(Arc::clone(&env.service), id)
            },

            // ========== Plain actions ==========
            action => {
                tracing::trace!(kind = action.kind(), "Applying action");
                Self::apply(state, action);
                return SmallVec::new();
            },
        };

        smallvec![effect]
    }
}
