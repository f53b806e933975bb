//! Todo-list state layer.
//!
//! Holds a list of todos, lets a caller create, toggle and delete them, and
//! persists every change through a remote [`TodoService`]. It is built from:
//!
//! - [`actions`]: `TodoAction` and its pure creators
//! - [`reducer`]: `TodoReducer`, folding actions into `TodoState`
//! - [`thunks`]: actions that call the service, show the loader while the
//!   request is in flight, and feed the result back into the store
//! - [`filter`]: which todos a view shows
//! - [`service`]: the `TodoService` trait with HTTP and in-memory implementations
//! - [`config`]: environment-based configuration
//! - [`loader`]: the loading indicator
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use todos::{actions, thunks, InMemoryTodoService, TodoEnvironment};
//!
//! # tokio_test::block_on(async {
//! let service = InMemoryTodoService::new().with_latency(Duration::from_millis(20));
//! let store = todos::new_store(TodoEnvironment::new(Arc::new(service)));
//!
//! store.send(actions::update_current("buy milk")).await.unwrap();
//! let name = store.state(|s| s.current_todo.clone()).await;
//!
//! let mut handle = store.send(thunks::save_todo(name)).await.unwrap();
//! assert!(store.state(|s| s.is_loading).await);
//!
//! handle.wait().await;
//! let state = store.state(Clone::clone).await;
//! assert_eq!(state.todos[0].name, "Buy milk");
//! assert_eq!(state.current_todo, "");
//! assert!(!state.is_loading);
//! # });
//! ```

pub mod actions;
pub mod config;
pub mod filter;
pub mod loader;
pub mod reducer;
pub mod service;
pub mod thunks;
pub mod types;

// Re-export commonly used types
pub use actions::TodoAction;
pub use config::{ConfigError, TodoConfig};
pub use filter::{visible_todos, TodoFilter};
pub use reducer::{TodoEnvironment, TodoReducer};
pub use service::{HttpTodoService, InMemoryTodoService, ServiceError, TodoService};
pub use types::{NewTodo, Todo, TodoId, TodoState};

/// The store holding the todo state
pub type TodoStore = todo_store_runtime::Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;

/// Create a store with the initial state: no todos, empty input, not loading
#[must_use]
pub fn new_store(environment: TodoEnvironment) -> TodoStore {
    TodoStore::new(TodoState::new(), TodoReducer::new(), environment)
}
