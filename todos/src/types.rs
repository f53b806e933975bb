//! Domain types for the todo list.
//!
//! A todo is identified by an id the remote service assigns on creation. The
//! application state is the single tree every action is folded into.

use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a todo
///
/// The service decides what an id looks like. Both JSON numbers and JSON
/// strings are accepted and written back in the form they arrived in; ids
/// are only ever compared for equality.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(IdRepr);

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Number(u64),
    Text(String),
}

impl TodoId {
    /// Wraps a numeric id
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(IdRepr::Number(id))
    }

    /// The id as a number, if the service handed out a number
    #[must_use]
    pub const fn as_u64(&self) -> Option<u64> {
        match self.0 {
            IdRepr::Number(id) => Some(id),
            IdRepr::Text(_) => None,
        }
    }
}

impl From<u64> for TodoId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

impl From<String> for TodoId {
    fn from(id: String) -> Self {
        Self(IdRepr::Text(id))
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        Self(IdRepr::Text(id.to_owned()))
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            IdRepr::Number(id) => write!(f, "{id}"),
            IdRepr::Text(id) => f.write_str(id),
        }
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Unique identifier
    pub id: TodoId,
    /// Text of the todo
    pub name: String,
    /// Whether the todo is done
    pub is_complete: bool,
}

impl Todo {
    /// Creates an incomplete todo
    #[must_use]
    pub fn new(id: impl Into<TodoId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_complete: false,
        }
    }

    /// Copy of this todo with `is_complete` flipped and every other field kept
    #[must_use]
    pub fn toggled(&self) -> Self {
        Self {
            is_complete: !self.is_complete,
            ..self.clone()
        }
    }
}

/// Body sent to the service to create a todo
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    /// Text of the todo
    pub name: String,
    /// Always `false` for new todos
    pub is_complete: bool,
}

impl NewTodo {
    /// Creates the payload for a new, incomplete todo
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_complete: false,
        }
    }
}

/// Application state
///
/// `todos` keeps the order the service returned them in, with new todos
/// appended at the end.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoState {
    /// All todos, no two sharing an id
    pub todos: Vec<Todo>,
    /// Pending input text
    pub current_todo: String,
    /// True while a service request is in flight
    pub is_loading: bool,
    /// Text of the last failed request, empty when there is none
    pub message: String,
}

impl TodoState {
    /// Creates an empty, idle state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a todo by id
    #[must_use]
    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == *id)
    }

    /// Checks if a todo exists
    #[must_use]
    pub fn contains(&self, id: &TodoId) -> bool {
        self.get(id).is_some()
    }

    /// Returns the number of todos
    #[must_use]
    pub fn count(&self) -> usize {
        self.todos.len()
    }

    /// Returns the number of completed todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|todo| todo.is_complete).count()
    }
}
