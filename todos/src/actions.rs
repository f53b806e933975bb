//! Actions and their creators.
//!
//! `TodoAction` is the closed set of things that can happen to the todo
//! state. Plain actions are folded into state by the reducer; thunk actions
//! start a request against the remote service (see [`crate::thunks`]).
//!
//! The wire form mirrors the classic `{type, payload}` shape so actions can be
//! logged or replayed as JSON:
//!
//! ```
//! use todos::actions::{update_current, TodoAction};
//!
//! let json = serde_json::to_string(&update_current("hello WORLD")).unwrap();
//! assert_eq!(json, r#"{"type":"UPDATE_CURRENT","payload":"Hello world"}"#);
//!
//! let unknown: TodoAction =
//!     serde_json::from_str(r#"{"type":"SET_FILTER","payload":{"filter":"active"}}"#).unwrap();
//! assert_eq!(unknown, TodoAction::Unknown);
//! ```

use crate::types::{Todo, TodoId};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Everything that can happen to the todo state
///
/// Deserializing accepts any `{type, payload}` object: a tag this enum does
/// not know becomes [`TodoAction::Unknown`] whatever its payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TodoAction {
    // ========== Plain actions ==========
    /// Replace the pending input text
    UpdateCurrent(String),
    /// Replace the whole todo list
    LoadTodos(Vec<Todo>),
    /// Append a created todo and clear the input
    AddTodo(Todo),
    /// Swap in the updated version of an existing todo
    ReplaceTodo(Todo),
    /// Drop the todo with this id
    RemoveTodo(TodoId),
    /// A request started
    ShowLoader(bool),
    /// A request finished
    HideLoader(bool),
    /// A request failed; carries the text shown to the user
    RequestFailed(String),
    /// Dismiss the failure text
    ClearMessage,

    // ========== Thunks ==========
    /// Load every todo from the service
    FetchTodos,
    /// Create a todo on the service
    SaveTodo {
        /// Text of the new todo
        name: String,
    },
    /// Flip completion of a todo on the service
    ToggleTodo {
        /// Todo to flip
        id: TodoId,
    },
    /// Delete a todo on the service
    DeleteTodo {
        /// Todo to delete
        id: TodoId,
    },

    /// Any action kind this enum does not know (wire form only)
    Unknown,
}

/// `{type, payload}` before the tag is looked at
#[derive(Deserialize)]
struct RawAction {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: Option<Value>,
}

#[derive(Deserialize)]
struct NamePayload {
    name: String,
}

#[derive(Deserialize)]
struct IdPayload {
    id: TodoId,
}

/// Build an action from its wire tag and payload
fn from_wire(kind: &str, payload: Value) -> Result<TodoAction, serde_json::Error> {
    use serde_json::from_value;

    Ok(match kind {
        "UPDATE_CURRENT" => TodoAction::UpdateCurrent(from_value(payload)?),
        "LOAD_TODOS" => TodoAction::LoadTodos(from_value(payload)?),
        "ADD_TODO" => TodoAction::AddTodo(from_value(payload)?),
        "REPLACE_TODO" => TodoAction::ReplaceTodo(from_value(payload)?),
        "REMOVE_TODO" => TodoAction::RemoveTodo(from_value(payload)?),
        "SHOW_LOADER" => TodoAction::ShowLoader(from_value(payload)?),
        "HIDE_LOADER" => TodoAction::HideLoader(from_value(payload)?),
        "REQUEST_FAILED" => TodoAction::RequestFailed(from_value(payload)?),
        "CLEAR_MESSAGE" => TodoAction::ClearMessage,
        "FETCH_TODOS" => TodoAction::FetchTodos,
        "SAVE_TODO" => {
            let NamePayload { name } = from_value(payload)?;
            TodoAction::SaveTodo { name }
        },
        "TOGGLE_TODO" => {
            let IdPayload { id } = from_value(payload)?;
            TodoAction::ToggleTodo { id }
        },
        "DELETE_TODO" => {
            let IdPayload { id } = from_value(payload)?;
            TodoAction::DeleteTodo { id }
        },
        _ => TodoAction::Unknown,
    })
}

impl<'de> Deserialize<'de> for TodoAction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let RawAction { kind, payload } = RawAction::deserialize(deserializer)?;
        from_wire(&kind, payload.unwrap_or(Value::Null)).map_err(de::Error::custom)
    }
}

impl TodoAction {
    /// Whether reducing this action starts a service request
    #[must_use]
    pub const fn is_thunk(&self) -> bool {
        matches!(
            self,
            Self::FetchTodos | Self::SaveTodo { .. } | Self::ToggleTodo { .. } | Self::DeleteTodo { .. }
        )
    }

    /// Wire tag of this action
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UpdateCurrent(_) => "UPDATE_CURRENT",
            Self::LoadTodos(_) => "LOAD_TODOS",
            Self::AddTodo(_) => "ADD_TODO",
            Self::ReplaceTodo(_) => "REPLACE_TODO",
            Self::RemoveTodo(_) => "REMOVE_TODO",
            Self::ShowLoader(_) => "SHOW_LOADER",
            Self::HideLoader(_) => "HIDE_LOADER",
            Self::RequestFailed(_) => "REQUEST_FAILED",
            Self::ClearMessage => "CLEAR_MESSAGE",
            Self::FetchTodos => "FETCH_TODOS",
            Self::SaveTodo { .. } => "SAVE_TODO",
            Self::ToggleTodo { .. } => "TOGGLE_TODO",
            Self::DeleteTodo { .. } => "DELETE_TODO",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// Upper-cases the first character and lower-cases the rest
#[must_use]
pub fn fix_case(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Input text changed
#[must_use]
pub fn update_current(raw: &str) -> TodoAction {
    TodoAction::UpdateCurrent(fix_case(raw))
}

/// Todos arrived from the service
#[must_use]
pub const fn load_todos(todos: Vec<Todo>) -> TodoAction {
    TodoAction::LoadTodos(todos)
}

/// A todo was created
#[must_use]
pub const fn add_todo(todo: Todo) -> TodoAction {
    TodoAction::AddTodo(todo)
}

/// A todo was updated
#[must_use]
pub const fn replace_todo(todo: Todo) -> TodoAction {
    TodoAction::ReplaceTodo(todo)
}

/// A todo was deleted
#[must_use]
pub const fn remove_todo(id: TodoId) -> TodoAction {
    TodoAction::RemoveTodo(id)
}

/// Show the loading indicator
#[must_use]
pub const fn show_loader() -> TodoAction {
    TodoAction::ShowLoader(true)
}

/// Hide the loading indicator
#[must_use]
pub const fn hide_loader() -> TodoAction {
    TodoAction::HideLoader(false)
}

/// A request failed
#[must_use]
pub fn request_failed(message: impl Into<String>) -> TodoAction {
    TodoAction::RequestFailed(message.into())
}

/// Dismiss the failure text
#[must_use]
pub const fn clear_message() -> TodoAction {
    TodoAction::ClearMessage
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_current_fixes_case() {
        assert_eq!(update_current("hello world"), TodoAction::UpdateCurrent("Hello world".into()));
        assert_eq!(update_current("hELLO"), TodoAction::UpdateCurrent("Hello".into()));
        assert_eq!(update_current("x"), TodoAction::UpdateCurrent("X".into()));
        assert_eq!(update_current(""), TodoAction::UpdateCurrent(String::new()));
    }

    #[test]
    fn fix_case_handles_non_ascii() {
        assert_eq!(fix_case("éCOLE"), "École");
        assert_eq!(fix_case("ß"), "SS");
        assert_eq!(fix_case("1ST PLACE"), "1st place");
    }

    #[test]
    fn loader_creators_carry_constant_payloads() {
        assert_eq!(show_loader(), TodoAction::ShowLoader(true));
        assert_eq!(hide_loader(), TodoAction::HideLoader(false));
    }

    #[test]
    fn identity_creators() {
        let todo = Todo::new(1, "Abc");

        assert_eq!(add_todo(todo.clone()), TodoAction::AddTodo(todo.clone()));
        assert_eq!(replace_todo(todo.clone()), TodoAction::ReplaceTodo(todo.clone()));
        assert_eq!(load_todos(vec![todo.clone()]), TodoAction::LoadTodos(vec![todo]));
        assert_eq!(remove_todo(TodoId::new(1)), TodoAction::RemoveTodo(TodoId::new(1)));
    }

    #[test]
    fn wire_form_uses_type_and_payload() {
        let json = serde_json::to_value(add_todo(Todo::new(1, "Abc"))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "ADD_TODO",
                "payload": {"id": 1, "name": "Abc", "isComplete": false}
            })
        );

        let parsed: TodoAction =
            serde_json::from_str(r#"{"type":"SHOW_LOADER","payload":true}"#).unwrap();
        assert_eq!(parsed, show_loader());

        let parsed: TodoAction =
            serde_json::from_str(r#"{"type":"TOGGLE_TODO","payload":{"id":7}}"#).unwrap();
        assert_eq!(parsed, TodoAction::ToggleTodo { id: TodoId::new(7) });
    }

    #[test]
    fn unknown_tags_deserialize_to_unknown() {
        let parsed: TodoAction = serde_json::from_str(r#"{"type":"NOPE"}"#).unwrap();
        assert_eq!(parsed, TodoAction::Unknown);
        assert!(!parsed.is_thunk());
    }

    #[test]
    fn unknown_tags_ignore_their_payload() {
        for raw in [
            r#"{"type":"NOPE","payload":"x"}"#,
            r#"{"type":"SET_FILTER","payload":{"filter":"active"}}"#,
            r#"{"payload":[1,2,3],"type":"ROUTE_CHANGED"}"#,
            r#"{"type":"NOPE","payload":null}"#,
        ] {
            let parsed: TodoAction = serde_json::from_str(raw).unwrap();
            assert_eq!(parsed, TodoAction::Unknown, "{raw}");
        }
    }

    #[test]
    fn known_tags_accept_payload_first() {
        let parsed: TodoAction =
            serde_json::from_str(r#"{"payload":{"name":"Milk"},"type":"SAVE_TODO"}"#).unwrap();
        assert_eq!(parsed, TodoAction::SaveTodo { name: "Milk".into() });

        let parsed: TodoAction = serde_json::from_str(r#"{"type":"FETCH_TODOS"}"#).unwrap();
        assert_eq!(parsed, TodoAction::FetchTodos);
    }

    #[test]
    fn known_tag_with_bad_payload_is_an_error() {
        assert!(serde_json::from_str::<TodoAction>(r#"{"type":"SHOW_LOADER","payload":"yes"}"#).is_err());
        assert!(serde_json::from_str::<TodoAction>(r#"{"type":"REMOVE_TODO"}"#).is_err());
        assert!(serde_json::from_str::<TodoAction>(r#"{"payload":1}"#).is_err());
    }

    #[test]
    fn every_action_reads_back_from_its_wire_form() {
        for action in [
            update_current("milk"),
            load_todos(vec![Todo::new(1, "a")]),
            replace_todo(Todo::new(2, "b").toggled()),
            remove_todo(TodoId::from("a1")),
            show_loader(),
            request_failed("offline"),
            clear_message(),
            TodoAction::FetchTodos,
            TodoAction::DeleteTodo { id: TodoId::new(4) },
            TodoAction::Unknown,
        ] {
            let json = serde_json::to_string(&action).unwrap();
            let parsed: TodoAction = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, action, "{json}");
        }
    }

    #[test]
    fn kind_matches_wire_tag() {
        for action in [
            update_current("a"),
            remove_todo(TodoId::new(3)),
            hide_loader(),
            clear_message(),
            TodoAction::FetchTodos,
            TodoAction::SaveTodo { name: "a".into() },
        ] {
            let json = serde_json::to_value(&action).unwrap();
            assert_eq!(json["type"], action.kind());
        }
    }

    #[test]
    fn thunks_are_flagged() {
        assert!(TodoAction::FetchTodos.is_thunk());
        assert!(TodoAction::DeleteTodo { id: TodoId::new(1) }.is_thunk());
        assert!(!add_todo(Todo::new(1, "a")).is_thunk());
    }
}
