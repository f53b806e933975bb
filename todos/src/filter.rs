//! Visibility filter for the todo list

use crate::types::Todo;

/// Which todos a view shows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TodoFilter {
    /// Every todo
    #[default]
    All,
    /// Todos not yet complete
    Active,
    /// Completed todos
    Completed,
}

impl TodoFilter {
    /// Parse a filter name
    ///
    /// `"active"` and `"completed"` select those filters. Anything else,
    /// including no name at all, selects [`TodoFilter::All`].
    #[must_use]
    pub fn parse(name: Option<&str>) -> Self {
        match name {
            Some("active") => Self::Active,
            Some("completed") => Self::Completed,
            _ => Self::All,
        }
    }

    /// Whether `todo` is visible under this filter
    #[must_use]
    pub const fn matches(self, todo: &Todo) -> bool {
        match self {
            Self::All => true,
            Self::Active => !todo.is_complete,
            Self::Completed => todo.is_complete,
        }
    }

    /// Visible todos, in their original order
    #[must_use]
    pub fn apply(self, todos: &[Todo]) -> Vec<&Todo> {
        todos.iter().filter(|todo| self.matches(todo)).collect()
    }
}

/// Todos visible under the named filter, in their original order
#[must_use]
pub fn visible_todos<'a>(todos: &'a [Todo], filter: Option<&str>) -> Vec<&'a Todo> {
    TodoFilter::parse(filter).apply(todos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Todo> {
        vec![
            Todo::new(1, "a"),
            Todo::new(2, "b").toggled(),
            Todo::new(3, "c"),
        ]
    }

    fn ids(todos: &[&Todo]) -> Vec<u64> {
        todos.iter().filter_map(|todo| todo.id.as_u64()).collect()
    }

    #[test]
    fn active_and_completed_split_the_list() {
        let todos = sample();

        assert_eq!(ids(&visible_todos(&todos, Some("active"))), vec![1, 3]);
        assert_eq!(ids(&visible_todos(&todos, Some("completed"))), vec![2]);
    }

    #[test]
    fn anything_else_shows_everything() {
        let todos = sample();

        assert_eq!(ids(&visible_todos(&todos, None)), vec![1, 2, 3]);
        assert_eq!(ids(&visible_todos(&todos, Some("all"))), vec![1, 2, 3]);
        assert_eq!(ids(&visible_todos(&todos, Some("Active"))), vec![1, 2, 3]);
        assert_eq!(ids(&visible_todos(&todos, Some(""))), vec![1, 2, 3]);
    }

    #[test]
    fn empty_list_stays_empty() {
        assert!(TodoFilter::Completed.apply(&[]).is_empty());
    }
}
