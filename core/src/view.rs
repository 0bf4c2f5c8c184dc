//! Derived views over the todo collection: status filter, text search and
//! aggregate counts. Nothing here is stored; callers recompute on demand.

use std::fmt;

use crate::types::Todo;

/// Client-side predicate over completion status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Pending,
    Completed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Pending, Filter::Completed];

    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            Filter::All => true,
            Filter::Pending => !todo.completed,
            Filter::Completed => todo.completed,
        }
    }

    /// Next filter in tab order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Filter::All => Filter::Pending,
            Filter::Pending => Filter::Completed,
            Filter::Completed => Filter::All,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Pending => "pending",
            Filter::Completed => "completed",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive substring match against title or description. An empty
/// term matches everything.
pub fn matches_search(todo: &Todo, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    todo.title.to_lowercase().contains(&needle) || todo.description.to_lowercase().contains(&needle)
}

/// Status filter and search composed with AND, preserving collection order.
pub fn visible<'a>(todos: &'a [Todo], filter: Filter, term: &str) -> Vec<&'a Todo> {
    todos
        .iter()
        .filter(|todo| filter.matches(todo) && matches_search(todo, term))
        .collect()
}

/// Aggregate counts over the whole collection, ignoring filter and search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
}

impl Stats {
    pub fn of(todos: &[Todo]) -> Self {
        Self {
            total: todos.len(),
            completed: todos.iter().filter(|t| t.completed).count(),
        }
    }

    pub fn pending(&self) -> usize {
        self.total - self.completed
    }

    /// Percentage of completed todos rounded half up, 0 for an empty list.
    pub fn completion_rate(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((200 * self.completed + self.total) / (2 * self.total)) as u32
    }
}
