//! Interaction state of the todo list: selection, the delete confirmation
//! step and the per-item "deleting" marker while a delete is in flight.
//!
//! The list never owns todos. It works on the visible slice the root hands it.

use std::collections::HashSet;

use crate::types::Todo;
use crate::view::Filter;

#[derive(Debug, Default)]
pub struct ListState {
    selected: Option<usize>,
    confirming: Option<i64>,
    deleting: HashSet<i64>,
}

impl ListState {
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// The selected todo among `visible`, if any.
    pub fn selected_in<'a>(&self, visible: &[&'a Todo]) -> Option<&'a Todo> {
        self.selected.and_then(|i| visible.get(i).copied())
    }

    /// Move the selection to the next item, wrapping at the end.
    pub fn next(&mut self, len: usize) {
        let i = match self.selected {
            Some(i) if len > 0 && i < len - 1 => i + 1,
            _ => 0,
        };
        self.selected = (len > 0).then_some(i);
    }

    /// Move the selection to the previous item, wrapping at the start.
    pub fn previous(&mut self, len: usize) {
        let i = match self.selected {
            Some(0) | None => len.saturating_sub(1),
            Some(i) => i - 1,
        };
        self.selected = (len > 0).then_some(i);
    }

    pub fn unselect(&mut self) {
        self.selected = None;
    }

    /// Keep the selection inside a view that may have shrunk.
    pub fn clamp(&mut self, len: usize) {
        self.selected = match self.selected {
            _ if len == 0 => None,
            Some(i) if i >= len => Some(len - 1),
            other => other,
        };
    }

    /// Ask for confirmation before deleting `id`. Ignored while that item is
    /// already being deleted.
    pub fn request_delete(&mut self, id: i64) {
        if !self.deleting.contains(&id) {
            self.confirming = Some(id);
        }
    }

    pub fn confirming(&self) -> Option<i64> {
        self.confirming
    }

    /// User confirmed; returns the id to delete and marks it in flight.
    pub fn confirm_delete(&mut self) -> Option<i64> {
        let id = self.confirming.take()?;
        self.deleting.insert(id);
        Some(id)
    }

    pub fn cancel_delete(&mut self) {
        self.confirming = None;
    }

    pub fn is_deleting(&self, id: i64) -> bool {
        self.deleting.contains(&id)
    }

    /// The delete call for `id` resolved, one way or the other.
    pub fn finish_delete(&mut self, id: i64) {
        self.deleting.remove(&id);
    }
}

/// What an empty list should say.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyState {
    /// Nothing exists yet.
    NoTodos,
    /// Todos exist but the current filter or search hides them all.
    NoResults(String),
}

impl EmptyState {
    pub fn for_view(search: &str, filter: Filter) -> Self {
        if !search.is_empty() {
            EmptyState::NoResults(format!("No todos match \"{search}\""))
        } else if filter != Filter::All {
            EmptyState::NoResults(format!("No {filter} todos found"))
        } else {
            EmptyState::NoTodos
        }
    }
}
