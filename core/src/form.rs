//! State of the add/edit dialog.
//!
//! The form only mirrors field values while it is open; it never talks to the
//! API. `submit` validates and hands back a payload shaped for either a create
//! or an update, depending on how the form was opened.

use thiserror::Error;

use crate::types::{CreateTodo, Todo, UpdateTodo, DESCRIPTION_MAX_CHARS, TITLE_MAX_CHARS};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Please enter a title")]
    EmptyTitle,
    #[error("Title must be at most {TITLE_MAX_CHARS} characters")]
    TitleTooLong,
    #[error("Description must be at most {DESCRIPTION_MAX_CHARS} characters")]
    DescriptionTooLong,
}

/// What the form emits on a valid submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPayload {
    Create(CreateTodo),
    Update(UpdateTodo),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Field {
    #[default]
    Title,
    Description,
    /// Only reachable when editing.
    Completed,
}

#[derive(Debug, Default)]
pub struct TodoForm {
    editing: bool,
    pub title: String,
    pub description: String,
    pub completed: bool,
    focus: Field,
    // Cursor position in chars within the focused text field.
    cursor: usize,
    error: Option<FormError>,
}

impl TodoForm {
    /// Blank form for a new todo.
    pub fn for_create() -> Self {
        Self::default()
    }

    /// Form pre-filled from an existing todo.
    pub fn for_edit(todo: &Todo) -> Self {
        Self {
            editing: true,
            title: todo.title.clone(),
            description: todo.description.clone(),
            completed: todo.completed,
            cursor: todo.title.chars().count(),
            ..Self::default()
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn error(&self) -> Option<&FormError> {
        self.error.as_ref()
    }

    /// Whether submit is currently possible.
    pub fn can_submit(&self) -> bool {
        !self.title.trim().is_empty()
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            Field::Title => Field::Description,
            Field::Description if self.editing => Field::Completed,
            Field::Description | Field::Completed => Field::Title,
        };
        self.cursor = self.focused_len();
    }

    pub fn previous_field(&mut self) {
        self.focus = match self.focus {
            Field::Title if self.editing => Field::Completed,
            Field::Title | Field::Completed => Field::Description,
            Field::Description => Field::Title,
        };
        self.cursor = self.focused_len();
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.focused_len());
    }

    /// Insert a char at the cursor. Input past the field's limit is ignored.
    pub fn input(&mut self, ch: char) {
        let cursor = self.cursor;
        let Some((text, max)) = self.focused_text() else {
            if ch == ' ' {
                self.toggle_completed();
            }
            return;
        };
        if text.chars().count() >= max {
            return;
        }
        let at = byte_offset(text, cursor);
        text.insert(at, ch);
        self.cursor += 1;
        self.error = None;
    }

    /// Delete the char before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let cursor = self.cursor;
        if let Some((text, _)) = self.focused_text() {
            let at = byte_offset(text, cursor - 1);
            text.remove(at);
            self.cursor -= 1;
        }
    }

    pub fn toggle_completed(&mut self) {
        if self.editing {
            self.completed = !self.completed;
        }
    }

    /// Validate and build the payload. Title and description are trimmed.
    pub fn submit(&mut self) -> Result<FormPayload, FormError> {
        let result = self.validate();
        self.error = result.as_ref().err().cloned();
        result
    }

    fn validate(&self) -> Result<FormPayload, FormError> {
        let title = self.title.trim();
        let description = self.description.trim();
        if title.is_empty() {
            return Err(FormError::EmptyTitle);
        }
        if title.chars().count() > TITLE_MAX_CHARS {
            return Err(FormError::TitleTooLong);
        }
        if description.chars().count() > DESCRIPTION_MAX_CHARS {
            return Err(FormError::DescriptionTooLong);
        }
        let payload = if self.editing {
            FormPayload::Update(UpdateTodo {
                title: title.to_string(),
                description: description.to_string(),
                completed: self.completed,
            })
        } else {
            FormPayload::Create(CreateTodo {
                title: title.to_string(),
                description: description.to_string(),
            })
        };
        Ok(payload)
    }

    fn focused_text(&mut self) -> Option<(&mut String, usize)> {
        match self.focus {
            Field::Title => Some((&mut self.title, TITLE_MAX_CHARS)),
            Field::Description => Some((&mut self.description, DESCRIPTION_MAX_CHARS)),
            Field::Completed => None,
        }
    }

    fn focused_len(&self) -> usize {
        match self.focus {
            Field::Title => self.title.chars().count(),
            Field::Description => self.description.chars().count(),
            Field::Completed => 0,
        }
    }
}

fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map_or(text.len(), |(i, _)| i)
}
