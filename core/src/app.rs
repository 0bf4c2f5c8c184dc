//! Root application state and orchestration.
//!
//! # Design
//! `TodoApp` is the single owner of the todo collection. User actions never
//! touch the collection directly: they return an `ApiCall` which the host
//! turns into an `HttpRequest`, executes, parses, and feeds back through
//! `TodoApp::apply`. Only `apply` mutates the collection, and only with what
//! the server returned. Filtered views and counts are derived on demand.
//!
//! Every failure is reported the same way regardless of its cause: a generic
//! error notification plus an `error!` event for whoever reads the logs.

use std::time::Instant;

use tracing::{debug, error, info, warn};

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::form::{FormPayload, TodoForm};
use crate::http::{HttpRequest, HttpResponse};
use crate::list::{EmptyState, ListState};
use crate::notification::{Notification, Toast};
use crate::types::{CreateTodo, Todo, UpdateTodo};
use crate::view::{self, Filter, Stats};

/// A network call requested by the app, waiting to be executed by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    LoadAll,
    Create(CreateTodo),
    Update { id: i64, input: UpdateTodo },
    Toggle { id: i64, input: UpdateTodo },
    Delete { id: i64 },
}

/// Parsed result of a successful `ApiCall`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiReply {
    Loaded(Vec<Todo>),
    Saved(Todo),
    Deleted,
}

impl ApiCall {
    pub fn build(&self, client: &TodoClient) -> Result<HttpRequest, ApiError> {
        match self {
            ApiCall::LoadAll => Ok(client.build_list_todos()),
            ApiCall::Create(input) => client.build_create_todo(input),
            ApiCall::Update { id, input } | ApiCall::Toggle { id, input } => {
                client.build_update_todo(*id, input)
            }
            ApiCall::Delete { id } => Ok(client.build_delete_todo(*id)),
        }
    }

    pub fn parse(&self, client: &TodoClient, response: HttpResponse) -> Result<ApiReply, ApiError> {
        match self {
            ApiCall::LoadAll => client.parse_list_todos(response).map(ApiReply::Loaded),
            ApiCall::Create(_) => client.parse_create_todo(response).map(ApiReply::Saved),
            ApiCall::Update { .. } | ApiCall::Toggle { .. } => {
                client.parse_update_todo(response).map(ApiReply::Saved)
            }
            ApiCall::Delete { .. } => client.parse_delete_todo(response).map(|()| ApiReply::Deleted),
        }
    }
}

#[derive(Debug)]
pub struct TodoApp {
    todos: Vec<Todo>,
    loading: bool,
    form: Option<TodoForm>,
    submitting: bool,
    editing: Option<Todo>,
    search: String,
    filter: Filter,
    pub list: ListState,
    toast: Toast,
}

impl Default for TodoApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoApp {
    /// Starts in the loading state; the first call to issue is `load`.
    pub fn new() -> Self {
        Self {
            todos: Vec::new(),
            loading: true,
            form: None,
            submitting: false,
            editing: None,
            search: String::new(),
            filter: Filter::All,
            list: ListState::default(),
            toast: Toast::default(),
        }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn editing(&self) -> Option<&Todo> {
        self.editing.as_ref()
    }

    /// Todos passing both the status filter and the search term.
    pub fn visible(&self) -> Vec<&Todo> {
        view::visible(&self.todos, self.filter, &self.search)
    }

    pub fn stats(&self) -> Stats {
        Stats::of(&self.todos)
    }

    pub fn empty_state(&self) -> EmptyState {
        EmptyState::for_view(&self.search, self.filter)
    }

    /// Whether the "Showing N of M" line applies.
    pub fn is_narrowed(&self) -> bool {
        !self.search.is_empty() || self.filter != Filter::All
    }

    pub fn selected(&self) -> Option<&Todo> {
        self.list.selected_in(&self.visible())
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.toast.current()
    }

    pub fn tick(&mut self, now: Instant) {
        self.toast.tick(now);
    }

    pub fn load(&mut self) -> ApiCall {
        self.loading = true;
        debug!("loading todos");
        ApiCall::LoadAll
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.clamp_selection();
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.clamp_selection();
    }

    pub fn push_search_char(&mut self, ch: char) {
        self.search.push(ch);
        self.clamp_selection();
    }

    pub fn pop_search_char(&mut self) {
        self.search.pop();
        self.clamp_selection();
    }

    pub fn clear_search(&mut self) {
        self.set_search(String::new());
    }

    pub fn select_next(&mut self) {
        let len = self.visible().len();
        self.list.next(len);
    }

    pub fn select_previous(&mut self) {
        let len = self.visible().len();
        self.list.previous(len);
    }

    pub fn is_form_open(&self) -> bool {
        self.form.is_some()
    }

    pub fn form(&self) -> Option<&TodoForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut TodoForm> {
        self.form.as_mut()
    }

    pub fn open_create_form(&mut self) {
        self.editing = None;
        self.form = Some(TodoForm::for_create());
    }

    /// Open the form pre-filled from the todo with `id`. Returns false when no
    /// such todo is loaded.
    /// Refused for an unknown id or one whose delete is in flight.
    pub fn open_edit_form(&mut self, id: i64) -> bool {
        if self.list.is_deleting(id) {
            return false;
        }
        let Some(todo) = self.todos.iter().find(|t| t.id == id) else {
            return false;
        };
        self.form = Some(TodoForm::for_edit(todo));
        self.editing = Some(todo.clone());
        true
    }

    /// Closing is refused while a submit is in flight.
    pub fn close_form(&mut self) {
        if self.submitting {
            return;
        }
        self.form = None;
        self.editing = None;
    }

    /// Validate the open form and produce the create or update call.
    /// Returns `None` when there is nothing to send: no open form, a submit
    /// already in flight, or a validation error (kept on the form).
    pub fn submit_form(&mut self) -> Option<ApiCall> {
        if self.submitting {
            return None;
        }
        let payload = self.form.as_mut()?.submit().ok()?;
        let call = match (payload, &self.editing) {
            (FormPayload::Create(input), _) => ApiCall::Create(input),
            (FormPayload::Update(input), Some(todo)) => ApiCall::Update { id: todo.id, input },
            (FormPayload::Update(_), None) => {
                warn!("update submitted without a todo being edited");
                return None;
            }
        };
        self.submitting = true;
        debug!(?call, "submitting form");
        Some(call)
    }

    /// Flip `completed` on the todo with `id`, resubmitting its text as is.
    pub fn toggle(&mut self, id: i64) -> Option<ApiCall> {
        if self.list.is_deleting(id) {
            return None;
        }
        let todo = self.todos.iter().find(|t| t.id == id)?;
        let input = UpdateTodo::toggled(todo);
        debug!(id, completed = input.completed, "toggling todo");
        Some(ApiCall::Toggle { id, input })
    }

    pub fn toggle_selected(&mut self) -> Option<ApiCall> {
        let id = self.selected()?.id;
        self.toggle(id)
    }

    pub fn request_delete_selected(&mut self) {
        if let Some(id) = self.selected().map(|t| t.id) {
            self.list.request_delete(id);
        }
    }

    pub fn confirm_delete(&mut self) -> Option<ApiCall> {
        let id = self.list.confirm_delete()?;
        debug!(id, "deleting todo");
        Some(ApiCall::Delete { id })
    }

    pub fn cancel_delete(&mut self) {
        self.list.cancel_delete();
    }

    /// Merge the outcome of `call` into local state.
    pub fn apply(&mut self, call: ApiCall, result: Result<ApiReply, ApiError>, now: Instant) {
        match &call {
            ApiCall::LoadAll => self.loading = false,
            ApiCall::Create(_) | ApiCall::Update { .. } => self.submitting = false,
            ApiCall::Delete { id } => self.list.finish_delete(*id),
            ApiCall::Toggle { .. } => {}
        }

        match (call, result) {
            (ApiCall::LoadAll, Ok(ApiReply::Loaded(todos))) => {
                info!(count = todos.len(), "loaded todos");
                self.todos = todos;
            }
            (ApiCall::LoadAll, Err(e)) => {
                error!("Error loading todos: {e}");
                self.toast.error("Failed to load todos", now);
            }
            (ApiCall::Create(_), Ok(ApiReply::Saved(todo))) => {
                info!(id = todo.id, "created todo");
                // A reload that raced the create may already hold this id.
                match self.todos.iter().position(|t| t.id == todo.id) {
                    Some(i) => self.todos[i] = todo,
                    None => self.todos.insert(0, todo),
                }
                self.toast.success("Todo created successfully!", now);
                self.finish_form();
            }
            (ApiCall::Update { id, .. }, Ok(ApiReply::Saved(todo))) => {
                info!(id, "updated todo");
                self.replace(id, todo);
                self.toast.success("Todo updated successfully!", now);
                self.finish_form();
            }
            (ApiCall::Create(_) | ApiCall::Update { .. }, Err(e)) => {
                error!("Error saving todo: {e}");
                self.toast.error("Failed to save todo", now);
                self.finish_form();
            }
            (ApiCall::Toggle { id, .. }, Ok(ApiReply::Saved(todo))) => {
                let state = if todo.completed { "completed" } else { "pending" };
                info!(id, state, "toggled todo");
                self.replace(id, todo);
                self.toast.success(format!("Todo marked as {state}!"), now);
            }
            (ApiCall::Toggle { .. }, Err(e)) => {
                error!("Error toggling todo: {e}");
                self.toast.error("Failed to update todo", now);
            }
            (ApiCall::Delete { id }, Ok(ApiReply::Deleted)) => {
                info!(id, "deleted todo");
                self.todos.retain(|t| t.id != id);
                self.toast.success("Todo deleted successfully!", now);
                self.clamp_selection();
            }
            (ApiCall::Delete { .. }, Err(e)) => {
                error!("Error deleting todo: {e}");
                self.toast.error("Failed to delete todo", now);
            }
            (call, Ok(reply)) => warn!(?call, ?reply, "reply does not match call"),
        }
    }

    fn replace(&mut self, id: i64, todo: Todo) {
        if let Some(slot) = self.todos.iter_mut().find(|t| t.id == id) {
            *slot = todo;
        }
    }

    fn finish_form(&mut self) {
        self.form = None;
        self.editing = None;
    }

    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        self.list.clamp(len);
    }
}
