//! Client core for the todo list service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and holds all client-side
//! state: the todo collection, derived views, form and list interaction state,
//! and notifications. A host (the terminal UI, or a test) executes requests
//! and feeds the results back.
//!
//! # Design
//! - `TodoClient` is stateless, it holds only `base_url`.
//! - Each endpoint is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - `TodoApp` owns the collection and mutates it only from server replies
//!   passed to `TodoApp::apply`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod app;
pub mod client;
pub mod error;
pub mod form;
pub mod http;
pub mod list;
pub mod notification;
pub mod types;
pub mod view;

pub use app::{ApiCall, ApiReply, TodoApp};
pub use client::{TodoClient, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use form::{FormError, FormPayload, TodoForm};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use notification::{Notification, NotificationKind};
pub use types::{CreateTodo, Todo, UpdateTodo};
pub use view::{Filter, Stats};
