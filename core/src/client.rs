//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each endpoint is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip, keeping the core
//! deterministic and free of I/O dependencies. No retries, no caching.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodo, Todo, UpdateTodo};

/// Where the backend listens by default.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl Default for TodoClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_health(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/health")
    }

    pub fn build_welcome(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/welcome")
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/todos")
    }

    pub fn build_get_todo(&self, id: i64) -> HttpRequest {
        self.request(HttpMethod::Get, &format!("/todos/{id}"))
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, "/todos", input)
    }

    pub fn build_update_todo(&self, id: i64, input: &UpdateTodo) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Put, &format!("/todos/{id}"), input)
    }

    pub fn build_delete_todo(&self, id: i64) -> HttpRequest {
        self.request(HttpMethod::Delete, &format!("/todos/{id}"))
    }

    pub fn build_delete_all_todos(&self) -> HttpRequest {
        self.request(HttpMethod::Delete, "/todos")
    }

    pub fn build_completed_todos(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/todos/completed")
    }

    pub fn build_pending_todos(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/todos/pending")
    }

    pub fn build_search_todos(&self, keyword: &str) -> HttpRequest {
        let mut req = self.request(HttpMethod::Get, "/todos/search");
        req.query.push(("keyword".to_string(), keyword.to_string()));
        req
    }

    /// The health payload is opaque to the client.
    pub fn parse_health(&self, response: HttpResponse) -> Result<serde_json::Value, ApiError> {
        parse_json(response)
    }

    pub fn parse_welcome(&self, response: HttpResponse) -> Result<serde_json::Value, ApiError> {
        parse_json(response)
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        parse_json(response)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json(response)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json(response)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json(response)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_delete_all_todos(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_completed_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        parse_json(response)
    }

    pub fn parse_pending_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        parse_json(response)
    }

    pub fn parse_search_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        parse_json(response)
    }

    fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    fn json_request<T: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        input: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        let mut req = self.request(method, path);
        req.headers
            .push(("content-type".to_string(), "application/json".to_string()));
        req.body = Some(body);
        Ok(req)
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}
