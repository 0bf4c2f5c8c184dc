use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub keyword: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Todo not found")]
    NotFound,

    #[error("Title must not be blank")]
    BlankTitle,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BlankTitle => StatusCode::BAD_REQUEST,
        };

        (status, self.to_string()).into_response()
    }
}

#[derive(Default)]
pub struct Store {
    todos: BTreeMap<i64, Todo>,
    last_id: i64,
}

impl Store {
    /// Newest first; ids break ties between equal timestamps.
    fn sorted(&self, keep: impl Fn(&Todo) -> bool) -> Vec<Todo> {
        let mut todos: Vec<Todo> = self.todos.values().filter(|&t| keep(t)).cloned().collect();
        todos.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        todos
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    let api = Router::new()
        .route("/health", get(health))
        .route("/welcome", get(welcome))
        .route("/todos", get(list_todos).post(create_todo).delete(delete_all_todos))
        .route("/todos/completed", get(completed_todos))
        .route("/todos/pending", get(pending_todos))
        .route("/todos/search", get(search_todos))
        .route("/todos/{id}", get(get_todo).put(update_todo).delete(delete_todo));
    Router::new().nest("/api", api).with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!("mock todo API listening on {addr}");
    }
    axum::serve(listener, app()).await
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

fn non_blank(title: String) -> Result<String, AppError> {
    if title.trim().is_empty() {
        return Err(AppError::BlankTitle);
    }
    Ok(title)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "UP", "service": "Todo Backend" }))
}

async fn welcome() -> Json<Value> {
    Json(json!({
        "message": "Welcome to Todo App Backend!",
        "status": "success",
        "timestamp": now(),
        "version": "1.0.0",
    }))
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    Json(db.read().await.sorted(|_| true))
}

async fn completed_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    Json(db.read().await.sorted(|t| t.completed))
}

async fn pending_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    Json(db.read().await.sorted(|t| !t.completed))
}

/// Matches the keyword against titles only, ignoring case.
async fn search_todos(
    State(db): State<Db>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<Todo>> {
    let needle = params.keyword.to_lowercase();
    Json(db.read().await.sorted(|t| t.title.to_lowercase().contains(&needle)))
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>), AppError> {
    let title = non_blank(input.title)?;
    let mut store = db.write().await;
    store.last_id += 1;
    let at = now();
    let todo = Todo {
        id: store.last_id,
        title,
        description: input.description.unwrap_or_default(),
        completed: false,
        created_at: at,
        updated_at: at,
    };
    store.todos.insert(todo.id, todo.clone());
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn get_todo(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Todo>, AppError> {
    let store = db.read().await;
    store.todos.get(&id).cloned().map(Json).ok_or(AppError::NotFound)
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, AppError> {
    let title = non_blank(input.title)?;
    let mut store = db.write().await;
    let todo = store.todos.get_mut(&id).ok_or(AppError::NotFound)?;
    todo.title = title;
    todo.description = input.description.unwrap_or_default();
    todo.completed = input.completed;
    todo.updated_at = now().max(todo.created_at);
    Ok(Json(todo.clone()))
}

async fn delete_todo(State(db): State<Db>, Path(id): Path<i64>) -> Result<StatusCode, AppError> {
    let mut store = db.write().await;
    store
        .todos
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(AppError::NotFound)
}

async fn delete_all_todos(State(db): State<Db>) -> StatusCode {
    db.write().await.todos.clear();
    StatusCode::NO_CONTENT
}
