use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{delete, get, post, put},
    Form, Json, Router,
};
use maud::Markup;
use serde::Deserialize;

use crate::controller::TodoList;
use crate::error::AppError;
use crate::models::Todo;
use crate::service::TodoService;
use crate::views;

// === App State ===
#[derive(Debug, Clone)]
pub struct AppState {
    todos: Arc<TodoList>,
}
impl AppState {
    pub fn new(service: TodoService) -> Self {
        Self {
            todos: Arc::new(TodoList::new(service)),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/todos", get(todos))
        .route("/create_todo", put(create_todo))
        .route("/toggle_todo", post(toggle_todo))
        .route("/remove_todo", delete(remove_todo))
        .route("/api/todos", get(api_todos))
        .with_state(state)
}

// === Routes ===
// a page load mounts a fresh view; the loading indicator then pulls `/todos`
async fn root(State(state): State<AppState>) -> Markup {
    state.todos.mount().await;
    views::page(&state.todos.present().await)
}

async fn todos(State(state): State<AppState>) -> Markup {
    state.todos.load().await;
    views::app(&state.todos.present().await)
}

#[derive(Deserialize)]
struct CreateTodo {
    title: String,
}
async fn create_todo(
    State(state): State<AppState>,
    Form(CreateTodo { title }): Form<CreateTodo>,
) -> Markup {
    state.todos.add(&title).await;
    views::app(&state.todos.present().await)
}

#[derive(Deserialize)]
struct ToggleTodo {
    id: String,
    completed: bool,
}
async fn toggle_todo(
    State(state): State<AppState>,
    Form(ToggleTodo { id, completed }): Form<ToggleTodo>,
) -> Markup {
    state.todos.toggle(&id, completed).await;
    views::app(&state.todos.present().await)
}

// htmx sends DELETE parameters in the query string, and only once the
// browser-side `hx-confirm` prompt was accepted
#[derive(Deserialize)]
struct RemoveTodo {
    id: String,
    #[serde(default)]
    confirmed: bool,
}
async fn remove_todo(
    State(state): State<AppState>,
    Query(RemoveTodo { id, confirmed }): Query<RemoveTodo>,
) -> Markup {
    state.todos.delete(&id, confirmed).await;
    views::app(&state.todos.present().await)
}

async fn api_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, AppError> {
    let todos = state.todos.service().fetch_todos().await?;
    Ok(Json(todos))
}
