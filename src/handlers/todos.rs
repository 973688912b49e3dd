use axum::{
    extract::{Extension, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use serde::Deserialize;

use crate::database::store::Todo;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateTodo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub done: bool,
}

/// GET /todos - list all todos
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = state.store.list().await?;
    Ok(Json(todos))
}

/// GET /secure/todos - same listing, behind the bearer-token gate
pub async fn list_secure(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    tracing::debug!(user = %user.username, "authenticated todo listing");
    let todos = state.store.list().await?;
    Ok(Json(todos))
}

/// POST /todos - create a todo, returning 201 with the stored record and a
/// Location header for the assigned id
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateTodo>,
) -> Result<impl IntoResponse, ApiError> {
    let todo = state.store.create(&payload.title, payload.done).await?;
    let location = format!("/todos/{}", todo.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(todo),
    ))
}
