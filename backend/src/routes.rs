use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use shared::{validate_title, Todo, TodoFields, TodoId};
use tower_http::cors::CorsLayer;

use crate::store::{StoreError, TodoStore};

pub fn router(store: TodoStore) -> Router {
    Router::new()
        .route("/api/todos", get(list_todos).post(create_todo))
        .route(
            "/api/todos/:id",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .route("/api/reset", post(reset_todos))
        .layer(CorsLayer::permissive())
        .with_state(store)
}

impl From<StoreError> for StatusCode {
    fn from(error: StoreError) -> Self {
        log::error!("store failure: {}", error);
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

async fn list_todos(State(store): State<TodoStore>) -> Result<Json<Vec<Todo>>, StatusCode> {
    Ok(Json(store.list().await?))
}

async fn get_todo(
    Path(id): Path<TodoId>,
    State(store): State<TodoStore>,
) -> Result<Json<Todo>, StatusCode> {
    store.get(id).await?.map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn create_todo(
    State(store): State<TodoStore>,
    Json(fields): Json<TodoFields>,
) -> Result<(StatusCode, Json<Todo>), StatusCode> {
    check_title(&fields)?;
    let todo = store.create(fields).await?;
    log::info!("created todo {}", todo.id);
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo(
    Path(id): Path<TodoId>,
    State(store): State<TodoStore>,
    Json(fields): Json<TodoFields>,
) -> Result<Json<Todo>, StatusCode> {
    check_title(&fields)?;
    match store.update(id, fields).await? {
        Some(todo) => {
            log::info!("updated todo {} completed={}", id, todo.completed);
            Ok(Json(todo))
        }
        None => Err(StatusCode::NOT_FOUND),
    }
}

async fn delete_todo(
    Path(id): Path<TodoId>,
    State(store): State<TodoStore>,
) -> Result<StatusCode, StatusCode> {
    if store.delete(id).await? {
        log::info!("deleted todo {}", id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

async fn reset_todos(State(store): State<TodoStore>) -> Result<StatusCode, StatusCode> {
    store.reset().await?;
    log::warn!("todo store reset");
    Ok(StatusCode::NO_CONTENT)
}

fn check_title(fields: &TodoFields) -> Result<(), StatusCode> {
    validate_title(&fields.title).map_err(|error| {
        log::debug!("rejected todo: {}", error);
        StatusCode::BAD_REQUEST
    })
}
