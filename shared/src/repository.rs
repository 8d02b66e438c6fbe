//! Talks to the `/api/todos` resource.
//!
//! The transport is behind [`RemoteStore`] so the browser can use `fetch`
//! while tests drive the same status handling natively.

use crate::{validate_title, Todo, TodoError, TodoFields, TodoId};

pub const API_TODOS_PATH: &str = "/api/todos";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    List,
    Create(TodoFields),
    Update(TodoId, TodoFields),
    Delete(TodoId),
}

impl ApiRequest {
    pub fn method(&self) -> &'static str {
        match self {
            ApiRequest::List => "GET",
            ApiRequest::Create(_) => "POST",
            ApiRequest::Update(..) => "PUT",
            ApiRequest::Delete(_) => "DELETE",
        }
    }

    pub fn url(&self, base: &str) -> String {
        match self {
            ApiRequest::List | ApiRequest::Create(_) => base.to_string(),
            ApiRequest::Update(id, _) | ApiRequest::Delete(id) => format!("{}/{}", base, id),
        }
    }

    pub fn body(&self) -> Result<Option<String>, TodoError> {
        match self {
            ApiRequest::Create(fields) | ApiRequest::Update(_, fields) => {
                Ok(Some(serde_json::to_string(fields)?))
            }
            ApiRequest::List | ApiRequest::Delete(_) => Ok(None),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and hands back the status and body untouched.
/// Transport failures map to [`TodoError::Network`].
#[allow(async_fn_in_trait)]
pub trait RemoteStore {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TodoError>;
}

#[derive(Debug, Clone)]
pub struct TodoRepository<S> {
    store: S,
}

impl<S: RemoteStore> TodoRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn fetch_all(&self) -> Result<Vec<Todo>, TodoError> {
        let response = self.store.send(ApiRequest::List).await?;
        if !response.is_success() {
            log::error!("failed to fetch todos, status {}", response.status);
            return Err(TodoError::Fetch {
                status: response.status,
            });
        }

        let todos: Vec<Todo> = serde_json::from_str(&response.body)?;
        log::debug!("fetched {} todos", todos.len());
        Ok(attach_due_dates(todos))
    }

    pub async fn create(&self, fields: &TodoFields) -> Result<(), TodoError> {
        validate_title(&fields.title)?;
        self.expect_success(ApiRequest::Create(fields.clone())).await
    }

    pub async fn update(&self, id: TodoId, fields: &TodoFields) -> Result<(), TodoError> {
        validate_title(&fields.title)?;
        self.expect_success(ApiRequest::Update(id, fields.clone()))
            .await
    }

    pub async fn remove(&self, id: TodoId) -> Result<(), TodoError> {
        let response = self.store.send(ApiRequest::Delete(id)).await?;
        if response.status != 204 {
            log::error!("failed to delete todo {}, status {}", id, response.status);
            return Err(TodoError::Fetch {
                status: response.status,
            });
        }
        Ok(())
    }

    /// Flips `completed`, sending the rest of the record as it is.
    pub async fn toggle_complete(&self, todo: &Todo) -> Result<(), TodoError> {
        let mut fields = todo.fields();
        fields.completed = !todo.completed;
        self.expect_success(ApiRequest::Update(todo.id, fields))
            .await
    }

    pub async fn mark_complete(&self, todo: &Todo) -> Result<(), TodoError> {
        let mut fields = todo.fields();
        fields.completed = true;
        self.expect_success(ApiRequest::Update(todo.id, fields))
            .await
    }

    async fn expect_success(&self, request: ApiRequest) -> Result<(), TodoError> {
        let method = request.method();
        let response = self.store.send(request).await?;
        if !response.is_success() {
            log::error!("{} request failed, status {}", method, response.status);
            return Err(TodoError::Fetch {
                status: response.status,
            });
        }
        Ok(())
    }
}

pub fn attach_due_dates(todos: Vec<Todo>) -> Vec<Todo> {
    todos
        .into_iter()
        .map(|mut todo| {
            todo.due_date = todo.due_date_key();
            todo
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_map_to_methods_and_urls() {
        let fields = TodoFields {
            title: "Walk dog".into(),
            ..Default::default()
        };

        assert_eq!(ApiRequest::List.method(), "GET");
        assert_eq!(ApiRequest::List.url(API_TODOS_PATH), "/api/todos");
        assert_eq!(
            ApiRequest::Update(7, fields.clone()).url(API_TODOS_PATH),
            "/api/todos/7"
        );
        assert_eq!(ApiRequest::Delete(7).method(), "DELETE");
        assert_eq!(ApiRequest::Delete(7).body(), Ok(None));

        let body = ApiRequest::Create(fields).body().unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["title"], "Walk dog");
        assert!(value.get("id").is_none());
        assert!(value.get("due_date").is_none());
    }
}
