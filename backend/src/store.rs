use std::collections::BTreeMap;
use std::sync::Arc;

use redis::{AsyncCommands, Client};
use shared::{Todo, TodoFields, TodoId};
use thiserror::Error;
use tokio::sync::Mutex;

const ITEM_KEY_PREFIX: &str = "todos:item:";
const NEXT_ID_KEY: &str = "todos:next_id";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("corrupt todo record: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Default)]
pub struct MemoryTodos {
    todos: BTreeMap<TodoId, Todo>,
    last_id: TodoId,
}

/// Where todos live: a redis instance, or a map for local runs and tests.
#[derive(Clone)]
pub enum TodoStore {
    Memory(Arc<Mutex<MemoryTodos>>),
    Redis(Arc<Client>),
}

impl TodoStore {
    pub fn memory() -> Self {
        TodoStore::Memory(Arc::new(Mutex::new(MemoryTodos::default())))
    }

    pub fn redis(url: &str) -> Result<Self, StoreError> {
        Ok(TodoStore::Redis(Arc::new(Client::open(url)?)))
    }

    pub async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        match self {
            TodoStore::Memory(memory) => Ok(memory.lock().await.todos.values().cloned().collect()),
            TodoStore::Redis(client) => {
                let mut conn = client.get_async_connection().await?;
                let keys: Vec<String> = conn.keys(format!("{}*", ITEM_KEY_PREFIX)).await?;

                let mut todos = Vec::with_capacity(keys.len());
                for key in keys {
                    let json: Option<String> = conn.get(&key).await?;
                    if let Some(json) = json {
                        todos.push(serde_json::from_str::<Todo>(&json)?);
                    }
                }
                todos.sort_by_key(|todo| todo.id);
                Ok(todos)
            }
        }
    }

    pub async fn get(&self, id: TodoId) -> Result<Option<Todo>, StoreError> {
        match self {
            TodoStore::Memory(memory) => Ok(memory.lock().await.todos.get(&id).cloned()),
            TodoStore::Redis(client) => {
                let mut conn = client.get_async_connection().await?;
                let json: Option<String> = conn.get(item_key(id)).await?;
                Ok(json.map(|json| serde_json::from_str(&json)).transpose()?)
            }
        }
    }

    pub async fn create(&self, fields: TodoFields) -> Result<Todo, StoreError> {
        match self {
            TodoStore::Memory(memory) => {
                let mut memory = memory.lock().await;
                memory.last_id += 1;
                let todo = Todo::from_fields(memory.last_id, fields);
                memory.todos.insert(todo.id, todo.clone());
                Ok(todo)
            }
            TodoStore::Redis(client) => {
                let mut conn = client.get_async_connection().await?;
                let id: TodoId = conn.incr(NEXT_ID_KEY, 1).await?;
                let todo = Todo::from_fields(id, fields);
                conn.set::<_, _, ()>(item_key(id), serde_json::to_string(&todo)?)
                    .await?;
                Ok(todo)
            }
        }
    }

    /// Replaces every client-settable field. `None` when the id is unknown.
    pub async fn update(&self, id: TodoId, fields: TodoFields) -> Result<Option<Todo>, StoreError> {
        match self {
            TodoStore::Memory(memory) => {
                let mut memory = memory.lock().await;
                Ok(memory.todos.get_mut(&id).map(|todo| {
                    *todo = Todo::from_fields(id, fields);
                    todo.clone()
                }))
            }
            TodoStore::Redis(client) => {
                let mut conn = client.get_async_connection().await?;
                let exists: bool = conn.exists(item_key(id)).await?;
                if !exists {
                    return Ok(None);
                }
                let todo = Todo::from_fields(id, fields);
                conn.set::<_, _, ()>(item_key(id), serde_json::to_string(&todo)?)
                    .await?;
                Ok(Some(todo))
            }
        }
    }

    /// `false` when there was nothing to delete.
    pub async fn delete(&self, id: TodoId) -> Result<bool, StoreError> {
        match self {
            TodoStore::Memory(memory) => Ok(memory.lock().await.todos.remove(&id).is_some()),
            TodoStore::Redis(client) => {
                let mut conn = client.get_async_connection().await?;
                let deleted: usize = conn.del(item_key(id)).await?;
                Ok(deleted > 0)
            }
        }
    }

    pub async fn reset(&self) -> Result<(), StoreError> {
        match self {
            TodoStore::Memory(memory) => {
                *memory.lock().await = MemoryTodos::default();
                Ok(())
            }
            TodoStore::Redis(client) => {
                let mut conn = client.get_async_connection().await?;
                let mut keys: Vec<String> = conn.keys(format!("{}*", ITEM_KEY_PREFIX)).await?;
                keys.push(NEXT_ID_KEY.to_string());
                conn.del::<_, ()>(keys).await?;
                Ok(())
            }
        }
    }
}

fn item_key(id: TodoId) -> String {
    format!("{}{}", ITEM_KEY_PREFIX, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(title: &str) -> TodoFields {
        TodoFields {
            title: title.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn memory_store_assigns_increasing_ids() {
        let store = TodoStore::memory();
        let first = store.create(fields("first")).await.unwrap();
        let second = store.create(fields("second")).await.unwrap();
        assert_eq!((first.id, second.id), (1, 2));

        assert!(store.delete(2).await.unwrap());
        let third = store.create(fields("third")).await.unwrap();
        assert_eq!(third.id, 3);

        let ids: Vec<TodoId> = store.list().await.unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, [1, 3]);
    }

    #[tokio::test]
    async fn memory_store_update_and_reset() {
        let store = TodoStore::memory();
        store.create(fields("draft")).await.unwrap();

        let updated = store.update(1, fields("final")).await.unwrap().unwrap();
        assert_eq!(updated.title, "final");
        assert!(store.update(9, fields("ghost")).await.unwrap().is_none());
        assert!(!store.delete(9).await.unwrap());

        store.reset().await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
        assert_eq!(store.create(fields("again")).await.unwrap().id, 1);
    }
}
