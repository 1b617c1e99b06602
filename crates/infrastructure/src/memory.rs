use std::collections::HashMap;

use chrono::Utc;
use domain::{Todo, TodoFields, TodoId};
use tokio::sync::RwLock;

use crate::repositories::{sort_newest_first, StoreResult, TodoStore};

/// 簡易な InMemory 実装（開発/テスト用）
#[derive(Debug, Default)]
pub struct InMemoryTodoStore {
    todos: RwLock<HashMap<TodoId, Todo>>,
}

impl InMemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.todos.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.todos.read().await.is_empty()
    }
}

impl TodoStore for InMemoryTodoStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn list(&self) -> StoreResult<Vec<Todo>> {
        let mut todos: Vec<Todo> = self.todos.read().await.values().cloned().collect();
        sort_newest_first(&mut todos);
        Ok(todos)
    }

    async fn insert(&self, fields: TodoFields) -> StoreResult<Todo> {
        let mut todos = self.todos.write().await;
        // ULID の衝突は現実的に起きないが、既存 ID は上書きしない
        let mut id = TodoId::new();
        while todos.contains_key(&id) {
            id = TodoId::new();
        }
        let todo = Todo::new(id, fields, Utc::now());
        todos.insert(todo.id.clone(), todo.clone());
        Ok(todo)
    }

    async fn find(&self, id: &TodoId) -> StoreResult<Option<Todo>> {
        Ok(self.todos.read().await.get(id).cloned())
    }

    async fn replace(&self, id: &TodoId, fields: TodoFields) -> StoreResult<Option<Todo>> {
        let mut todos = self.todos.write().await;
        Ok(todos.get_mut(id).map(|todo| {
            todo.replace(fields, Utc::now());
            todo.clone()
        }))
    }

    async fn remove(&self, id: &TodoId) -> StoreResult<Option<Todo>> {
        Ok(self.todos.write().await.remove(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(title: &str, description: Option<&str>, completed: Option<bool>) -> TodoFields {
        TodoFields::new(Some(title.to_string()), description.map(str::to_string), completed)
            .unwrap()
    }

    #[tokio::test]
    async fn insert_assigns_id_and_equal_timestamps() {
        let store = InMemoryTodoStore::new();
        let todo = store.insert(fields("A", Some("B"), Some(false))).await.unwrap();

        assert!(!todo.id.as_str().is_empty());
        assert_eq!(todo.title, "A");
        assert_eq!(todo.description, "B");
        assert!(!todo.completed);
        assert_eq!(todo.created_at, todo.updated_at);
        assert_eq!(store.find(&todo.id).await.unwrap(), Some(todo));
    }

    #[tokio::test]
    async fn find_unknown_id_returns_none() {
        let store = InMemoryTodoStore::new();
        assert_eq!(store.find(&TodoId::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn list_returns_newest_first() {
        let store = InMemoryTodoStore::new();
        for title in ["T1", "T2", "T3"] {
            store.insert(fields(title, None, None)).await.unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }

        let titles: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, ["T3", "T2", "T1"]);
    }

    #[tokio::test]
    async fn replace_overwrites_fields_and_refreshes_updated_at() {
        let store = InMemoryTodoStore::new();
        let created = store.insert(fields("A", Some("B"), Some(true))).await.unwrap();

        let updated = store
            .replace(&created.id, fields("C", None, None))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "C");
        assert_eq!(updated.description, "");
        assert!(!updated.completed);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn replace_unknown_id_does_not_create() {
        let store = InMemoryTodoStore::new();
        let result = store.replace(&TodoId::new(), fields("A", None, None)).await.unwrap();
        assert_eq!(result, None);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn remove_is_final() {
        let store = InMemoryTodoStore::new();
        let created = store.insert(fields("A", None, None)).await.unwrap();

        assert_eq!(store.remove(&created.id).await.unwrap(), Some(created.clone()));
        assert_eq!(store.remove(&created.id).await.unwrap(), None);
        assert_eq!(store.find(&created.id).await.unwrap(), None);
        assert_eq!(store.len().await, 0);
    }
}
