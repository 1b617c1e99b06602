use std::sync::Arc;

use axum::{routing::get, Router};
use infrastructure::{InMemoryTodoStore, TodoStore};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{
    create_todo, delete_todo, get_todo, health, list_todos, method_not_allowed, not_found,
    update_todo,
};

/// アプリケーションの共有状態（ストアのハンドルのみ）
pub struct AppState<S> {
    store: Arc<S>,
}

impl<S> AppState<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

/// InMemory ストアでルータを構築します（ローカル確認・テスト用）。
pub fn app() -> Router {
    app_with_store(Arc::new(InMemoryTodoStore::new()))
}

/// 外部からストアを注入できる版
pub fn app_with_store<S: TodoStore>(store: Arc<S>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/todos", get(list_todos::<S>).post(create_todo::<S>))
        .route(
            "/todos/:id",
            get(get_todo::<S>)
                .put(update_todo::<S>)
                .delete(delete_todo::<S>),
        )
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(AppState::new(store))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
