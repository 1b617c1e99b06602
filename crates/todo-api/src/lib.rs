//! Todo リソースの HTTP API（axum）
//!
//! `/health` と `/todos` の CRUD を提供します。
//! ストアは `AppState` 経由で注入され、ハンドラはリクエスト間で状態を持ちません。

pub mod error;
pub mod handlers;
pub mod models;
pub mod router;

use std::{future::Future, sync::Arc};

use infrastructure::TodoStore;
use tokio::net::TcpListener;

pub use error::{ApiError, Operation};
pub use router::{app, app_with_store, AppState};

/// 受け付け済みのリスナーで API を提供します。
/// `shutdown` が完了すると処理中のリクエストを捌き切ってから戻ります。
pub async fn serve<S, F>(listener: TcpListener, store: Arc<S>, shutdown: F) -> std::io::Result<()>
where
    S: TodoStore,
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app_with_store(store))
        .with_graceful_shutdown(shutdown)
        .await
}
