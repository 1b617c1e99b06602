//! todo-api バイナリのエントリポイント
//! DynamoDB への接続を確認してから HTTP サーバを起動します。

use std::sync::Arc;

use infrastructure::{DynamoDbTodoStore, TodoStore};
use shared::{init_tracing, Config};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing().map_err(|e| anyhow::anyhow!(e))?;

    let config = Config::from_env()?;

    // 接続できなければ部分的なサービス提供はせず即終了する
    let store = DynamoDbTodoStore::from_config(&config).await;
    if let Err(e) = store.ping().await {
        tracing::error!(
            error = %e,
            table_name = %config.dynamodb_table,
            "Failed to connect to DynamoDB"
        );
        std::process::exit(1);
    }

    let listener = TcpListener::bind(config.bind_address()).await?;
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "server starting");

    todo_api::serve(listener, Arc::new(store), shutdown_signal()).await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            // シグナルを受け取れない場合は停止要求を待たずに動き続ける
            tracing::error!(error = %e, "Failed to install CTRL+C signal handler");
            std::future::pending::<()>().await;
        }
    }
}
