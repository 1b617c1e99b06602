//! Todo コレクションを保持するドキュメントストア
//!
//! `TodoStore` が 1 操作 = 1 ストア呼び出しの境界です。
//! 本番は `DynamoDbTodoStore`、テストやローカル開発は `InMemoryTodoStore` を使います。

pub mod dynamodb;
pub mod memory;
pub mod models;
pub mod repositories;

pub use dynamodb::*;
pub use memory::*;
pub use models::*;
pub use repositories::*;
