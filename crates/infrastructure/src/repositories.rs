use domain::{Todo, TodoFields, TodoId};
use std::future::Future;
use thiserror::Error;

/// ストア層のエラー
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// 接続断・タイムアウト・スロットリングなど
    #[error("DynamoDB error: {0}")]
    Backend(String),

    /// 保存済みアイテムをドメイン型へ復元できない
    #[error("Invalid item: {0}")]
    InvalidItem(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Todo コレクションに対するドキュメントストアの抽象
///
/// 各メソッドは単一ドキュメントに対する 1 回のアトミックな呼び出しです。
/// 該当なしは `Ok(None)` で表し、エラーにはしません。
pub trait TodoStore: Send + Sync + 'static {
    /// 接続確認（起動時に 1 度だけ呼ぶ）
    fn ping(&self) -> impl Future<Output = StoreResult<()>> + Send;

    /// 全件を `created_at` 降順（同時刻は ID 降順）で返す
    fn list(&self) -> impl Future<Output = StoreResult<Vec<Todo>>> + Send;

    /// ID とタイムスタンプを採番して保存する
    fn insert(&self, fields: TodoFields) -> impl Future<Output = StoreResult<Todo>> + Send;

    fn find(&self, id: &TodoId) -> impl Future<Output = StoreResult<Option<Todo>>> + Send;

    /// 3 フィールドを置き換えて `updated_at` を更新する。存在しなければ作成しない。
    fn replace(
        &self,
        id: &TodoId,
        fields: TodoFields,
    ) -> impl Future<Output = StoreResult<Option<Todo>>> + Send;

    /// 物理削除。削除したドキュメントを返す。
    fn remove(&self, id: &TodoId) -> impl Future<Output = StoreResult<Option<Todo>>> + Send;
}

/// 一覧の並び順（新しい順）に整列します。
pub fn sort_newest_first(todos: &mut [Todo]) {
    todos.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}
