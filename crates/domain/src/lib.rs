//! Todo リソースのドメインモデル
//!
//! エンティティ `Todo`、識別子 `TodoId`、入力検証済みの `TodoFields` を提供します。
//! 永続化や HTTP には依存しません。

pub mod errors;
pub mod identifiers;
pub mod todo;

pub use errors::*;
pub use identifiers::*;
pub use todo::*;
