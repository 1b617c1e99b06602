use thiserror::Error;

/// ドメイン層の検証エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Invalid TodoId: {0}")]
    InvalidTodoId(String),

    #[error("Title is required")]
    TitleRequired,
}

pub type DomainResult<T> = Result<T, DomainError>;
