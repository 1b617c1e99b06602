use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::DomainError;
use infrastructure::StoreError;
use thiserror::Error;

use crate::models::ErrorBody;

const TITLE_REQUIRED: &str = "Title is required";
const INVALID_BODY: &str = "Invalid request body";
const INVALID_ID: &str = "Invalid ID";

/// エラーメッセージを決めるための操作種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Get,
    Update,
    Delete,
}

impl Operation {
    /// ストア障害時にクライアントへ返す汎用メッセージ
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::List => "Failed to fetch todos",
            Operation::Create => "Failed to create todo",
            Operation::Get => "Failed to fetch todo",
            Operation::Update => "Failed to update todo",
            Operation::Delete => "Failed to delete todo",
        }
    }

    fn invalid_id_message(self) -> &'static str {
        match self {
            Operation::Get => INVALID_ID,
            other => other.failure_message(),
        }
    }

    fn validation_message(self) -> &'static str {
        match self {
            Operation::Update => self.failure_message(),
            _ => TITLE_REQUIRED,
        }
    }

    fn invalid_body_message(self) -> &'static str {
        match self {
            Operation::Update => self.failure_message(),
            _ => INVALID_BODY,
        }
    }
}

/// ハンドラが返す全エラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// 必須項目の欠落やボディの不正（ストア呼び出し前に検出）
    #[error("{0}")]
    Validation(&'static str),

    #[error("Todo not found")]
    NotFound,

    /// 未定義ルート
    #[error("Not found")]
    RouteNotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// ストアの ID 形式として解釈できない
    #[error("{message}")]
    MalformedId { message: &'static str, id: String },

    /// 詳細はログにのみ出し、クライアントには汎用メッセージを返す
    #[error("{message}")]
    Infrastructure {
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    pub fn from_domain(op: Operation, err: DomainError) -> Self {
        match err {
            DomainError::InvalidTodoId(id) => ApiError::MalformedId {
                message: op.invalid_id_message(),
                id,
            },
            DomainError::TitleRequired => ApiError::Validation(op.validation_message()),
        }
    }

    pub fn from_store(op: Operation, err: StoreError) -> Self {
        ApiError::Infrastructure {
            message: op.failure_message(),
            source: err,
        }
    }

    /// JSON 以外の Content-Type は空ボディ扱いとし、タイトル欠落として報告する
    pub fn from_rejection(op: Operation, rejection: JsonRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "Request body rejected");
        match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                ApiError::Validation(op.validation_message())
            }
            _ => ApiError::Validation(op.invalid_body_message()),
        }
    }

    /// パスパラメータを文字列として取り出せない（不正な UTF-8 など）
    pub fn from_path_rejection(op: Operation, rejection: PathRejection) -> Self {
        ApiError::MalformedId {
            message: op.invalid_id_message(),
            id: rejection.body_text(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::MalformedId { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Infrastructure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            ApiError::Infrastructure { message, source } => {
                tracing::error!(error = %source, "{message}");
            }
            ApiError::MalformedId { id, .. } => {
                tracing::warn!(todo_id = %id, status = status.as_u16(), "Malformed todo id");
            }
            _ => {
                tracing::warn!(error = %self, status = status.as_u16(), "Request failed");
            }
        }

        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
