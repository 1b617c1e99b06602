use domain::{DomainResult, TodoFields};
use serde::{Deserialize, Serialize};

/// POST /todos リクエスト
#[derive(Debug, Default, Deserialize)]
pub struct CreateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl CreateTodoRequest {
    pub fn into_fields(self) -> DomainResult<TodoFields> {
        TodoFields::new(self.title, self.description, self.completed)
    }
}

/// PUT /todos/{id} リクエスト
///
/// 全置換のため、省略されたフィールドは既定値で上書きされます。
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl UpdateTodoRequest {
    pub fn into_fields(self) -> DomainResult<TodoFields> {
        TodoFields::new(self.title, self.description, self.completed)
    }
}

#[derive(Debug, Serialize)]
pub struct HealthBody {
    /// サービスの簡易ステータス
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::DomainError;

    #[test]
    fn create_request_fields_are_all_optional() {
        let req: CreateTodoRequest = serde_json::from_str("{}").unwrap();
        assert!(req.title.is_none());
        assert_eq!(req.into_fields(), Err(DomainError::TitleRequired));
    }

    #[test]
    fn create_request_treats_null_title_as_missing() {
        let req: CreateTodoRequest = serde_json::from_str(r#"{"title":null}"#).unwrap();
        assert_eq!(req.into_fields(), Err(DomainError::TitleRequired));
    }

    #[test]
    fn update_request_applies_defaults_for_omitted_fields() {
        let req: UpdateTodoRequest = serde_json::from_str(r#"{"title":" New "}"#).unwrap();
        let fields = req.into_fields().unwrap();
        assert_eq!(fields.title(), "New");
        assert_eq!(fields.description(), "");
        assert!(!fields.completed());
    }

    #[test]
    fn request_rejects_wrongly_typed_fields() {
        assert!(serde_json::from_str::<CreateTodoRequest>(r#"{"title":1}"#).is_err());
        assert!(serde_json::from_str::<UpdateTodoRequest>(r#"{"completed":"yes"}"#).is_err());
    }
}
