use crate::errors::{DomainError, DomainResult};
use crate::identifiers::TodoId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 永続化された Todo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// 新規作成。`created_at` と `updated_at` は同じ時刻になります。
    pub fn new(id: TodoId, fields: TodoFields, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: fields.title,
            description: fields.description,
            completed: fields.completed,
            created_at: now,
            updated_at: now,
        }
    }

    /// 可変な 3 フィールドを丸ごと置き換え、`updated_at` を進めます。
    /// 時計が巻き戻っても `updated_at` は減少しません。
    pub fn replace(&mut self, fields: TodoFields, now: DateTime<Utc>) {
        self.title = fields.title;
        self.description = fields.description;
        self.completed = fields.completed;
        self.updated_at = now.max(self.updated_at);
    }
}

/// 作成・更新で書き込まれる検証済みフィールド
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoFields {
    title: String,
    description: String,
    completed: bool,
}

impl TodoFields {
    /// リクエスト由来の値を検証し、既定値を補います。
    ///
    /// - `title` は前後の空白を除去した上で空であってはならない
    /// - `description` の既定値は空文字列
    /// - `completed` の既定値は `false`
    pub fn new(
        title: Option<String>,
        description: Option<String>,
        completed: Option<bool>,
    ) -> DomainResult<Self> {
        let title = title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(DomainError::TitleRequired)?
            .to_string();

        Ok(Self {
            title,
            description: description.unwrap_or_default(),
            completed: completed.unwrap_or(false),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn completed(&self) -> bool {
        self.completed
    }
}
