use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, SecondsFormat, Utc};
use domain::{Todo, TodoId};
use std::collections::HashMap;

use crate::repositories::StoreError;

/// コレクション全体を 1 パーティションに置く
pub const TODO_PARTITION: &str = "TODO";
const TODO_SORT_PREFIX: &str = "TODO#";

/// DynamoDB Single Table Design のキー構造
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamoDbKeys {
    pub pk: String, // パーティションキー
    pub sk: String, // ソートキー
}

impl DynamoDbKeys {
    pub fn for_todo(todo_id: &TodoId) -> Self {
        Self {
            pk: TODO_PARTITION.to_string(),
            sk: format!("{TODO_SORT_PREFIX}{}", todo_id.as_str()),
        }
    }

    pub fn into_key_map(self) -> HashMap<String, AttributeValue> {
        HashMap::from([
            ("PK".to_string(), AttributeValue::S(self.pk)),
            ("SK".to_string(), AttributeValue::S(self.sk)),
        ])
    }
}

/// Todo を DynamoDB アイテムへ変換（キー属性を含む）
pub fn todo_to_item(todo: &Todo) -> HashMap<String, AttributeValue> {
    let mut item = DynamoDbKeys::for_todo(&todo.id).into_key_map();
    item.insert("id".to_string(), AttributeValue::S(todo.id.to_string()));
    item.insert("title".to_string(), AttributeValue::S(todo.title.clone()));
    item.insert(
        "description".to_string(),
        AttributeValue::S(todo.description.clone()),
    );
    item.insert("completed".to_string(), AttributeValue::Bool(todo.completed));
    item.insert("created_at".to_string(), timestamp_value(todo.created_at));
    item.insert("updated_at".to_string(), timestamp_value(todo.updated_at));
    item
}

/// 固定長（ナノ秒・`Z` 表記）の RFC 3339 文字列。辞書順が時刻順と一致する。
pub fn timestamp_value(ts: DateTime<Utc>) -> AttributeValue {
    AttributeValue::S(ts.to_rfc3339_opts(SecondsFormat::Nanos, true))
}

/// DynamoDB アイテムから Todo を復元
pub fn item_to_todo(item: &HashMap<String, AttributeValue>) -> Result<Todo, StoreError> {
    let id = string_attr(item, "id")?;
    let id = TodoId::parse(id).map_err(|e| StoreError::InvalidItem(e.to_string()))?;

    let completed = item
        .get("completed")
        .and_then(|v| v.as_bool().ok())
        .copied()
        .ok_or_else(|| missing("completed"))?;

    Ok(Todo {
        id,
        title: string_attr(item, "title")?.to_string(),
        // description は空文字列でも保存されるが、欠落していても既定値で復元する
        description: item
            .get("description")
            .and_then(|v| v.as_s().ok())
            .cloned()
            .unwrap_or_default(),
        completed,
        created_at: timestamp_attr(item, "created_at")?,
        updated_at: timestamp_attr(item, "updated_at")?,
    })
}

fn string_attr<'a>(
    item: &'a HashMap<String, AttributeValue>,
    name: &str,
) -> Result<&'a str, StoreError> {
    item.get(name)
        .and_then(|v| v.as_s().ok())
        .map(String::as_str)
        .ok_or_else(|| missing(name))
}

fn timestamp_attr(
    item: &HashMap<String, AttributeValue>,
    name: &str,
) -> Result<DateTime<Utc>, StoreError> {
    let raw = string_attr(item, name)?;
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::InvalidItem(format!("{name}: {e}")))
}

fn missing(name: &str) -> StoreError {
    StoreError::InvalidItem(format!("missing attribute {name}"))
}
